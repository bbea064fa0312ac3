//! Scrub-position controller for frame-sequence playback.

/// Scripted playback direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Opening: play toward the last frame
    Forward,
    /// Closing: play back toward frame 0
    Backward,
    /// No scripted motion; only drag moves the position
    #[default]
    Hold,
}

impl Direction {
    /// Sign applied to the playback rate.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
            Direction::Hold => 0.0,
        }
    }
}

/// What a call to [`PlaybackController::advance`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Nothing is scripted
    Idle,
    /// Position moved and playback continues
    Moving,
    /// Forward playback landed on the last frame and stopped
    Opened,
    /// Backward playback landed on frame 0 and stopped; fires once per close
    Closed,
}

/// Platform-agnostic scrub-position controller.
///
/// The position is a continuous frame index in `[0, frame_count - 1]`.
/// Scripted playback advances it by `rate * direction * elapsed`, so
/// speed doesn't depend on how often the caller ticks. Drag input moves
/// it directly.
///
/// ## Example
///
/// ```rust
/// use showcase_core_view::{Advance, PlaybackController};
///
/// // 10 frames over one second
/// let mut ctrl = PlaybackController::new(10, 10.0);
/// ctrl.play_forward();
/// assert_eq!(ctrl.advance(0.5), Advance::Moving);
/// assert_eq!(ctrl.position(), 5.0);
/// assert_eq!(ctrl.advance(0.5), Advance::Opened);
/// assert_eq!(ctrl.position(), 9.0);
///
/// ctrl.request_close();
/// assert_eq!(ctrl.advance(2.0), Advance::Closed);
/// assert_eq!(ctrl.position(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct PlaybackController {
    /// Raw scrub position
    position: f64,
    /// Total number of frames
    frame_count: usize,
    /// Frames per second for scripted playback
    rate: f64,
    direction: Direction,
    /// A close was requested and hasn't reported completion yet
    closing: bool,
}

impl PlaybackController {
    /// Create a held controller at position 0.
    pub fn new(frame_count: usize, rate: f64) -> Self {
        Self {
            position: 0.0,
            frame_count,
            rate: if rate.is_nan() { 0.0 } else { rate.abs() },
            direction: Direction::Hold,
            closing: false,
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Largest valid position.
    #[inline]
    pub fn max_position(&self) -> f64 {
        self.frame_count.saturating_sub(1) as f64
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a close is pending (requested, not yet completed).
    #[inline]
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Frame to display for the current raw position.
    #[inline]
    pub fn current_frame(&self) -> usize {
        frame_for_position(self.position, self.frame_count)
    }

    /// Set the position directly, clamped to the valid range.
    pub fn set_position(&mut self, position: f64) {
        self.position = self.clamp(position);
    }

    /// Restart opening playback from frame 0.
    pub fn play_forward(&mut self) {
        self.position = 0.0;
        self.closing = false;
        self.direction = Direction::Forward;
    }

    /// Start closing playback from wherever the position currently is.
    pub fn request_close(&mut self) {
        self.closing = true;
        self.direction = Direction::Backward;
    }

    /// Stop scripted motion, keeping the position.
    pub fn hold(&mut self) {
        self.direction = Direction::Hold;
    }

    /// Apply a horizontal drag of `dx` pixels.
    ///
    /// Dragging right moves toward earlier frames. Drag never reports a
    /// close completion, even when it reaches frame 0.
    pub fn drag(&mut self, dx: f64, sensitivity: f64) {
        if !dx.is_finite() || !sensitivity.is_finite() {
            return;
        }
        self.position = self.clamp(self.position - dx * sensitivity);
    }

    /// Advance scripted playback by `elapsed` seconds.
    pub fn advance(&mut self, elapsed: f64) -> Advance {
        let elapsed = if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            0.0
        };
        let max = self.max_position();

        match self.direction {
            Direction::Hold => Advance::Idle,
            Direction::Forward => {
                let next = self.position + self.step(elapsed);
                if next >= max {
                    self.position = max;
                    self.direction = Direction::Hold;
                    Advance::Opened
                } else {
                    self.position = next;
                    Advance::Moving
                }
            }
            Direction::Backward => {
                let next = self.position - self.step(elapsed);
                if next <= 0.0 {
                    self.position = 0.0;
                    self.direction = Direction::Hold;
                    self.closing = false;
                    Advance::Closed
                } else {
                    self.position = next;
                    Advance::Moving
                }
            }
        }
    }

    fn step(&self, elapsed: f64) -> f64 {
        if elapsed == 0.0 {
            // inf * 0 would be NaN for instant transitions
            0.0
        } else {
            self.rate * elapsed
        }
    }

    fn clamp(&self, position: f64) -> f64 {
        if position.is_nan() {
            return 0.0;
        }
        position.clamp(0.0, self.max_position())
    }
}

/// Frame index shown for a scrub position: `clamp(floor(position), 0, count - 1)`.
#[inline]
pub fn frame_for_position(position: f64, frame_count: usize) -> usize {
    if frame_count == 0 || position.is_nan() || position <= 0.0 {
        return 0;
    }
    (position.floor() as usize).min(frame_count - 1)
}
