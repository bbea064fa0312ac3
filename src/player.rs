//! Interactive frame-sequence player.
//!
//! A [`SequencePlayer`] is created when an item viewer mounts and dropped
//! when it unmounts. The host drives it:
//!
//! 1. spawn [`SequencePlayer::load`] on its executor,
//! 2. forward container resizes to [`SequencePlayer::resize`],
//! 3. forward horizontal drags to [`SequencePlayer::drag`],
//! 4. call [`SequencePlayer::tick`] once per animation frame.
//!
//! `tick` reports when a closing pass has landed on frame 0, which is the
//! signal the [`ViewCoordinator`](crate::ViewCoordinator) waits for.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::animation::frame_for_position;
use crate::{
    Advance, Direction, FrameFetcher, FrameImage, FrameSurface, ImageSequence, LoadingProgress,
    PlaybackController, PlayerConfig, RenderPlan, ResourceCache, Spring, SurfaceSize,
};

/// Longest time step fed to the smoothing spring, in seconds.
const MAX_SMOOTHING_STEP: f64 = 0.1;

/// Frames and progress filled in by the loading task.
struct FrameSlots<I> {
    frames: Vec<Option<I>>,
    progress: LoadingProgress,
}

/// Result of one [`SequencePlayer::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Frame drawn during this tick, if the surface changed
    pub drawn: Option<usize>,
    /// The closing pass reached frame 0 during this tick
    pub exit_complete: bool,
}

/// Scrub-by-drag image sequence player.
pub struct SequencePlayer<I> {
    sequence: ImageSequence,
    config: PlayerConfig,
    slots: Rc<RefCell<FrameSlots<I>>>,
    mounted: Rc<Cell<bool>>,
    playback: PlaybackController,
    spring: Spring,
    surface: SurfaceSize,
    /// Playback was kicked off after loading finished
    started: bool,
    /// Host-side closing level; stays set after the pass completes
    close_requested: bool,
    /// Timestamp of the previous tick in milliseconds
    last_tick: Option<f64>,
    last_drawn: Option<usize>,
    needs_redraw: bool,
}

impl<I> SequencePlayer<I>
where
    I: FrameImage + Clone + 'static,
{
    /// Mount a player for `sequence`.
    ///
    /// When `closing` is set the player skips the opening pass and plays
    /// back to frame 0 as soon as its frames are ready.
    pub fn mount(sequence: ImageSequence, config: PlayerConfig, closing: bool) -> Self {
        let frame_count = sequence.frame_count;
        let mut playback = PlaybackController::new(frame_count, config.playback_rate(frame_count));
        if closing {
            playback.request_close();
        }
        log::debug!(
            "mounting player for {} ({} frames, closing: {})",
            sequence.prefix,
            frame_count,
            closing
        );

        Self {
            slots: Rc::new(RefCell::new(FrameSlots {
                frames: vec![None; frame_count],
                progress: LoadingProgress::new(frame_count),
            })),
            mounted: Rc::new(Cell::new(true)),
            spring: Spring::new(config.spring, 0.0),
            surface: SurfaceSize::default(),
            started: false,
            close_requested: closing,
            last_tick: None,
            last_drawn: None,
            needs_redraw: false,
            sequence,
            config,
            playback,
        }
    }

    /// Loading task for this player's frames.
    ///
    /// The future resolves once every frame has settled. Results that
    /// arrive after [`unmount`](Self::unmount) are discarded.
    pub fn load<F>(&self, cache: &ResourceCache<F>) -> impl Future<Output = ()> + 'static
    where
        F: FrameFetcher<Image = I> + 'static,
    {
        let cache = cache.clone();
        let sequence = self.sequence.clone();
        let slots = Rc::clone(&self.slots);
        let mounted = Rc::clone(&self.mounted);

        async move {
            cache
                .load_sequence(&sequence, |index, image| {
                    if !mounted.get() {
                        return;
                    }
                    let mut slots = slots.borrow_mut();
                    slots.frames[index] = image.cloned();
                    slots.progress.record(image.is_some());
                })
                .await;

            if mounted.get() {
                let progress = slots.borrow().progress.clone();
                log::debug!(
                    "frames ready for {} ({} failed of {})",
                    sequence.prefix,
                    progress.failed,
                    progress.total
                );
            }
        }
    }

    #[inline]
    pub fn sequence(&self) -> &ImageSequence {
        &self.sequence
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Snapshot of loading progress.
    pub fn progress(&self) -> LoadingProgress {
        self.slots.borrow().progress.clone()
    }

    /// Whether every frame has settled and playback can run.
    pub fn is_ready(&self) -> bool {
        self.slots.borrow().progress.is_complete()
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Raw (unsmoothed) scrub position.
    #[inline]
    pub fn position(&self) -> f64 {
        self.playback.position()
    }

    /// Smoothed scrub position used for rendering.
    #[inline]
    pub fn display_position(&self) -> f64 {
        self.spring.value()
    }

    /// Frame index for the smoothed position.
    #[inline]
    pub fn current_frame(&self) -> usize {
        frame_for_position(self.spring.value(), self.sequence.frame_count)
    }

    #[inline]
    pub fn last_drawn(&self) -> Option<usize> {
        self.last_drawn
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.playback.direction()
    }

    /// Whether a closing pass is pending.
    #[inline]
    pub fn is_closing(&self) -> bool {
        self.playback.is_closing()
    }

    /// Whether the host's closing request is asserted, completed or not.
    #[inline]
    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    #[inline]
    pub fn surface_size(&self) -> SurfaceSize {
        self.surface
    }

    /// Assert or clear the closing request.
    ///
    /// Asserting plays back toward frame 0 from the current position and
    /// reports completion once. Re-asserting is a no-op, including after the
    /// pass has completed, until the request is cleared. Clearing restarts
    /// the opening pass from frame 0.
    pub fn set_closing(&mut self, closing: bool) {
        if !self.is_mounted() || closing == self.close_requested {
            return;
        }
        self.close_requested = closing;
        log::debug!("player {} closing: {}", self.sequence.prefix, closing);
        if closing {
            self.playback.request_close();
        } else {
            self.playback.play_forward();
            self.spring.jump(0.0);
            self.needs_redraw = true;
        }
        // Re-establish the time base on the next tick
        self.last_tick = None;
    }

    /// Apply a horizontal drag of `dx` pixels.
    pub fn drag(&mut self, dx: f64) {
        if !self.is_mounted() {
            return;
        }
        self.playback.drag(dx, self.config.drag_sensitivity);
        log::trace!("drag {} -> position {}", dx, self.playback.position());
    }

    /// Track the container's size, redrawing the current frame.
    pub fn resize<S>(&mut self, size: SurfaceSize, surface: &mut S) -> Option<usize>
    where
        S: FrameSurface<I> + ?Sized,
    {
        if !self.is_mounted() || size == self.surface {
            return None;
        }
        self.surface = size;
        if let Err(err) = surface.resize(&size) {
            log::warn!("failed to resize surface: {}", err);
            return None;
        }
        self.needs_redraw = true;
        if self.started {
            self.render(surface)
        } else {
            None
        }
    }

    /// Advance playback to `now_ms` and draw the frame for the new position.
    ///
    /// Elapsed time is measured from the previous tick, so playback speed
    /// doesn't depend on the host's refresh rate.
    pub fn tick<S>(&mut self, now_ms: f64, surface: &mut S) -> TickOutcome
    where
        S: FrameSurface<I> + ?Sized,
    {
        if !self.is_mounted() {
            return TickOutcome::default();
        }
        if !self.is_ready() {
            self.last_tick = None;
            return TickOutcome::default();
        }

        if !self.started {
            self.started = true;
            self.needs_redraw = true;
            if !self.playback.is_closing() {
                self.playback.play_forward();
                self.spring.jump(0.0);
            }
            log::debug!("starting playback for {}", self.sequence.prefix);
        }

        let elapsed = match self.last_tick {
            Some(prev) if now_ms.is_finite() => ((now_ms - prev) / 1000.0).max(0.0),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_tick = Some(now_ms);
        }

        let exit_complete = match self.playback.advance(elapsed) {
            Advance::Closed => {
                log::debug!("closing pass finished for {}", self.sequence.prefix);
                true
            }
            Advance::Opened => {
                log::debug!("opening pass finished for {}", self.sequence.prefix);
                false
            }
            Advance::Moving | Advance::Idle => false,
        };

        self.spring.set_target(self.playback.position());
        self.spring.step_clamped(
            elapsed.min(MAX_SMOOTHING_STEP),
            0.0,
            self.sequence.last_index() as f64,
        );

        TickOutcome {
            drawn: self.render(surface),
            exit_complete,
        }
    }

    /// Stop all updates. In-flight loads no longer touch this player.
    pub fn unmount(&mut self) {
        if self.mounted.replace(false) {
            log::debug!("unmounting player for {}", self.sequence.prefix);
        }
        self.playback.hold();
        self.last_tick = None;
    }

    fn render<S>(&mut self, surface: &mut S) -> Option<usize>
    where
        S: FrameSurface<I> + ?Sized,
    {
        let index = self.current_frame();
        if !self.needs_redraw && self.last_drawn == Some(index) {
            return None;
        }

        let slots = self.slots.borrow();
        // Failed frames are skipped; the previous frame stays on screen.
        let image = slots.frames.get(index)?.as_ref()?;
        let plan = RenderPlan::for_image(index, image, &self.surface)?;
        match surface.draw(image, &plan) {
            Ok(()) => {
                self.last_drawn = Some(index);
                self.needs_redraw = false;
                Some(index)
            }
            Err(err) => {
                log::warn!("failed to draw frame {}: {}", index, err);
                None
            }
        }
    }
}

impl<I> Drop for SequencePlayer<I> {
    fn drop(&mut self) {
        self.mounted.set(false);
    }
}
