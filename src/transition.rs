//! Enter/exit descriptors for view changes.
//!
//! The coordinator doesn't animate anything itself. Presentation layers ask
//! for the [`ViewTransition`] of the view being mounted or unmounted and
//! sample it over time.

use std::time::Duration;

use crate::View;

/// The kind of view, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Overview,
    Auxiliary,
    ItemDetail,
}

impl From<&View> for ViewKind {
    fn from(view: &View) -> Self {
        match view {
            View::Overview => ViewKind::Overview,
            View::Auxiliary => ViewKind::Auxiliary,
            View::ItemDetail(_) => ViewKind::ItemDetail,
        }
    }
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// Fast start, long soft landing. Used by every view transition.
    pub const EASE_OUT_EXPO: CubicBezier = CubicBezier::new(0.16, 1.0, 0.3, 1.0);
    pub const LINEAR: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

    const NEWTON_ITERATIONS: usize = 8;
    const EPSILON: f64 = 1e-7;

    /// `x1` and `x2` are treated as clamped to `[0, 1]` when easing.
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased progress for linear progress `t` in `[0, 1]`.
    ///
    /// ```rust
    /// use showcase_core_view::CubicBezier;
    ///
    /// let ease = CubicBezier::EASE_OUT_EXPO;
    /// assert_eq!(ease.ease(0.0), 0.0);
    /// assert_eq!(ease.ease(1.0), 1.0);
    /// assert!(ease.ease(0.5) > 0.95);
    /// ```
    pub fn ease(&self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let u = self.solve_x(t);
        Self::sample(u, self.y1, self.y2)
    }

    // Bernstein form with P0 = 0 and P3 = 1.
    fn sample(u: f64, p1: f64, p2: f64) -> f64 {
        let inv = 1.0 - u;
        3.0 * inv * inv * u * p1 + 3.0 * inv * u * u * p2 + u * u * u
    }

    fn slope(u: f64, p1: f64, p2: f64) -> f64 {
        let inv = 1.0 - u;
        3.0 * inv * inv * p1 + 6.0 * inv * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
    }

    /// Curve parameter whose x equals `x`.
    fn solve_x(&self, x: f64) -> f64 {
        let (x1, x2) = (self.x1.clamp(0.0, 1.0), self.x2.clamp(0.0, 1.0));
        let mut u = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let err = Self::sample(u, x1, x2) - x;
            if err.abs() < Self::EPSILON {
                return u;
            }
            let d = Self::slope(u, x1, x2);
            if d.abs() < 1e-6 {
                break;
            }
            u -= err / d;
        }

        // Newton stalled; x(u) is monotonic so bisection always converges.
        let (mut lo, mut hi) = (0.0, 1.0);
        u = x;
        while hi - lo > Self::EPSILON {
            if Self::sample(u, x1, x2) < x {
                lo = u;
            } else {
                hi = u;
            }
            u = (lo + hi) / 2.0;
        }
        u
    }
}

/// Opacity and scale of a view at one end of a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub opacity: f64,
    pub scale: f64,
}

impl Keyframe {
    pub const VISIBLE: Keyframe = Keyframe {
        opacity: 1.0,
        scale: 1.0,
    };

    pub const fn hidden(scale: f64) -> Self {
        Self {
            opacity: 0.0,
            scale,
        }
    }

    pub fn lerp(&self, to: &Keyframe, t: f64) -> Keyframe {
        Keyframe {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }
}

/// How a view fades and scales in and out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransition {
    /// State when mounting starts
    pub initial: Keyframe,
    /// Resting state
    pub visible: Keyframe,
    /// State when unmounting finishes
    pub exit: Keyframe,
    pub duration: Duration,
    pub easing: CubicBezier,
}

impl ViewTransition {
    pub fn for_view(kind: ViewKind) -> Self {
        match kind {
            ViewKind::Overview => Self {
                initial: Keyframe::hidden(0.9),
                visible: Keyframe::VISIBLE,
                exit: Keyframe::hidden(1.1),
                duration: Duration::from_millis(750),
                easing: CubicBezier::EASE_OUT_EXPO,
            },
            ViewKind::Auxiliary => Self {
                initial: Keyframe::hidden(0.95),
                visible: Keyframe::VISIBLE,
                exit: Keyframe::hidden(1.05),
                duration: Duration::from_millis(650),
                easing: CubicBezier::EASE_OUT_EXPO,
            },
            // The frame sequence carries the motion; the container only fades.
            ViewKind::ItemDetail => Self {
                initial: Keyframe::hidden(1.0),
                visible: Keyframe::VISIBLE,
                exit: Keyframe::hidden(1.0),
                duration: Duration::from_millis(500),
                easing: CubicBezier::EASE_OUT_EXPO,
            },
        }
    }

    fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.easing
            .ease(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Keyframe `elapsed` into the enter animation.
    pub fn enter_at(&self, elapsed: Duration) -> Keyframe {
        self.initial.lerp(&self.visible, self.progress(elapsed))
    }

    /// Keyframe `elapsed` into the exit animation.
    pub fn exit_at(&self, elapsed: Duration) -> Keyframe {
        self.visible.lerp(&self.exit, self.progress(elapsed))
    }

    /// Whether an animation started `elapsed` ago has finished.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_linear_is_identity() {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!(approx(CubicBezier::LINEAR.ease(t), t, 1e-6));
        }
    }

    #[test]
    fn test_ease_out_expo_front_loads() {
        let ease = CubicBezier::EASE_OUT_EXPO;
        assert!(approx(ease.ease(0.1), 0.4944, 1e-3));
        assert!(approx(ease.ease(0.25), 0.8256, 1e-3));
        assert!(approx(ease.ease(0.5), 0.9718, 1e-3));
    }

    #[test]
    fn test_ease_is_monotonic_and_clamped() {
        let ease = CubicBezier::EASE_OUT_EXPO;
        let mut last = 0.0;
        for i in 0..=100 {
            let y = ease.ease(i as f64 / 100.0);
            assert!(y >= last - 1e-9);
            last = y;
        }
        assert_eq!(ease.ease(-1.0), 0.0);
        assert_eq!(ease.ease(2.0), 1.0);
        assert_eq!(ease.ease(f64::NAN), 0.0);
    }

    #[test]
    fn test_overview_transition() {
        let t = ViewTransition::for_view(ViewKind::Overview);
        assert_eq!(t.duration, Duration::from_millis(750));
        assert_eq!(t.enter_at(Duration::ZERO), Keyframe::hidden(0.9));
        assert_eq!(t.enter_at(t.duration), Keyframe::VISIBLE);
        assert_eq!(t.exit_at(t.duration), Keyframe::hidden(1.1));
    }

    #[test]
    fn test_auxiliary_scales_less() {
        let t = ViewTransition::for_view(ViewKind::Auxiliary);
        assert_eq!(t.initial.scale, 0.95);
        assert_eq!(t.exit.scale, 1.05);
        let mid = t.enter_at(Duration::from_millis(325));
        assert!(mid.opacity > 0.9 && mid.opacity < 1.0);
        assert!(!t.is_finished(Duration::from_millis(600)));
        assert!(t.is_finished(Duration::from_millis(650)));
    }

    #[test]
    fn test_item_detail_only_fades() {
        let view = View::ItemDetail("stm32".into());
        let t = ViewTransition::for_view(ViewKind::from(&view));
        assert_eq!(t.duration, Duration::from_millis(500));
        let halfway = t.exit_at(Duration::from_millis(250));
        assert_eq!(halfway.scale, 1.0);
        assert!(halfway.opacity < 0.1);
    }
}
