//! Second-order spring filter used to smooth the scrub position.
//!
//! The filter chases a moving target the way a damped mass on a spring
//! would, so discrete jumps in the target (playback ticks, drag events)
//! come out as continuous motion.

/// Spring parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance from the target below which the spring may settle
    pub rest_delta: f64,
    /// Speed below which the spring may settle
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 200.0,
            damping: 50.0,
            mass: 1.0,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    /// A critically damped spring for the given stiffness (unit mass).
    pub fn critically_damped(stiffness: f64) -> Self {
        let stiffness = stiffness.max(f64::EPSILON);
        Self {
            stiffness,
            damping: 2.0 * stiffness.sqrt(),
            ..Self::default()
        }
    }

    /// `damping / (2 * sqrt(stiffness * mass))`; 1.0 is critical.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Integration step cap in seconds; long frames are subdivided.
const MAX_STEP: f64 = 1.0 / 240.0;

/// A spring-smoothed scalar.
///
/// ```rust
/// use showcase_core_view::{Spring, SpringConfig};
///
/// let mut spring = Spring::new(SpringConfig::default(), 0.0);
/// spring.set_target(10.0);
/// let first = spring.step(1.0 / 60.0);
/// assert!(first > 0.0 && first < 10.0);
/// for _ in 0..600 {
///     spring.step(1.0 / 60.0);
/// }
/// assert_eq!(spring.value(), 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Move value and target to `value` without animating.
    pub fn jump(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Whether the spring has come to rest on its target.
    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance the simulation by `dt` seconds and return the new value.
    pub fn step(&mut self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 || self.is_settled() {
            return self.value;
        }

        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        let mass = mass.max(f64::EPSILON);

        let steps = (dt / MAX_STEP).ceil().max(1.0) as usize;
        let h = dt / steps as f64;
        for _ in 0..steps {
            // Semi-implicit Euler keeps the overdamped default stable.
            let displacement = self.value - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }

        if (self.value - self.target).abs() <= self.config.rest_delta
            && self.velocity.abs() <= self.config.rest_speed
        {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }

    /// Like [`Spring::step`] but keeps the output inside `[lo, hi]`.
    ///
    /// Velocity pointing out of the range is zeroed at the bound.
    pub fn step_clamped(&mut self, dt: f64, lo: f64, hi: f64) -> f64 {
        self.step(dt);
        if self.value < lo {
            self.value = lo;
            self.velocity = self.velocity.max(0.0);
        } else if self.value > hi {
            self.value = hi;
            self.velocity = self.velocity.min(0.0);
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_overdamped() {
        assert!(SpringConfig::default().damping_ratio() > 1.0);
        let critical = SpringConfig::critically_damped(200.0);
        assert!((critical.damping_ratio() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut spring = Spring::new(SpringConfig::critically_damped(200.0), 0.0);
        spring.set_target(50.0);
        let mut prev = 0.0;
        for _ in 0..240 {
            let v = spring.step(1.0 / 60.0);
            assert!(v >= prev, "spring went backwards: {} < {}", v, prev);
            assert!(v <= 50.0);
            prev = v;
        }
        assert_eq!(spring.value(), 50.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut spring = Spring::new(SpringConfig::default(), 3.0);
        spring.set_target(9.0);
        assert_eq!(spring.step(0.0), 3.0);
        assert_eq!(spring.step(-1.0), 3.0);
        assert_eq!(spring.step(f64::NAN), 3.0);
    }

    #[test]
    fn test_jump_resets_motion() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(10.0);
        spring.step(0.05);
        spring.jump(2.0);
        assert_eq!(spring.value(), 2.0);
        assert_eq!(spring.target(), 2.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_large_dt_is_stable() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(126.0);
        let v = spring.step(2.0);
        assert!(v.is_finite());
        assert!(v <= 126.0 + 1e-9);
    }

    #[test]
    fn test_step_clamped_respects_bounds() {
        let mut spring = Spring::new(SpringConfig::critically_damped(5000.0), 0.0);
        spring.set_target(20.0);
        for _ in 0..100 {
            let v = spring.step_clamped(1.0 / 30.0, 0.0, 4.0);
            assert!((0.0..=4.0).contains(&v));
        }
        assert_eq!(spring.value(), 4.0);
    }
}
