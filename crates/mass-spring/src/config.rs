//! Configuration values for the simulation, the heartbeat actuator and the driver clock.
//!
//! Every struct here derives `serde` traits with `#[serde(default)]` so a partial configuration file only needs to
//! name the values it changes.

use serde::{Deserialize, Serialize};

use crate::{
    utils::{vector, Real, Vector},
    MssError,
};

/// Linear velocity damping, `kd = b + a * |v|` above `v_thresh`, otherwise `kd = b`, clamped to `kd_max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearDamping<T: Real> {
    /// Growth of the damping coefficient with speed, applied above `v_thresh`.
    pub a: T,
    /// Base damping coefficient.
    pub b: T,
    /// Speed above which `a` contributes.
    pub v_thresh: T,
    /// Upper bound on the damping coefficient.
    pub kd_max: T,
}

impl<T: Real> Default for LinearDamping<T> {
    fn default() -> Self {
        Self {
            a: T::one(),
            b: T::from_f64_lossy(0.0001),
            v_thresh: T::from_f64_lossy(20.0),
            kd_max: T::from_f64_lossy(0.65),
        }
    }
}

impl<T: Real> LinearDamping<T> {
    /// Damping that leaves velocities untouched.
    #[must_use]
    pub fn none() -> Self {
        Self {
            a: T::zero(),
            b: T::zero(),
            v_thresh: T::zero(),
            kd_max: T::zero(),
        }
    }

    /// Returns the damping coefficient for the given speed.
    #[must_use]
    pub fn coefficient(&self, speed: T) -> T {
        let kd = if speed > self.v_thresh { self.b + self.a * speed } else { self.b };
        kd.min(self.kd_max)
    }

    /// Removes the fraction `kd` of the velocity, `v -= v * kd`.
    pub fn apply(&self, velocity: &mut Vector<T>) {
        let kd = self.coefficient(vector::norm(velocity));
        let loss = vector::scale(velocity, kd);
        for (v, l) in velocity.iter_mut().zip(loss) {
            *v -= l;
        }
    }

    /// Checks that every attribute is finite.
    ///
    /// # Errors
    ///
    /// * If any attribute is `NaN` or infinite.
    pub fn validate(&self) -> Result<(), MssError> {
        if [self.a, self.b, self.v_thresh, self.kd_max].iter().all(|x| x.is_finite()) {
            Ok(())
        } else {
            Err(MssError::invalid(format!("damping attributes must be finite: {self:?}")))
        }
    }
}

/// The physical parameters of a `ParticleSystem`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig<T: Real> {
    /// Constant acceleration applied to every particle.
    pub gravity: Vector<T>,
    /// Fraction of velocity kept after a ground collision, in `[0, 1]`.
    pub bounce_energy_loss_ratio: T,
    /// Linear damping attributes.
    pub damping: LinearDamping<T>,
    /// Height of the ground plane.
    pub ground_y: T,
    /// Mass broadcast to every particle.
    pub particle_mass: T,
    /// Stiffness broadcast to every spring.
    pub spring_stiffness: T,
    /// Rest length broadcast to every spring of a hard-coded mesh.
    pub spring_rest_length: T,
}

impl<T: Real> Default for SystemConfig<T> {
    fn default() -> Self {
        Self {
            gravity: [T::zero(), T::from_f64_lossy(-9.8), T::zero()],
            bounce_energy_loss_ratio: T::from_f64_lossy(0.95),
            damping: LinearDamping::default(),
            ground_y: T::zero(),
            particle_mass: T::one(),
            spring_stiffness: T::from_f64_lossy(20.0),
            spring_rest_length: T::from_f64_lossy(25.0),
        }
    }
}

impl<T: Real> SystemConfig<T> {
    /// Checks the configuration against the invariants of the particle system.
    ///
    /// # Errors
    ///
    /// * If the gravity or ground height is not finite.
    /// * If the bounce ratio is outside `[0, 1]`.
    /// * If the damping attributes are not finite.
    /// * If the mass is not positive, or the stiffness or rest length is negative.
    pub fn validate(&self) -> Result<(), MssError> {
        if !vector::is_finite(&self.gravity) || !self.ground_y.is_finite() {
            return Err(MssError::invalid("gravity and ground height must be finite"));
        }
        validate_ratio(self.bounce_energy_loss_ratio)?;
        self.damping.validate()?;
        validate_mass(self.particle_mass)?;
        validate_non_negative("stiffness", self.spring_stiffness)?;
        validate_non_negative("rest length", self.spring_rest_length)
    }
}

/// Whether the heartbeat changes rest lengths by an absolute amount or proportionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeartMode {
    /// Every spring changes by `(1 + ratio)` or `1 / (1 - ratio)`, preserving length ratios.
    #[default]
    Homogeneous,
    /// Every spring changes by the same absolute delta.
    Heterogeneous,
}

/// Parameters of the heartbeat actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartConfig<T: Real> {
    /// Absolute rest-length delta applied when relaxing.
    pub inc: T,
    /// Absolute rest-length delta applied when contracting. Signed; negative shortens.
    pub dec: T,
    /// Proportional rest-length ratio applied when relaxing.
    pub homo_inc: T,
    /// Proportional rest-length ratio applied when contracting. Signed; negative shortens.
    pub homo_dec: T,
    /// Heart rate in beats per minute.
    pub rate: T,
    /// How the rest lengths are changed.
    pub mode: HeartMode,
}

impl<T: Real> Default for HeartConfig<T> {
    fn default() -> Self {
        Self {
            inc: T::from_f64_lossy(0.5),
            dec: T::from_f64_lossy(-0.5),
            homo_inc: T::from_f64_lossy(0.079_605),
            homo_dec: T::from_f64_lossy(-0.079_605),
            rate: T::from_f64_lossy(60.0),
            mode: HeartMode::Homogeneous,
        }
    }
}

impl<T: Real> HeartConfig<T> {
    /// Returns the firing interval of the actuator in milliseconds, `(60 / rate) * 500`.
    ///
    /// This is half of a cardiac period, because the contract and relax phases each take one firing. The value is
    /// truncated to whole milliseconds, like a millisecond timer would.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn interval_ms(&self) -> u64 {
        let interval = 60.0 / self.rate.as_f64() * 500.0;
        interval.max(1.0) as u64
    }

    /// Checks the heartbeat parameters.
    ///
    /// # Errors
    ///
    /// * If the rate is not a positive finite number.
    /// * If any delta or ratio is not finite.
    pub fn validate(&self) -> Result<(), MssError> {
        if !(self.rate.is_finite() && self.rate > T::zero()) {
            return Err(MssError::invalid(format!("heart rate must be positive, got {}", self.rate)));
        }
        if ![self.inc, self.dec, self.homo_inc, self.homo_dec].iter().all(|x| x.is_finite()) {
            return Err(MssError::invalid("heart deltas must be finite"));
        }
        Ok(())
    }
}

/// Cadence of the physics timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Milliseconds between two physics steps.
    pub step_interval_ms: u64,
    /// Simulated seconds advanced by one physics step.
    pub dt: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        // 1000 / 16 ~ 62 frames per second.
        Self {
            step_interval_ms: 16,
            dt: 0.016,
        }
    }
}

impl TimingConfig {
    /// Checks the cadence.
    ///
    /// # Errors
    ///
    /// * If the interval is zero or the time step is not a positive finite number.
    pub fn validate(&self) -> Result<(), MssError> {
        if self.step_interval_ms == 0 {
            return Err(MssError::invalid("step interval must be at least 1 ms"));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(MssError::invalid(format!("time step must be positive, got {}", self.dt)));
        }
        Ok(())
    }
}

/// Everything needed to configure a `Simulation`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig<T: Real> {
    /// Physical parameters.
    pub system: SystemConfig<T>,
    /// Heartbeat parameters.
    pub heart: HeartConfig<T>,
    /// Physics timer cadence.
    pub timing: TimingConfig,
}

impl<T: Real> SimulationConfig<T> {
    /// Validates every part of the configuration.
    ///
    /// # Errors
    ///
    /// * See `SystemConfig::validate`, `HeartConfig::validate` and `TimingConfig::validate`.
    pub fn validate(&self) -> Result<(), MssError> {
        self.system.validate()?;
        self.heart.validate()?;
        self.timing.validate()
    }
}

/// Checks that a mass is positive and finite.
pub(crate) fn validate_mass<T: Real>(mass: T) -> Result<(), MssError> {
    if mass.is_finite() && mass > T::zero() {
        Ok(())
    } else {
        Err(MssError::invalid(format!("particle mass must be positive, got {mass}")))
    }
}

/// Checks that a ratio lies in `[0, 1]`.
pub(crate) fn validate_ratio<T: Real>(ratio: T) -> Result<(), MssError> {
    if ratio >= T::zero() && ratio <= T::one() {
        Ok(())
    } else {
        Err(MssError::invalid(format!("bounce energy loss ratio must be in [0, 1], got {ratio}")))
    }
}

/// Checks that a named scalar is finite and not negative.
pub(crate) fn validate_non_negative<T: Real>(name: &str, value: T) -> Result<(), MssError> {
    if value.is_finite() && value >= T::zero() {
        Ok(())
    } else {
        Err(MssError::invalid(format!("spring {name} must be non-negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn defaults() {
        let c = SimulationConfig::<f64>::default();
        assert_eq!(c.system.gravity, [0.0, -9.8, 0.0]);
        assert_eq!(c.system.bounce_energy_loss_ratio, 0.95);
        assert_eq!(c.system.damping.kd_max, 0.65);
        assert_eq!(c.heart.mode, HeartMode::Homogeneous);
        assert_eq!(c.heart.interval_ms(), 500);
        assert_eq!(c.timing.step_interval_ms, 16);
        assert!(c.validate().is_ok());
    }

    #[test_case(60.0, 500; "sixty")]
    #[test_case(120.0, 250; "one_twenty")]
    #[test_case(70.0, 428; "seventy_truncates")]
    #[test_case(30.0, 1000; "thirty")]
    fn heart_interval(rate: f64, expected: u64) {
        let c = HeartConfig { rate, ..HeartConfig::default() };
        assert_eq!(c.interval_ms(), expected);
    }

    #[test_case(0.0, 0.0001; "at_rest_base_only")]
    #[test_case(20.0, 0.0001; "at_threshold_base_only")]
    #[test_case(0.1, 0.0001; "slow")]
    #[test_case(30.0, 0.65; "fast_clamped")]
    fn damping_coefficient(speed: f64, expected: f64) {
        let d = LinearDamping::<f64>::default();
        assert_eq!(d.coefficient(speed), expected);
    }

    #[test]
    fn damping_grows_between_threshold_and_clamp() {
        let d = LinearDamping::<f64> { a: 0.01, b: 0.1, v_thresh: 5.0, kd_max: 1.0 };
        assert!((d.coefficient(10.0) - 0.2).abs() < 1e-12);
    }

    #[test_case(-0.1; "negative")]
    #[test_case(1.5; "above_one")]
    fn bad_ratio(ratio: f64) {
        let c = SystemConfig { bounce_energy_loss_ratio: ratio, ..SystemConfig::default() };
        assert!(matches!(c.validate(), Err(MssError::InvalidConfiguration(_))));
    }

    #[test]
    fn bad_heart_rate() {
        let c = HeartConfig { rate: 0.0, ..HeartConfig::<f32>::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn partial_config_from_json() -> Result<(), String> {
        let json = r#"{ "heart": { "rate": 120.0, "mode": "heterogeneous" }, "timing": { "dt": 0.01 } }"#;
        let c: SimulationConfig<f64> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        assert_eq!(c.heart.rate, 120.0);
        assert_eq!(c.heart.mode, HeartMode::Heterogeneous);
        assert_eq!(c.heart.inc, 0.5);
        assert_eq!(c.timing.dt, 0.01);
        assert_eq!(c.timing.step_interval_ms, 16);
        assert_eq!(c.system, SystemConfig::default());
        Ok(())
    }
}
