//! The heartbeat actuator.
//!
//! Each firing of the actuator either contracts or relaxes every spring of a `ParticleSystem`, alternating between the
//! two. The actuator does not own a clock; the `driver` decides when it fires, every `interval_ms` milliseconds.

use crate::{
    config::{HeartConfig, HeartMode},
    physics::ParticleSystem,
    utils::Real,
    MssError,
};

/// The two phases of a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Rest lengths are shortened.
    Contract,
    /// Rest lengths are lengthened.
    Relax,
}

/// The state machine driving the contraction of a heart mesh.
///
/// A stopped `Heartbeat` ignores firings. A running one alternates between `Phase::Contract` and `Phase::Relax`,
/// always starting with a contraction, and counts its firings. In pump-once mode it stops itself after a full
/// contract-relax cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Heartbeat<T: Real> {
    /// Deltas, rate and mode.
    config: HeartConfig<T>,
    /// Whether firings are applied.
    running: bool,
    /// Whether the last firing was a contraction.
    contracted: bool,
    /// The number of firings since the last start.
    beats_count: u64,
    /// The beat count at which to stop, when pumping once.
    pump_until: Option<u64>,
}

impl<T: Real> Heartbeat<T> {
    /// Creates a stopped `Heartbeat`.
    ///
    /// # Errors
    ///
    /// * See `HeartConfig::validate`.
    pub fn new(config: HeartConfig<T>) -> Result<Self, MssError> {
        config.validate()?;
        Ok(Self {
            config,
            running: false,
            contracted: false,
            beats_count: 0,
            pump_until: None,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &HeartConfig<T> {
        &self.config
    }

    /// Replace the configuration. A running `Heartbeat` keeps its phase and count.
    ///
    /// # Errors
    ///
    /// * See `HeartConfig::validate`.
    pub fn set_config(&mut self, config: HeartConfig<T>) -> Result<(), MssError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The time between two firings, in milliseconds.
    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.config.interval_ms()
    }

    /// Whether the `Heartbeat` is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the next firing is a contraction.
    #[must_use]
    pub const fn next_phase(&self) -> Phase {
        if self.contracted {
            Phase::Relax
        } else {
            Phase::Contract
        }
    }

    /// The number of firings since the last start.
    #[must_use]
    pub const fn beats_count(&self) -> u64 {
        self.beats_count
    }

    /// Whether the `Heartbeat` will stop itself after the current cycle.
    #[must_use]
    pub const fn is_pumping_once(&self) -> bool {
        self.pump_until.is_some()
    }

    /// Start beating indefinitely. Does nothing to the phase or count if already running.
    pub fn start(&mut self) {
        if !self.running {
            ftlog::debug!("Heartbeat started at {} bpm", self.config.rate);
        }
        self.running = true;
        self.pump_until = None;
    }

    /// Stop beating, resetting the phase to contraction and the count to zero.
    pub fn stop(&mut self) {
        if self.running {
            ftlog::debug!("Heartbeat stopped after {} firings", self.beats_count);
        }
        self.running = false;
        self.contracted = false;
        self.beats_count = 0;
        self.pump_until = None;
    }

    /// Beat through one full cycle and then stop.
    ///
    /// A stopped `Heartbeat` starts from contraction and stops after two firings. A running one finishes its current
    /// cycle, if any, and then runs one more full cycle.
    pub fn pump_once(&mut self) {
        let target = if self.running {
            let next = self.beats_count + 2;
            next + next % 2
        } else {
            self.running = true;
            self.contracted = false;
            self.beats_count = 0;
            2
        };
        ftlog::debug!("Pumping once, stopping at firing {target}");
        self.pump_until = Some(target);
    }

    /// Fire once, changing the rest lengths of every spring in `system`.
    ///
    /// Returns the phase that was applied, or `None` if the `Heartbeat` is stopped.
    ///
    /// # Errors
    ///
    /// * If the system rejects the delta. This cannot happen with a validated configuration.
    pub fn fire(&mut self, system: &mut ParticleSystem<T>) -> Result<Option<Phase>, MssError> {
        if !self.running {
            return Ok(None);
        }

        let phase = self.next_phase();
        let c = &self.config;
        match (phase, c.mode) {
            (Phase::Contract, HeartMode::Homogeneous) => system.add_spring_rest_length_homogeneous(c.homo_dec)?,
            (Phase::Contract, HeartMode::Heterogeneous) => system.add_spring_rest_length(c.dec)?,
            (Phase::Relax, HeartMode::Homogeneous) => system.add_spring_rest_length_homogeneous(c.homo_inc)?,
            (Phase::Relax, HeartMode::Heterogeneous) => system.add_spring_rest_length(c.inc)?,
        }

        self.contracted = !self.contracted;
        self.beats_count += 1;
        ftlog::debug!("Heartbeat {phase:?}, firing {}", self.beats_count);

        if self.pump_until == Some(self.beats_count) {
            ftlog::info!("Pumped once, heartbeat stopping");
            self.stop();
        }
        Ok(Some(phase))
    }
}
