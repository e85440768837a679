//! A cooperative event loop driving a `ParticleSystem` and its `Heartbeat`.
//!
//! Two periodic timers share one virtual millisecond clock: the physics timer advances the system by one step and
//! publishes the new positions to a `FrameSink`, and the heart timer fires the actuator. Firings are processed one at
//! a time in timestamp order, so nothing here runs concurrently.

mod timer;

pub use timer::Timer;

use crate::{
    config::{HeartConfig, TimingConfig},
    heart::{Heartbeat, Phase},
    physics::ParticleSystem,
    utils::{Real, Vector},
    MssError,
};

/// Receives the particle positions after every physics step.
pub trait FrameSink<T: Real> {
    /// Publishes one frame.
    ///
    /// # Arguments
    ///
    /// - `frame`: The number of steps taken so far, starting at 1.
    /// - `time_ms`: The virtual time of the step.
    /// - `positions`: The position of every particle.
    ///
    /// # Errors
    ///
    /// * If the frame could not be published.
    fn publish(&mut self, frame: u64, time_ms: u64, positions: &[Vector<T>]) -> Result<(), MssError>;
}

/// A published frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<T: Real> {
    /// The number of steps taken when the frame was published.
    pub index: u64,
    /// The virtual time of the frame.
    pub time_ms: u64,
    /// The position of every particle.
    pub positions: Vec<Vector<T>>,
}

/// A `FrameSink` that keeps every frame in memory.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder<T: Real> {
    /// The recorded frames, oldest first.
    frames: Vec<Frame<T>>,
}

impl<T: Real> FrameRecorder<T> {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Get the recorded frames.
    #[must_use]
    pub fn frames(&self) -> &[Frame<T>] {
        &self.frames
    }

    /// Get the last recorded frame.
    #[must_use]
    pub fn last(&self) -> Option<&Frame<T>> {
        self.frames.last()
    }
}

impl<T: Real> FrameSink<T> for FrameRecorder<T> {
    fn publish(&mut self, frame: u64, time_ms: u64, positions: &[Vector<T>]) -> Result<(), MssError> {
        self.frames.push(Frame {
            index: frame,
            time_ms,
            positions: positions.to_vec(),
        });
        Ok(())
    }
}

/// Something that happened while running a `Simulation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The physics timer fired.
    Step,
    /// The heart timer fired and applied the given phase.
    Beat(Phase),
}

/// A `ParticleSystem` and its `Heartbeat`, driven by two timers on a virtual clock.
#[derive(Debug, Clone)]
pub struct Simulation<T: Real> {
    /// The system being simulated.
    system: ParticleSystem<T>,
    /// The actuator.
    heart: Heartbeat<T>,
    /// Fires the physics steps.
    step_timer: Timer,
    /// Fires the heartbeat.
    heart_timer: Timer,
    /// Simulated seconds per step.
    dt: T,
    /// The virtual clock, in milliseconds.
    now_ms: u64,
    /// The number of steps taken.
    frames: u64,
    /// Kinetic, potential and total energy after each step.
    logs: Vec<[T; 3]>,
}

impl<T: Real> Simulation<T> {
    /// Creates a `Simulation` with both timers stopped and the clock at zero.
    ///
    /// # Errors
    ///
    /// * If `heart` or `timing` is invalid.
    pub fn new(system: ParticleSystem<T>, heart: HeartConfig<T>, timing: TimingConfig) -> Result<Self, MssError> {
        timing.validate()?;
        let heart = Heartbeat::new(heart)?;
        let heart_timer = Timer::new(heart.interval_ms());
        Ok(Self {
            system,
            heart,
            step_timer: Timer::new(timing.step_interval_ms),
            heart_timer,
            dt: T::from_f64_lossy(timing.dt),
            now_ms: 0,
            frames: 0,
            logs: Vec::new(),
        })
    }

    /// Get the system.
    #[must_use]
    pub const fn system(&self) -> &ParticleSystem<T> {
        &self.system
    }

    /// Get the system mutably, e.g. to change its attributes between runs.
    pub fn system_mut(&mut self) -> &mut ParticleSystem<T> {
        &mut self.system
    }

    /// Get the actuator.
    #[must_use]
    pub const fn heart(&self) -> &Heartbeat<T> {
        &self.heart
    }

    /// Replace the heartbeat parameters. A new rate takes effect the next time the heart is started.
    ///
    /// # Errors
    ///
    /// * See `HeartConfig::validate`.
    pub fn set_heart_config(&mut self, config: HeartConfig<T>) -> Result<(), MssError> {
        self.heart.set_config(config)
    }

    /// The current virtual time, in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// The number of steps taken.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Kinetic, potential and total energy after each step.
    #[must_use]
    pub fn logs(&self) -> &[[T; 3]] {
        &self.logs
    }

    /// Whether the physics timer is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.step_timer.is_active()
    }

    /// Whether the heart timer is running.
    #[must_use]
    pub const fn is_beating(&self) -> bool {
        self.heart_timer.is_active()
    }

    /// Start the physics timer. The first step happens one interval from now.
    pub fn start(&mut self) {
        self.step_timer.start(self.now_ms);
    }

    /// Stop the physics timer.
    pub fn stop(&mut self) {
        self.step_timer.stop();
    }

    /// Start the heart beating indefinitely, with the interval derived from the current rate.
    pub fn start_heart(&mut self) {
        self.heart.start();
        self.restart_heart_timer();
    }

    /// Stop the heart and reset it to contraction.
    pub fn stop_heart(&mut self) {
        self.heart.stop();
        self.heart_timer.stop();
    }

    /// Beat through one full cycle and then stop.
    pub fn pump_once(&mut self) {
        self.heart.pump_once();
        if !self.heart_timer.is_active() {
            self.restart_heart_timer();
        }
    }

    /// Re-read the interval and start the heart timer from now.
    fn restart_heart_timer(&mut self) {
        self.heart_timer.set_interval_ms(self.heart.interval_ms());
        self.heart_timer.start(self.now_ms);
    }

    /// Advance the system by one step and publish the new positions, regardless of the timers.
    ///
    /// # Errors
    ///
    /// * If the sink fails to publish the frame.
    pub fn step<S: FrameSink<T>>(&mut self, sink: &mut S) -> Result<(), MssError> {
        self.system.advance(self.dt);
        self.frames += 1;

        let kinetic = self.system.kinetic_energy();
        let potential = self.system.potential_energy();
        self.logs.push([kinetic, potential, kinetic + potential]);

        sink.publish(self.frames, self.now_ms, self.system.vertices())
    }

    /// Fire the heart once, regardless of the timers. Stops the heart timer if the heart stopped itself.
    ///
    /// # Errors
    ///
    /// * See `Heartbeat::fire`.
    pub fn beat(&mut self) -> Result<Option<Phase>, MssError> {
        let phase = self.heart.fire(&mut self.system)?;
        if !self.heart.is_running() {
            self.heart_timer.stop();
        }
        Ok(phase)
    }

    /// Process the next due firing no later than `end_ms`, moving the clock to it.
    ///
    /// When both timers are due at the same time, the physics step goes first.
    ///
    /// # Errors
    ///
    /// * If a step or a beat fails.
    pub fn next_event<S: FrameSink<T>>(&mut self, end_ms: u64, sink: &mut S) -> Result<Option<Event>, MssError> {
        let step_at = self.step_timer.next_due_ms().filter(|&t| t <= end_ms);
        let beat_at = self.heart_timer.next_due_ms().filter(|&t| t <= end_ms);

        let (at, is_beat) = match (step_at, beat_at) {
            (None, None) => return Ok(None),
            (Some(s), Some(b)) if b < s => (b, true),
            (Some(s), _) => (s, false),
            (None, Some(b)) => (b, true),
        };

        self.now_ms = at;
        if is_beat {
            self.heart_timer.rearm();
            let phase = self.beat()?;
            Ok(phase.map(Event::Beat))
        } else {
            self.step_timer.rearm();
            self.step(sink)?;
            Ok(Some(Event::Step))
        }
    }

    /// Run the event loop for `duration_ms` milliseconds of virtual time.
    ///
    /// Returns the number of steps taken.
    ///
    /// # Errors
    ///
    /// * If a step or a beat fails. The clock stays at the failed event.
    pub fn run_for<S: FrameSink<T>>(&mut self, duration_ms: u64, sink: &mut S) -> Result<u64, MssError> {
        let end_ms = self.now_ms.saturating_add(duration_ms);
        let start_frames = self.frames;

        while self.now_ms <= end_ms {
            if self.next_event(end_ms, sink)?.is_none() && !self.has_due_before(end_ms) {
                break;
            }
        }
        self.now_ms = end_ms;

        let steps = self.frames - start_frames;
        ftlog::debug!("Ran {steps} steps up to {end_ms} ms");
        Ok(steps)
    }

    /// Whether either timer will fire at or before `end_ms`.
    fn has_due_before(&self, end_ms: u64) -> bool {
        [self.step_timer.next_due_ms(), self.heart_timer.next_due_ms()]
            .into_iter()
            .flatten()
            .any(|t| t <= end_ms)
    }
}
