//! A mass-spring simulation of a beating heart.
//!
//! A mesh of point masses joined by damped springs is integrated with semi-implicit Euler, bounces off a ground plane,
//! and is made to beat by periodically shortening and lengthening the rest lengths of all its springs.
//!
//! ## Modules
//!
//! - [`physics`]: Particles, springs and the `ParticleSystem` that steps them.
//! - [`heart`]: The `Heartbeat` actuator that contracts and relaxes the springs.
//! - [`mesh`]: Hard-coded `Preset` meshes and loaded `MeshData`.
//! - [`driver`]: A two-timer event loop on a virtual clock that publishes frames.
//! - [`config`]: Serializable configuration with the default values of the simulation.
//!
//! ## Example
//!
//! ```
//! use mass_spring::{driver::{FrameRecorder, Simulation}, mesh::Preset, ParticleSystem, SimulationConfig};
//!
//! let config = SimulationConfig::<f32>::default();
//! let system = ParticleSystem::from_preset(Preset::Tetrahedron)?;
//! let mut sim = Simulation::new(system, config.heart, config.timing)?;
//!
//! let mut frames = FrameRecorder::new();
//! sim.start();
//! sim.start_heart();
//! let steps = sim.run_for(1_000, &mut frames)?;
//!
//! assert_eq!(steps, 62);
//! assert_eq!(frames.frames().len(), 62);
//! # Ok::<(), mass_spring::MssError>(())
//! ```

pub mod config;
pub mod driver;
mod error;
pub mod heart;
pub mod mesh;
pub mod physics;
pub mod utils;

pub use config::{HeartConfig, HeartMode, LinearDamping, SimulationConfig, SystemConfig, TimingConfig};
pub use error::MssError;
pub use physics::{MeshMode, ParticleSystem};
pub use utils::{Real, Vector};
