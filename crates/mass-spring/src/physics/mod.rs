//! The physics for the mass-spring system.

mod collision;
mod particle;
mod spring;
mod system;

pub use collision::Ground;
pub use particle::Particle;
pub use spring::Spring;
pub use system::{MeshMode, ParticleSystem};
