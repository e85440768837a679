//! Helpers shared by the integration tests.

#![allow(dead_code)]

use mass_spring::{mesh::MeshData, LinearDamping, MeshMode, ParticleSystem, SystemConfig};
use rand::prelude::*;

/// A random spring network with `n` particles in a cube of side 20 centered at height 100.
///
/// Every particle is joined to the next one, so the network is connected, plus `extra` random springs.
pub fn random_network(seed: u64, n: usize, extra: usize) -> MeshData<f64> {
    let mut rng = StdRng::seed_from_u64(seed);

    let positions = (0..n)
        .map(|_| {
            [
                rng.random_range(-10.0..10.0),
                rng.random_range(90.0..110.0),
                rng.random_range(-10.0..10.0),
            ]
        })
        .collect::<Vec<_>>();

    let mut springs = (1..n).map(|i| (i - 1, i)).collect::<Vec<_>>();
    while springs.len() < n - 1 + extra {
        let (a, b) = (rng.random_range(0..n), rng.random_range(0..n));
        if a != b {
            springs.push((a, b));
        }
    }

    MeshData::new(positions, springs)
}

/// Attributes with no gravity, no damping and the ground far below.
pub fn frictionless() -> SystemConfig<f64> {
    SystemConfig {
        gravity: [0.0; 3],
        damping: LinearDamping::none(),
        ground_y: -1.0e6,
        ..SystemConfig::default()
    }
}

/// A hard-coded system of `n` particles and no springs with the given attributes.
pub fn loose_particles(n: usize, config: &SystemConfig<f64>) -> Result<ParticleSystem<f64>, String> {
    let mut system = ParticleSystem::new(n, 0);
    system.set_mesh_mode(MeshMode::HardCoded);
    system.apply_general_attributes(config).map_err(|e| e.to_string())?;
    Ok(system)
}
