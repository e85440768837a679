//! Running a simulation and writing its frames.

use std::path::Path;

use mass_spring::{driver::Simulation, ParticleSystem, SimulationConfig};

use super::{HeartAction, MeshSource};
use crate::sinks::{write_energies, CsvFrameSink};

/// Options of the `simulate` subcommand that are not part of the configuration file.
#[derive(Debug, Clone, Copy)]
pub struct SimulateOptions {
    /// Virtual milliseconds to simulate.
    pub duration_ms: u64,
    /// What the heart does.
    pub heart: HeartAction,
    /// Whether to apply the `system` section of the configuration over the attributes of the mesh.
    pub apply_system: bool,
    /// Only every n-th frame is written.
    pub every: u64,
}

/// Builds the mesh, runs the simulation and writes its frames and, optionally, its energies.
///
/// # Arguments
///
/// * `mesh` - The mesh to simulate.
/// * `config` - The heart and timing parameters, and the system attributes used with `apply_system`.
/// * `options` - Duration, heart action, frame stride.
/// * `out_path` - The CSV file of particle positions.
/// * `energy_path` - The optional CSV file of per-step energies.
///
/// # Errors
///
/// * If the mesh or the configuration is invalid.
/// * If an output file could not be written.
pub fn simulate(
    mesh: MeshSource,
    config: &SimulationConfig<f32>,
    options: &SimulateOptions,
    out_path: &Path,
    energy_path: Option<&Path>,
) -> Result<(), String> {
    let mut system = match mesh {
        MeshSource::Preset(preset) => ParticleSystem::from_preset(preset),
        MeshSource::Loaded(data) => ParticleSystem::from_loaded_mesh(&data),
    }
    .map_err(|e| e.to_string())?;
    if options.apply_system {
        system.apply_general_attributes(&config.system).map_err(|e| e.to_string())?;
    }
    ftlog::info!(
        "Simulating {} particles and {} springs for {} ms",
        system.particle_count(),
        system.spring_count(),
        options.duration_ms
    );

    let mut sim = Simulation::new(system, config.heart, config.timing).map_err(|e| e.to_string())?;
    sim.start();
    match options.heart {
        HeartAction::Off => (),
        HeartAction::Beat => sim.start_heart(),
        HeartAction::PumpOnce => sim.pump_once(),
    }

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("Failed to create parent directory: {e}"))?;
    }
    let mut sink = CsvFrameSink::create(out_path, options.every)?;
    let steps = sim.run_for(options.duration_ms, &mut sink).map_err(|e| e.to_string())?;
    sink.finish()?;
    ftlog::info!("Wrote {} of {steps} frames to {out_path:?}", sink.written());

    if let Some(path) = energy_path {
        write_energies(path, sim.logs())?;
        ftlog::info!("Wrote energies to {path:?}");
    }

    Ok(())
}
