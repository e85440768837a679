//! The commands under the `mss-shell` CLI.

mod defaults;
mod simulate;

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use mass_spring::mesh::{MeshData, Preset};

pub use defaults::write_defaults;
pub use simulate::{simulate, SimulateOptions};

/// The subcommands of the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the simulation on a virtual clock and write every frame to a CSV file.
    Simulate {
        /// One of the hard-coded meshes. Ignored if `--mesh-path` is given. Defaults to the cube.
        #[arg(short('p'), long)]
        preset: Option<PresetArg>,

        /// The path to a '.json' or '.yaml' mesh with `positions`, `springs` and optional `faces`.
        #[arg(short('m'), long)]
        mesh_path: Option<PathBuf>,

        /// Virtual milliseconds to simulate.
        #[arg(short('d'), long, default_value_t = 5_000)]
        duration_ms: u64,

        /// What the heart does while the simulation runs.
        #[arg(long, default_value_t = HeartAction::Beat, value_enum)]
        heart: HeartAction,

        /// Apply the `system` section of the configuration over the attributes of the mesh.
        #[arg(long)]
        apply_system: bool,

        /// Only write every n-th frame.
        #[arg(short('e'), long, default_value_t = 1)]
        every: u64,

        /// The path to the output CSV file of particle positions.
        #[arg(short('o'), long)]
        out_path: PathBuf,

        /// The path to an optional CSV file of per-step energies.
        #[arg(long)]
        energy_path: Option<PathBuf>,
    },
    /// Print the default configuration as YAML, or write it to a '.json' or '.yaml' file.
    Defaults {
        /// Where to write the configuration.
        #[arg(short('o'), long)]
        out_path: Option<PathBuf>,
    },
}

/// The hard-coded meshes.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PresetArg {
    /// Two particles, one spring.
    Line,
    /// Four particles, six springs.
    Tetrahedron,
    /// Eight particles, twelve springs.
    Cube,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Line => Self::Line,
            PresetArg::Tetrahedron => Self::Tetrahedron,
            PresetArg::Cube => Self::Cube,
        }
    }
}

/// What the heart does during a simulation.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartAction {
    /// The heart stays still.
    Off,
    /// The heart beats for the whole run.
    Beat,
    /// The heart beats through one cycle and then stops.
    PumpOnce,
}

/// Where the mesh of a simulation comes from.
#[derive(Debug)]
pub enum MeshSource {
    /// A hard-coded mesh.
    Preset(Preset),
    /// A mesh read from a file.
    Loaded(MeshData<f32>),
}
