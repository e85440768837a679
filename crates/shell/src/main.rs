//! CLI for the mass-spring heart simulation.

mod commands;
mod sinks;
pub mod utils;

use std::path::PathBuf;

use clap::Parser;

use commands::Commands;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The path to a '.json' or '.yaml' configuration file. Anything it leaves out takes its default value.
    #[arg(short('c'), long)]
    config_path: Option<PathBuf>,

    /// The name of the log-file to use.
    #[arg(short('l'), long, default_value = "mss-shell.log")]
    log_name: String,

    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let (_guard, log_path) = utils::configure_logger(&args.log_name)?;
    ftlog::info!("Log file: {log_path:?}");

    let config = match &args.config_path {
        Some(path) => utils::read_config(path)?,
        None => mass_spring::SimulationConfig::default(),
    };
    config.validate().map_err(|e| e.to_string())?;

    match args.command {
        Commands::Simulate {
            preset,
            mesh_path,
            duration_ms,
            heart,
            apply_system,
            every,
            out_path,
            energy_path,
        } => {
            let mesh = match (preset, mesh_path) {
                (_, Some(path)) => commands::MeshSource::Loaded(utils::read_mesh(&path)?),
                (Some(preset), None) => commands::MeshSource::Preset(preset.into()),
                (None, None) => commands::MeshSource::Preset(mass_spring::mesh::Preset::Cube),
            };
            let options = commands::SimulateOptions {
                duration_ms,
                heart,
                apply_system,
                every,
            };
            commands::simulate(mesh, &config, &options, &out_path, energy_path.as_deref())
        }
        Commands::Defaults { out_path } => commands::write_defaults(out_path.as_deref()),
    }
}
