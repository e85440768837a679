//! Writing the default configuration.

use std::path::Path;

use mass_spring::SimulationConfig;

/// Writes the default configuration to `out_path`, in the format given by its extension, or prints it as YAML.
///
/// # Errors
///
/// * If the configuration could not be serialized or written.
pub fn write_defaults(out_path: Option<&Path>) -> Result<(), String> {
    let config = SimulationConfig::<f32>::default();
    match out_path {
        Some(path) => {
            crate::utils::write_config(&config, path)?;
            ftlog::info!("Wrote the default configuration to {path:?}");
        }
        None => {
            let yaml = serde_yaml::to_string(&config).map_err(|e| e.to_string())?;
            println!("{yaml}");
        }
    }
    Ok(())
}
