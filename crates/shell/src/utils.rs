//! Some utilities

use std::path::{Path, PathBuf};

use ftlog::{
    appender::{FileAppender, Period},
    LevelFilter, LoggerGuard,
};
use mass_spring::{mesh::MeshData, SimulationConfig};
use serde::{de::DeserializeOwned, Serialize};

/// The formats of configuration and mesh files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    /// A '.json' file.
    Json,
    /// A '.yaml' or '.yml' file.
    Yaml,
}

impl FileFormat {
    /// Determines the format from the extension of `path`.
    fn of(path: &Path) -> Result<Self, String> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(format!("Unsupported file extension for {path:?}, expected '.json' or '.yaml'")),
        }
    }
}

/// Reads a value from a '.json' or '.yaml' file.
fn read_serde<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let format = FileFormat::of(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| format!("Failed to read {path:?}: {e}"))?;
    match format {
        FileFormat::Json => serde_json::from_str(&text).map_err(|e| format!("Failed to parse {path:?}: {e}")),
        FileFormat::Yaml => serde_yaml::from_str(&text).map_err(|e| format!("Failed to parse {path:?}: {e}")),
    }
}

/// Reads a simulation configuration. Missing values take their defaults.
///
/// # Errors
///
/// - If the file has an unsupported extension, could not be read, or could not be parsed.
pub fn read_config(path: &Path) -> Result<SimulationConfig<f32>, String> {
    let config = read_serde(path)?;
    ftlog::info!("Read configuration from {path:?}");
    Ok(config)
}

/// Writes a simulation configuration in the format given by the extension of `path`.
///
/// # Errors
///
/// - If the file has an unsupported extension, or could not be written.
pub fn write_config<T: Serialize>(config: &T, path: &Path) -> Result<(), String> {
    let text = match FileFormat::of(path)? {
        FileFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string())?,
        FileFormat::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string())?,
    };
    std::fs::write(path, text).map_err(|e| format!("Failed to write {path:?}: {e}"))
}

/// Reads a mesh.
///
/// # Errors
///
/// - If the file has an unsupported extension, could not be read, or could not be parsed.
pub fn read_mesh(path: &Path) -> Result<MeshData<f32>, String> {
    let mesh: MeshData<f32> = read_serde(path)?;
    ftlog::info!(
        "Read a mesh with {} particles and {} springs from {path:?}",
        mesh.positions.len(),
        mesh.springs.len()
    );
    Ok(mesh)
}

/// Configures the logger.
///
/// # Errors
///
/// - If a logs directory could not be located/created.
/// - If the logger could not be initialized.
pub fn configure_logger(file_name: &str) -> Result<(LoggerGuard, PathBuf), String> {
    let root_dir = PathBuf::from(".").canonicalize().map_err(|e| e.to_string())?;
    let logs_dir = root_dir.join("logs");
    if !logs_dir.exists() {
        std::fs::create_dir(&logs_dir).map_err(|e| e.to_string())?;
    }
    let log_path = logs_dir.join(file_name);

    let writer = FileAppender::builder().path(&log_path).rotate(Period::Day).build();

    let err_stem = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Invalid log file name {file_name:?}"))?;
    let err_path = log_path.with_file_name(format!("{err_stem}-err"));

    let guard = ftlog::Builder::new()
        // global max log level
        .max_log_level(LevelFilter::Info)
        // define root appender, pass None would write to stderr
        .root(writer)
        // write `Warn` and `Error` logs in ftlog::appender to `err_path` instead of `log_path`
        .filter("ftlog::appender", "ftlog-appender", LevelFilter::Warn)
        .appender("ftlog-appender", FileAppender::new(err_path))
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}

#[cfg(test)]
mod tests {
    use mass_spring::{HeartMode, SimulationConfig};

    use super::{read_config, read_mesh, write_config};

    #[test]
    fn config_round_trips_through_both_formats() -> Result<(), String> {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        let mut config = SimulationConfig::<f32>::default();
        config.heart.mode = HeartMode::Heterogeneous;
        config.timing.step_interval_ms = 10;

        for name in ["config.json", "config.yaml"] {
            let path = dir.path().join(name);
            write_config(&config, &path)?;
            assert_eq!(read_config(&path)?, config);
        }
        Ok(())
    }

    #[test]
    fn partial_yaml_mesh() -> Result<(), String> {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        let path = dir.path().join("mesh.yml");
        std::fs::write(&path, "positions:\n  - [0, 0, 0]\n  - [1, 0, 0]\nsprings:\n  - [0, 1]\n").map_err(|e| e.to_string())?;

        let mesh = read_mesh(&path)?;
        assert_eq!(mesh.positions.len(), 2);
        assert_eq!(mesh.springs, vec![(0, 1)]);
        assert!(mesh.faces.is_empty());
        Ok(())
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let path = std::path::Path::new("config.toml");
        assert!(read_config(path).is_err());
    }
}
