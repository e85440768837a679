//! Writing frames and energies to CSV files.

use std::{fs::File, path::Path};

use mass_spring::{driver::FrameSink, MssError, Vector};

/// The columns of the frames CSV.
const FRAME_HEADER: [&str; 6] = ["frame", "time_ms", "particle", "x", "y", "z"];

/// The columns of the energies CSV.
const ENERGY_HEADER: [&str; 4] = ["step", "kinetic", "potential", "total"];

/// A `FrameSink` that writes one row per particle per frame.
pub struct CsvFrameSink {
    /// The CSV writer.
    writer: csv::Writer<File>,
    /// Only frames whose index is a multiple of this are written.
    every: u64,
    /// The number of frames written.
    written: u64,
}

impl CsvFrameSink {
    /// Creates the file and writes the header.
    ///
    /// # Errors
    ///
    /// * If the file could not be created or written.
    pub fn create(path: &Path, every: u64) -> Result<Self, String> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| format!("Failed to create {path:?}: {e}"))?;
        writer.write_record(FRAME_HEADER).map_err(|e| e.to_string())?;
        Ok(Self {
            writer,
            every: every.max(1),
            written: 0,
        })
    }

    /// The number of frames written so far.
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Flushes the file.
    ///
    /// # Errors
    ///
    /// * If the file could not be written.
    pub fn finish(&mut self) -> Result<(), String> {
        self.writer.flush().map_err(|e| e.to_string())
    }
}

impl FrameSink<f32> for CsvFrameSink {
    fn publish(&mut self, frame: u64, time_ms: u64, positions: &[Vector<f32>]) -> Result<(), MssError> {
        if frame % self.every != 0 {
            return Ok(());
        }
        for (i, [x, y, z]) in positions.iter().enumerate() {
            let row = [frame.to_string(), time_ms.to_string(), i.to_string(), x.to_string(), y.to_string(), z.to_string()];
            self.writer.write_record(&row).map_err(|e| MssError::Io(e.to_string()))?;
        }
        self.written += 1;
        Ok(())
    }
}

/// Writes one row of kinetic, potential and total energy per step.
///
/// # Errors
///
/// * If the file could not be created or written.
pub fn write_energies(path: &Path, logs: &[[f32; 3]]) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| format!("Failed to create {path:?}: {e}"))?;
    writer.write_record(ENERGY_HEADER).map_err(|e| e.to_string())?;
    for (step, [kinetic, potential, total]) in logs.iter().enumerate() {
        let row = [(step + 1).to_string(), kinetic.to_string(), potential.to_string(), total.to_string()];
        writer.write_record(&row).map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}
