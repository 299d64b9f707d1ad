//! Trajectory export: CSV or JSON, chosen by file extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tennis_pointmass::Sample;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown extension: {} (supported: .csv, .json)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode trajectory")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Case-insensitive match on the extension.
    ///
    /// # Errors
    /// [`ExportError::UnsupportedFormat`] for anything but `.csv` and `.json`.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat { path: path.to_path_buf() }),
        }
    }
}

#[derive(Serialize)]
struct Point {
    t: f64,
    x: f64,
    y: f64,
    z: f64,
}

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

impl From<&Sample> for Point {
    fn from(s: &Sample) -> Self {
        Self { t: round6(s.t), x: round6(s.pos.x), y: round6(s.pos.y), z: round6(s.pos.z) }
    }
}

/// `t,x,y,z` header, one row per sample, 6 decimals, no trailing newline.
#[must_use]
pub fn to_csv(samples: &[Sample]) -> String {
    let mut lines = Vec::with_capacity(samples.len() + 1);
    lines.push("t,x,y,z".to_owned());
    lines.extend(
        samples
            .iter()
            .map(|s| format!("{:.6},{:.6},{:.6},{:.6}", s.t, s.pos.x, s.pos.y, s.pos.z)),
    );
    lines.join("\n")
}

/// Pretty-printed array of `{t, x, y, z}` objects rounded to 6 decimals.
///
/// # Errors
/// If serialization fails.
pub fn to_json(samples: &[Sample]) -> Result<String, serde_json::Error> {
    let points: Vec<Point> = samples.iter().map(Point::from).collect();
    serde_json::to_string_pretty(&points)
}

/// Write `samples` to `path`. Nothing is written for an unknown extension.
///
/// # Errors
/// [`ExportError::UnsupportedFormat`] for an unknown extension,
/// [`ExportError::Io`] if the file cannot be written.
pub fn export(path: &Path, samples: &[Sample]) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let body = match format {
        ExportFormat::Csv => to_csv(samples),
        ExportFormat::Json => to_json(samples)?,
    };
    fs::write(path, body).map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
    Ok(format)
}
