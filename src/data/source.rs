use std::path::Path;

use anyhow::{Context, Result};

use super::model::RawMeasurement;

// ---------------------------------------------------------------------------
// DataSource – the boundary measurements arrive through
// ---------------------------------------------------------------------------

/// Where raw measurement batches come from.
///
/// `fetch` collapses every failure into `None`: a missing resource and
/// content that fails to parse look the same to the store, which maps both
/// to its wrong-format outcome. Sources wanting richer diagnostics log
/// before returning.
pub trait DataSource {
    fn fetch(&self, source_id: &str) -> Option<Vec<RawMeasurement>>;
}

// ---------------------------------------------------------------------------
// JSON file source
// ---------------------------------------------------------------------------

/// Reads measurement batches from JSON files, treating the source id as a
/// filesystem path.
///
/// Expected schema (records-oriented):
///
/// ```json
/// [
///   { "Id": 1, "X": 0.11, "Y": 5.02, "Z": -0.07 },
///   { "Id": 2, "X": 0.13, "Y": 5.01, "Z": -0.02 }
/// ]
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileSource;

impl DataSource for JsonFileSource {
    fn fetch(&self, source_id: &str) -> Option<Vec<RawMeasurement>> {
        match read_measurement_file(Path::new(source_id)) {
            Ok(records) => Some(records),
            Err(err) => {
                log::error!("Failed to read measurements from {source_id}: {err:#}");
                None
            }
        }
    }
}

fn read_measurement_file(path: &Path) -> Result<Vec<RawMeasurement>> {
    let text = std::fs::read_to_string(path).context("reading measurement file")?;
    let records: Vec<RawMeasurement> = serde_json::from_str(&text).context("parsing JSON")?;
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
