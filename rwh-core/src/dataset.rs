//! Bundled location dataset used when the persistent store is unavailable
//! or has no entry for a city.
//!
//! The dataset is parsed on first use and cached for the lifetime of the
//! value. Concurrent first callers block on a single load through
//! [`OnceLock`]; a failed load is cached too, so an unreadable file is not
//! retried on every request.

use crate::location::{LocationRecord, LocationSource};
use anyhow::Context;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Embedded copy of `fixtures/locations_data.json`.
pub static EMBEDDED_LOCATIONS_JSON: &str = include_str!("../../fixtures/locations_data.json");

/// Parse a JSON array of location records.
pub fn parse_locations_json(json: &str) -> anyhow::Result<Vec<LocationRecord>> {
    let records: Vec<LocationRecord> =
        serde_json::from_str(json).context("Failed to parse location dataset JSON")?;
    Ok(records)
}

#[derive(Debug, Clone)]
enum DatasetOrigin {
    Embedded,
    File(PathBuf),
}

/// Lazily loaded, process-lifetime cache of the bundled location dataset.
#[derive(Debug)]
pub struct BundledDataset {
    origin: DatasetOrigin,
    records: OnceLock<Result<Vec<LocationRecord>, String>>,
    loads: AtomicUsize,
}

impl BundledDataset {
    /// Dataset compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            origin: DatasetOrigin::Embedded,
            records: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Dataset read from a JSON file on first use.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: DatasetOrigin::File(path.into()),
            records: OnceLock::new(),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.records.get().is_some()
    }

    /// Number of load attempts made so far; at most 1.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn load(&self) -> anyhow::Result<Vec<LocationRecord>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let records = match &self.origin {
            DatasetOrigin::Embedded => parse_locations_json(EMBEDDED_LOCATIONS_JSON)?,
            DatasetOrigin::File(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                parse_locations_json(&json)?
            }
        };
        log::info!(
            "[RWH] dataset: Loaded {} locations from {:?}",
            records.len(),
            self.origin
        );
        Ok(records)
    }

    /// All records, loading them on the first call.
    pub fn records(&self) -> anyhow::Result<&[LocationRecord]> {
        self.records
            .get_or_init(|| {
                self.load().map_err(|e| {
                    log::error!("[RWH] dataset: {:#}", e);
                    format!("{:#}", e)
                })
            })
            .as_deref()
            .map_err(|msg| anyhow::anyhow!("Bundled location dataset unavailable: {}", msg))
    }
}

impl LocationSource for BundledDataset {
    fn find_location(&self, city: &str) -> anyhow::Result<Option<LocationRecord>> {
        Ok(self.records()?.iter().find(|r| r.matches(city)).cloned())
    }

    fn cities(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.records()?.iter().map(|r| r.city.clone()).collect())
    }
}
