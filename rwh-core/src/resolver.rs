//! Location resolution: primary store first, bundled dataset second.

use crate::dataset::BundledDataset;
use crate::location::{LocationRecord, LocationSource};
use crate::HarvestError;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Resolves city names against an optional primary store and the bundled
/// dataset.
///
/// A failing primary store is logged and treated as unavailable; only a
/// failure of the bundled dataset is reported as an internal error.
pub struct LocationResolver {
    primary: Option<Arc<dyn LocationSource>>,
    fallback: BundledDataset,
}

impl LocationResolver {
    pub fn new(fallback: BundledDataset) -> Self {
        Self {
            primary: None,
            fallback,
        }
    }

    pub fn with_primary(mut self, primary: Arc<dyn LocationSource>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Resolve `city` to a record or a typed miss.
    pub fn resolve(&self, city: &str) -> Result<LocationRecord, HarvestError> {
        if let Some(primary) = &self.primary {
            match primary.find_location(city) {
                Ok(Some(record)) => return Ok(record),
                Ok(None) => {
                    log::info!("[RWH] resolver: '{}' not in primary store, using bundled dataset", city);
                }
                Err(e) => {
                    log::warn!("[RWH] resolver: primary store unavailable ({:#}), using bundled dataset", e);
                }
            }
        }

        match self.fallback.find_location(city)? {
            Some(record) => Ok(record),
            None => Err(HarvestError::LocationNotFound(city.to_string())),
        }
    }

    /// Sorted, de-duplicated city names from every reachable source.
    pub fn cities(&self) -> anyhow::Result<Vec<String>> {
        let mut names = BTreeSet::new();
        if let Some(primary) = &self.primary {
            match primary.cities() {
                Ok(cities) => names.extend(cities),
                Err(e) => log::warn!("[RWH] resolver: primary store unavailable ({:#})", e),
            }
        }
        names.extend(self.fallback.cities()?);
        Ok(names.into_iter().collect())
    }
}
