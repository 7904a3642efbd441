//! Per-city environmental data and the lookup trait implemented by every
//! location source.

use crate::HarvestError;
use serde::{Deserialize, Serialize};

/// Subsidy scheme summary attached to a location, or produced from the
/// litre tiers in [`crate::subsidy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsidyDetails {
    pub available: bool,
    pub summary: String,
    #[serde(default)]
    pub details: String,
}

/// Known environmental data for one city.
///
/// Numeric fields are optional so that incomplete rows from the store can
/// be reported as [`HarvestError::InvalidLocationData`] instead of failing
/// to load. The harvest efficiency is given either as a percentage or as a
/// runoff coefficient; see [`LocationRecord::efficiency_fraction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// City name, matched case-insensitively.
    pub city: String,
    /// Average annual rainfall in millimetres.
    #[serde(default)]
    pub avg_rainfall_mm: Option<f64>,
    /// Share of incident rain that can be harvested, in (0, 100].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recharge_efficiency_percent: Option<f64>,
    /// Share of incident rain that becomes collectible runoff, in (0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runoff_coefficient: Option<f64>,
    /// Categorical soil description (e.g. "Sandy loam", "Black clay").
    #[serde(default)]
    pub soil_type: Option<String>,
    /// Average depth to the water table in metres.
    #[serde(default)]
    pub avg_depth_to_water_table_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsidy_details: Option<SubsidyDetails>,
}

impl LocationRecord {
    /// Case-insensitive exact match on the city name.
    pub fn matches(&self, city: &str) -> bool {
        self.city.trim().eq_ignore_ascii_case(city.trim())
    }

    /// Average annual rainfall, required to be positive and finite.
    pub fn rainfall_mm(&self) -> Result<f64, HarvestError> {
        match self.avg_rainfall_mm {
            Some(mm) if mm.is_finite() && mm > 0.0 => Ok(mm),
            Some(mm) => Err(HarvestError::invalid_data(
                &self.city,
                format!("average rainfall must be a positive number, got {mm}"),
            )),
            None => Err(HarvestError::invalid_data(
                &self.city,
                "average rainfall is missing",
            )),
        }
    }

    /// Harvest efficiency as a fraction in (0, 1].
    ///
    /// `recharge_efficiency_percent` takes precedence over
    /// `runoff_coefficient` when a record carries both.
    pub fn efficiency_fraction(&self) -> Result<f64, HarvestError> {
        if let Some(percent) = self.recharge_efficiency_percent {
            return if percent.is_finite() && percent > 0.0 && percent <= 100.0 {
                Ok(percent / 100.0)
            } else {
                Err(HarvestError::invalid_data(
                    &self.city,
                    format!("recharge efficiency must be within (0, 100] percent, got {percent}"),
                ))
            };
        }
        match self.runoff_coefficient {
            Some(c) if c.is_finite() && c > 0.0 && c <= 1.0 => Ok(c),
            Some(c) => Err(HarvestError::invalid_data(
                &self.city,
                format!("runoff coefficient must be within (0, 1], got {c}"),
            )),
            None => Err(HarvestError::invalid_data(
                &self.city,
                "neither recharge efficiency nor runoff coefficient is present",
            )),
        }
    }

    /// Depth to the water table, if present and finite.
    pub fn depth_to_water_table(&self) -> Option<f64> {
        self.avg_depth_to_water_table_meters
            .filter(|d| d.is_finite() && *d >= 0.0)
    }

    pub fn soil_type(&self) -> Option<&str> {
        self.soil_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A source of location records.
///
/// Implemented by the SQLite store and by the bundled dataset. `Ok(None)`
/// is a miss; `Err` means the source itself could not be queried.
pub trait LocationSource: Send + Sync {
    /// Look up a city by case-insensitive exact name.
    fn find_location(&self, city: &str) -> anyhow::Result<Option<LocationRecord>>;

    /// All city names known to this source.
    fn cities(&self) -> anyhow::Result<Vec<String>>;
}
