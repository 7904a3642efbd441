//! Subsidy information.
//!
//! A deployment takes subsidy text from exactly one source: the location
//! record, or three fixed tiers over the annual harvest volume.

use crate::location::{LocationRecord, SubsidyDetails};
use std::fmt;
use std::str::FromStr;

/// Harvests below this fall in the lowest tier.
pub const PARTIAL_SUBSIDY_MIN_LITRES: u64 = 20_000;

/// Harvests at or above this fall in the highest tier.
pub const FULL_SUBSIDY_MIN_LITRES: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubsidyPolicy {
    /// Use the record's `subsidy_details`.
    #[default]
    PerLocation,
    /// Derive eligibility from the harvest volume.
    LitreTiers,
}

impl FromStr for SubsidyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "location" | "per-location" => Ok(SubsidyPolicy::PerLocation),
            "tiered" | "litre-tiers" => Ok(SubsidyPolicy::LitreTiers),
            other => Err(format!(
                "unknown subsidy policy '{other}', expected 'location' or 'tiered'"
            )),
        }
    }
}

impl fmt::Display for SubsidyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubsidyPolicy::PerLocation => f.write_str("location"),
            SubsidyPolicy::LitreTiers => f.write_str("tiered"),
        }
    }
}

fn no_location_subsidy() -> SubsidyDetails {
    SubsidyDetails {
        available: false,
        summary: "No specific subsidy info found.".to_string(),
        details: "No specific subsidy details are available for this location.".to_string(),
    }
}

/// Canned eligibility text for an annual harvest volume.
pub fn tier_subsidy(harvestable_water_litres: u64) -> SubsidyDetails {
    if harvestable_water_litres < PARTIAL_SUBSIDY_MIN_LITRES {
        SubsidyDetails {
            available: false,
            summary: "Harvest potential is below the threshold of most rebate schemes.".to_string(),
            details: "Systems collecting under 20,000 litres a year rarely qualify for capital \
                      subsidies. A rain barrel or small recharge pit still reduces water bills."
                .to_string(),
        }
    } else if harvestable_water_litres < FULL_SUBSIDY_MIN_LITRES {
        SubsidyDetails {
            available: true,
            summary: "Likely eligible for partial assistance or a property tax rebate.".to_string(),
            details: "Systems collecting 20,000 to 60,000 litres a year typically qualify for \
                      rebates or partial cost reimbursement. Check with your local water utility \
                      for the application process."
                .to_string(),
        }
    } else {
        SubsidyDetails {
            available: true,
            summary: "Likely eligible for the full subsidy available in your area.".to_string(),
            details: "Systems collecting 60,000 litres or more a year usually meet the criteria \
                      for the largest grants and may be mandatory for building approval. Contact \
                      your municipal corporation's rainwater harvesting cell."
                .to_string(),
        }
    }
}

/// Resolve subsidy information under `policy`.
pub fn resolve_subsidy(
    policy: SubsidyPolicy,
    record: &LocationRecord,
    harvestable_water_litres: u64,
) -> SubsidyDetails {
    match policy {
        SubsidyPolicy::PerLocation => record
            .subsidy_details
            .clone()
            .unwrap_or_else(no_location_subsidy),
        SubsidyPolicy::LitreTiers => tier_subsidy(harvestable_water_litres),
    }
}
