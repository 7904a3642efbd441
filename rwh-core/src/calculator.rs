//! Harvest volume, household demand and feasibility tier.
//!
//! One millimetre of rain over one square metre of roof yields one litre;
//! the location's efficiency scales that down to what can actually be
//! collected or recharged.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Daily water need per person in litres.
pub const PER_CAPITA_DAILY_LITRES: u64 = 135;

pub const DAYS_PER_YEAR: u64 = 365;

/// Harvest volumes below this are `Low`.
pub const LOW_FEASIBILITY_THRESHOLD_LITRES: u64 = 30_000;

/// Harvest volumes at or above this are `High`.
pub const HIGH_FEASIBILITY_THRESHOLD_LITRES: u64 = 70_000;

/// Three-tier judgment of the annual harvestable volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Feasibility {
    Low,
    Medium,
    High,
}

impl Feasibility {
    /// Classify an annual harvest volume. Boundary values go to the higher
    /// tier.
    pub fn classify(harvestable_water_litres: u64) -> Self {
        if harvestable_water_litres < LOW_FEASIBILITY_THRESHOLD_LITRES {
            Feasibility::Low
        } else if harvestable_water_litres < HIGH_FEASIBILITY_THRESHOLD_LITRES {
            Feasibility::Medium
        } else {
            Feasibility::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Feasibility::Low => "Low",
            Feasibility::Medium => "Medium",
            Feasibility::High => "High",
        }
    }
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("efficiency must be within [0, 1], got {0}")]
    EfficiencyOutOfRange(f64),

    #[error("harvestable water of {0} litres is too large to represent")]
    HarvestTooLarge(f64),
}

/// Numeric outputs of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestEstimate {
    pub harvestable_water_litres: u64,
    pub annual_demand_litres: u64,
    /// Share of annual demand covered by the harvest, 0 to 100.
    pub percent_demand_met: u8,
    pub feasibility: Feasibility,
}

/// Annual household demand in litres.
pub fn annual_demand_litres(dwellers: u32) -> u64 {
    u64::from(dwellers) * PER_CAPITA_DAILY_LITRES * DAYS_PER_YEAR
}

/// Percentage of `demand` covered by `harvest`, rounded and clamped to
/// [0, 100]. Zero demand yields 0.
pub fn percent_demand_met(harvest: u64, demand: u64) -> u8 {
    if demand == 0 {
        return 0;
    }
    let met = harvest.min(demand);
    let percent = (100.0 * met as f64 / demand as f64).round();
    percent.clamp(0.0, 100.0) as u8
}

fn check_input(name: &'static str, value: f64) -> Result<f64, CalculationError> {
    if !value.is_finite() {
        return Err(CalculationError::NonFinite { name, value });
    }
    if value < 0.0 {
        return Err(CalculationError::Negative { name, value });
    }
    Ok(value)
}

/// Estimate harvest, demand, coverage and feasibility.
///
/// Pure and deterministic. Rejects non-finite or negative inputs and an
/// efficiency outside [0, 1] rather than producing a silent zero.
pub fn estimate(
    rainfall_mm: f64,
    efficiency: f64,
    roof_area_m2: f64,
    dwellers: u32,
) -> Result<HarvestEstimate, CalculationError> {
    let rainfall_mm = check_input("rainfall", rainfall_mm)?;
    let efficiency = check_input("efficiency", efficiency)?;
    let roof_area_m2 = check_input("roof area", roof_area_m2)?;
    if efficiency > 1.0 {
        return Err(CalculationError::EfficiencyOutOfRange(efficiency));
    }

    let litres = (rainfall_mm * roof_area_m2 * efficiency).round();
    if !litres.is_finite() {
        return Err(CalculationError::NonFinite {
            name: "harvestable water",
            value: litres,
        });
    }
    // u64::MAX as f64 rounds up to 2^64, which is already out of range.
    if litres >= u64::MAX as f64 {
        return Err(CalculationError::HarvestTooLarge(litres));
    }
    let harvestable_water_litres = litres as u64;

    let annual_demand_litres = annual_demand_litres(dwellers);

    Ok(HarvestEstimate {
        harvestable_water_litres,
        annual_demand_litres,
        percent_demand_met: percent_demand_met(harvestable_water_litres, annual_demand_litres),
        feasibility: Feasibility::classify(harvestable_water_litres),
    })
}
