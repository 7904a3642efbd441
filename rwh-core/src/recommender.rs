//! Harvesting structure recommendation.
//!
//! Rules are evaluated in order and the first match wins. They overlap
//! (a clay site with a shallow water table satisfies both the clay rule and
//! the shallow-depth rule), so the order is part of the contract.

use serde::Serialize;

/// Harvest volume above which demand-driven storage is considered.
pub const DEMAND_STORAGE_MIN_LITRES: u64 = 50_000;

/// Demand above this share of the harvest favours direct-use storage.
pub const DEMAND_STORAGE_RATIO: f64 = 0.8;

/// Water tables shallower than this suit pits and trenches.
pub const SHALLOW_WATER_TABLE_METERS: f64 = 15.0;

/// Display form of a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedStructure {
    pub name: String,
    pub icon_tag: String,
    pub description: String,
}

/// The closed set of structures the recommender can choose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recommendation {
    /// Demand is high relative to a sizeable harvest.
    DemandStorageTank,
    /// Clay soil absorbs poorly.
    ClayStorageTank,
    RechargePit { depth_meters: f64 },
    RechargeShaft { depth_meters: f64 },
    ConsultExpert,
}

impl Recommendation {
    pub fn name(&self) -> &'static str {
        match self {
            Recommendation::DemandStorageTank | Recommendation::ClayStorageTank => "Storage Tank",
            Recommendation::RechargePit { .. } => "Recharge Pit / Trench",
            Recommendation::RechargeShaft { .. } => "Recharge Shaft",
            Recommendation::ConsultExpert => "Consult an Expert",
        }
    }

    pub fn icon_tag(&self) -> &'static str {
        match self {
            Recommendation::DemandStorageTank | Recommendation::ClayStorageTank => {
                "fas fa-tank-water"
            }
            Recommendation::RechargePit { .. } => "fas fa-faucet-drip",
            Recommendation::RechargeShaft { .. } => "fas fa-arrow-down-to-line",
            Recommendation::ConsultExpert => "fas fa-user-tie",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Recommendation::DemandStorageTank => "Your household's water demand is high compared to your harvest potential. \
                 A storage tank is ideal for saving on bills."
                .to_string(),
            Recommendation::ClayStorageTank => "Your area contains clayey soil with poor absorption. \
                 A storage tank is best for collecting water for direct use."
                .to_string(),
            Recommendation::RechargePit { depth_meters } => format!(
                "With favorable soil and a shallow water table ({depth_meters}m), a recharge pit or \
                 trench is highly effective for replenishing groundwater."
            ),
            Recommendation::RechargeShaft { depth_meters } => format!(
                "The water table is deep ({depth_meters}m). A recharge shaft is needed to ensure \
                 the harvested water reaches the aquifer."
            ),
            Recommendation::ConsultExpert => "Your location has unique conditions. \
                 We recommend consulting a local expert for the best solution."
                .to_string(),
        }
    }

    pub fn to_structure(&self) -> RecommendedStructure {
        RecommendedStructure {
            name: self.name().to_string(),
            icon_tag: self.icon_tag().to_string(),
            description: self.description(),
        }
    }
}

/// Choose a harvesting structure.
///
/// `soil_type` and `depth_meters` may be absent; when neither the demand
/// rule nor any soil/depth rule applies the result is `ConsultExpert`.
pub fn recommend(
    soil_type: Option<&str>,
    depth_meters: Option<f64>,
    harvestable_water_litres: u64,
    annual_demand_litres: u64,
) -> Recommendation {
    let harvest = harvestable_water_litres as f64;
    if harvestable_water_litres > DEMAND_STORAGE_MIN_LITRES
        && annual_demand_litres as f64 > DEMAND_STORAGE_RATIO * harvest
    {
        return Recommendation::DemandStorageTank;
    }

    if soil_type.is_some_and(|soil| soil.to_lowercase().contains("clay")) {
        return Recommendation::ClayStorageTank;
    }

    match depth_meters.filter(|d| d.is_finite()) {
        Some(depth_meters) if depth_meters < SHALLOW_WATER_TABLE_METERS => {
            Recommendation::RechargePit { depth_meters }
        }
        Some(depth_meters) => Recommendation::RechargeShaft { depth_meters },
        None => Recommendation::ConsultExpert,
    }
}
