//! Request handling: validate, resolve, calculate, recommend, assemble.
//!
//! Transport independent. The HTTP layer and the CLI both drive
//! [`HarvestService`]; tests can call [`compute_harvesting`] directly.

use crate::calculator::{self, Feasibility};
use crate::location::{LocationRecord, SubsidyDetails};
use crate::recommender::{self, RecommendedStructure};
use crate::resolver::LocationResolver;
use crate::subsidy::{self, SubsidyPolicy};
use crate::HarvestError;
use serde::{Deserialize, Serialize};

/// Raw calculation input as received from a caller.
///
/// Every field is optional so that a missing value becomes a descriptive
/// [`HarvestError::MissingInput`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "roofAreaM2")]
    pub roof_area: Option<f64>,
    #[serde(default)]
    pub dwellers: Option<f64>,
}

impl CalculationRequest {
    pub fn new(location: &str, roof_area_m2: f64, dwellers: u32) -> Self {
        Self {
            location: Some(location.to_string()),
            roof_area: Some(roof_area_m2),
            dwellers: Some(f64::from(dwellers)),
        }
    }

    /// Check presence and positivity of every field.
    pub fn validate(&self) -> Result<ValidRequest, HarvestError> {
        let location = self
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| HarvestError::MissingInput("Location is required.".to_string()))?;

        let roof_area_m2 = match self.roof_area {
            Some(area) if area.is_finite() && area > 0.0 => area,
            Some(_) => {
                return Err(HarvestError::MissingInput(
                    "Roof area must be a positive number.".to_string(),
                ))
            }
            None => return Err(HarvestError::MissingInput("Roof area is required.".to_string())),
        };

        let dwellers = match self.dwellers {
            Some(n) if n.is_finite() && n >= 1.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => {
                n as u32
            }
            Some(n) if n.is_finite() && n > f64::from(u32::MAX) => {
                return Err(HarvestError::MissingInput(format!(
                    "Dwellers must be at most {}.",
                    u32::MAX
                )))
            }
            Some(_) => {
                return Err(HarvestError::MissingInput(
                    "Dwellers must be a positive whole number.".to_string(),
                ))
            }
            None => {
                return Err(HarvestError::MissingInput(
                    "Number of dwellers is required.".to_string(),
                ))
            }
        };

        Ok(ValidRequest {
            location: location.to_string(),
            roof_area_m2,
            dwellers,
        })
    }
}

/// A request that passed [`CalculationRequest::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub location: String,
    pub roof_area_m2: f64,
    pub dwellers: u32,
}

/// Outcome of one calculation, produced fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub location: String,
    pub annual_rainfall_mm: f64,
    pub roof_area_m2: f64,
    pub harvestable_water_litres: u64,
    pub feasibility_level: Feasibility,
    pub annual_demand_litres: u64,
    pub percent_demand_met: u8,
    pub recommended_structure: RecommendedStructure,
    pub subsidy_info: SubsidyDetails,
}

/// Compute the full result for a resolved location.
///
/// Pure: the same record and inputs always give the same result.
pub fn compute_harvesting(
    record: &LocationRecord,
    roof_area_m2: f64,
    dwellers: u32,
    policy: SubsidyPolicy,
) -> Result<CalculationResult, HarvestError> {
    if !(roof_area_m2.is_finite() && roof_area_m2 > 0.0) {
        return Err(HarvestError::MissingInput(
            "Roof area must be a positive number.".to_string(),
        ));
    }
    if dwellers == 0 {
        return Err(HarvestError::MissingInput(
            "Dwellers must be a positive whole number.".to_string(),
        ));
    }

    let rainfall_mm = record.rainfall_mm()?;
    let efficiency = record.efficiency_fraction()?;
    let estimate = calculator::estimate(rainfall_mm, efficiency, roof_area_m2, dwellers)
        .map_err(|e| HarvestError::invalid_data(&record.city, e.to_string()))?;

    let recommendation = recommender::recommend(
        record.soil_type(),
        record.depth_to_water_table(),
        estimate.harvestable_water_litres,
        estimate.annual_demand_litres,
    );

    Ok(CalculationResult {
        location: record.city.clone(),
        annual_rainfall_mm: rainfall_mm,
        roof_area_m2,
        harvestable_water_litres: estimate.harvestable_water_litres,
        feasibility_level: estimate.feasibility,
        annual_demand_litres: estimate.annual_demand_litres,
        percent_demand_met: estimate.percent_demand_met,
        recommended_structure: recommendation.to_structure(),
        subsidy_info: subsidy::resolve_subsidy(policy, record, estimate.harvestable_water_litres),
    })
}

/// Orchestrates lookup and calculation for one deployment.
pub struct HarvestService {
    resolver: LocationResolver,
    subsidy_policy: SubsidyPolicy,
}

impl HarvestService {
    pub fn new(resolver: LocationResolver, subsidy_policy: SubsidyPolicy) -> Self {
        Self {
            resolver,
            subsidy_policy,
        }
    }

    pub fn subsidy_policy(&self) -> SubsidyPolicy {
        self.subsidy_policy
    }

    pub fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult, HarvestError> {
        let valid = request.validate()?;
        let record = self.resolver.resolve(&valid.location)?;
        let result = compute_harvesting(&record, valid.roof_area_m2, valid.dwellers, self.subsidy_policy)?;
        log::info!(
            "[RWH] service: {} {}m2 x{} -> {} L ({}, {}%)",
            result.location,
            valid.roof_area_m2,
            valid.dwellers,
            result.harvestable_water_litres,
            result.feasibility_level,
            result.percent_demand_met
        );
        Ok(result)
    }

    pub fn cities(&self) -> anyhow::Result<Vec<String>> {
        self.resolver.cities()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::BundledDataset;
    use approx::assert_relative_eq;

    fn record(rainfall: f64, percent: f64, soil: &str, depth: f64) -> LocationRecord {
        LocationRecord {
            city: "Testpur".to_string(),
            avg_rainfall_mm: Some(rainfall),
            recharge_efficiency_percent: Some(percent),
            runoff_coefficient: None,
            soil_type: Some(soil.to_string()),
            avg_depth_to_water_table_meters: Some(depth),
            subsidy_details: None,
        }
    }

    fn service() -> HarvestService {
        HarvestService::new(
            LocationResolver::new(BundledDataset::embedded()),
            SubsidyPolicy::PerLocation,
        )
    }

    #[test]
    fn worked_example() {
        let r = record(800.0, 80.0, "sandy", 20.0);
        let result = compute_harvesting(&r, 100.0, 4, SubsidyPolicy::PerLocation).unwrap();
        assert_eq!(result.harvestable_water_litres, 64000);
        assert_eq!(result.annual_demand_litres, 197100);
        assert_eq!(result.percent_demand_met, 32);
        assert_eq!(result.feasibility_level, Feasibility::Medium);
        // 64000 > 50000 and 197100 > 51200
        assert_eq!(result.recommended_structure.name, "Storage Tank");
        assert_relative_eq!(result.annual_rainfall_mm, 800.0);
        assert_relative_eq!(result.roof_area_m2, 100.0);
    }

    #[test]
    fn clay_with_shallow_table_gets_storage_tank() {
        let r = record(600.0, 50.0, "clay", 5.0);
        let result = compute_harvesting(&r, 50.0, 1, SubsidyPolicy::PerLocation).unwrap();
        assert_eq!(result.harvestable_water_litres, 15000);
        assert_eq!(result.recommended_structure.name, "Storage Tank");
        assert!(result.recommended_structure.description.contains("clayey"));
    }

    #[test]
    fn invalid_record_is_reported_not_zeroed() {
        let mut r = record(800.0, 80.0, "sandy", 20.0);
        r.avg_rainfall_mm = Some(f64::NAN);
        assert!(matches!(
            compute_harvesting(&r, 100.0, 4, SubsidyPolicy::PerLocation),
            Err(HarvestError::InvalidLocationData { .. })
        ));
    }

    #[test]
    fn compute_rejects_non_positive_inputs() {
        let r = record(800.0, 80.0, "sandy", 20.0);
        assert!(matches!(
            compute_harvesting(&r, 0.0, 4, SubsidyPolicy::PerLocation),
            Err(HarvestError::MissingInput(_))
        ));
        assert!(matches!(
            compute_harvesting(&r, 100.0, 0, SubsidyPolicy::PerLocation),
            Err(HarvestError::MissingInput(_))
        ));
    }

    #[test]
    fn validate_rejects_missing_and_non_positive_fields() {
        let cases = [
            CalculationRequest { location: None, roof_area: Some(100.0), dwellers: Some(4.0) },
            CalculationRequest { location: Some("  ".into()), roof_area: Some(100.0), dwellers: Some(4.0) },
            CalculationRequest { location: Some("Delhi".into()), roof_area: None, dwellers: Some(4.0) },
            CalculationRequest { location: Some("Delhi".into()), roof_area: Some(-5.0), dwellers: Some(4.0) },
            CalculationRequest { location: Some("Delhi".into()), roof_area: Some(100.0), dwellers: None },
            CalculationRequest { location: Some("Delhi".into()), roof_area: Some(100.0), dwellers: Some(0.0) },
            CalculationRequest { location: Some("Delhi".into()), roof_area: Some(100.0), dwellers: Some(2.5) },
        ];
        for case in &cases {
            assert!(
                matches!(case.validate(), Err(HarvestError::MissingInput(_))),
                "{:?} should be rejected",
                case
            );
        }
    }

    #[test]
    fn validate_names_limit_for_oversized_household() {
        let request = CalculationRequest {
            location: Some("Delhi".into()),
            roof_area: Some(100.0),
            dwellers: Some(5e9),
        };
        match request.validate() {
            Err(HarvestError::MissingInput(msg)) => {
                assert_eq!(msg, format!("Dwellers must be at most {}.", u32::MAX))
            }
            other => panic!("expected MissingInput, got {:?}", other),
        }
    }

    #[test]
    fn validate_trims_location() {
        let valid = CalculationRequest::new("  Pune ", 80.0, 3).validate().unwrap();
        assert_eq!(valid.location, "Pune");
        assert_eq!(valid.dwellers, 3);
    }

    #[test]
    fn request_accepts_both_roof_area_spellings() {
        let a: CalculationRequest =
            serde_json::from_str(r#"{"location": "Pune", "roofArea": 80, "dwellers": 3}"#).unwrap();
        let b: CalculationRequest =
            serde_json::from_str(r#"{"location": "Pune", "roofAreaM2": 80, "dwellers": 3}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn service_resolves_case_insensitively() {
        let svc = service();
        let a = svc.calculate(&CalculationRequest::new("Mumbai", 100.0, 4)).unwrap();
        let b = svc.calculate(&CalculationRequest::new("mumbai", 100.0, 4)).unwrap();
        assert_eq!(a, b);
        // 2200 * 100 * 0.8
        assert_eq!(a.harvestable_water_litres, 176000);
        assert_eq!(a.feasibility_level, Feasibility::High);
        assert!(a.subsidy_info.available);
    }

    #[test]
    fn service_reports_unknown_city() {
        let err = service()
            .calculate(&CalculationRequest::new("Atlantis", 100.0, 4))
            .unwrap_err();
        assert!(matches!(err, HarvestError::LocationNotFound(_)));
    }

    #[test]
    fn service_uses_tiered_subsidy_when_configured() {
        let svc = HarvestService::new(
            LocationResolver::new(BundledDataset::embedded()),
            SubsidyPolicy::LitreTiers,
        );
        // Kolkata has no subsidy details; tiers still apply. 1600 * 10 * 0.7 = 11200
        let result = svc.calculate(&CalculationRequest::new("Kolkata", 10.0, 2)).unwrap();
        assert_eq!(result.harvestable_water_litres, 11200);
        assert_eq!(result.subsidy_info, subsidy::tier_subsidy(11200));
    }

    #[test]
    fn result_serializes_camel_case() {
        let r = record(800.0, 80.0, "sandy", 20.0);
        let result = compute_harvesting(&r, 100.0, 4, SubsidyPolicy::PerLocation).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["harvestableWaterLitres"], 64000);
        assert_eq!(json["feasibilityLevel"], "Medium");
        assert_eq!(json["percentDemandMet"], 32);
        assert_eq!(json["roofAreaM2"], 100.0);
        assert_eq!(json["recommendedStructure"]["iconTag"], "fas fa-tank-water");
        assert_eq!(json["subsidyInfo"]["available"], false);
    }
}
