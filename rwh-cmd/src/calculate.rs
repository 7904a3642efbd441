//! One-shot calculation from the command line.

use rwh_core::service::{CalculationRequest, HarvestService};

pub fn run_calculate(
    service: &HarvestService,
    location: &str,
    roof_area: f64,
    dwellers: u32,
) -> anyhow::Result<()> {
    let request = CalculationRequest::new(location, roof_area, dwellers);
    let result = service.calculate(&request)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
