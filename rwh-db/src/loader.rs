//! Seeding the location store.
//!
//! Seeding replaces the whole table: existing rows are deleted and the new
//! records inserted inside one transaction, so a failed seed leaves the
//! previous contents intact.
//!
//! # JSON Format
//!
//! An array of objects with the fields of
//! [`rwh_core::location::LocationRecord`]:
//!
//! ```text
//! [{"city": "Delhi", "avg_rainfall_mm": 790, "recharge_efficiency_percent": 75,
//!   "soil_type": "Sandy loam", "avg_depth_to_water_table_meters": 25,
//!   "subsidy_details": {"available": true, "summary": "...", "details": "..."}}]
//! ```

use crate::Database;
use rusqlite::params;
use rwh_core::dataset::parse_locations_json;
use rwh_core::location::LocationRecord;

impl Database {
    /// Replace all stored locations with `records`.
    ///
    /// Returns the number of rows inserted. Records whose city differs only
    /// by case overwrite each other.
    pub fn seed_locations(&self, records: &[LocationRecord]) -> anyhow::Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let deleted = tx.execute("DELETE FROM locations", [])?;

        let mut count = 0usize;
        let mut skipped = 0usize;
        for r in records {
            let city = r.city.trim();
            if city.is_empty() {
                skipped += 1;
                continue;
            }
            let subsidy = r.subsidy_details.as_ref();
            tx.execute(
                "INSERT OR REPLACE INTO locations
                 (city, avg_rainfall_mm, recharge_efficiency_percent, runoff_coefficient,
                  soil_type, avg_depth_to_water_table_meters,
                  subsidy_available, subsidy_summary, subsidy_details)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    city,
                    r.avg_rainfall_mm,
                    r.recharge_efficiency_percent,
                    r.runoff_coefficient,
                    r.soil_type,
                    r.avg_depth_to_water_table_meters,
                    subsidy.map(|s| s.available),
                    subsidy.map(|s| s.summary.as_str()),
                    subsidy.map(|s| s.details.as_str()),
                ],
            )?;
            count += 1;
        }
        tx.commit()?;
        log::info!(
            "[RWH] loader: Replaced {} locations with {}, skipped {} without a city",
            deleted,
            count,
            skipped
        );
        Ok(count)
    }

    /// Parse a JSON array of location records and seed the store with it.
    pub fn load_locations_json(&self, json: &str) -> anyhow::Result<usize> {
        let records = parse_locations_json(json)?;
        self.seed_locations(&records)
    }
}
