//! Typed lookups against the location store.

use crate::Database;
use rusqlite::{params, OptionalExtension, Row};
use rwh_core::location::{LocationRecord, LocationSource, SubsidyDetails};

const LOCATION_COLUMNS: &str = "city, avg_rainfall_mm, recharge_efficiency_percent, runoff_coefficient,
     soil_type, avg_depth_to_water_table_meters,
     subsidy_available, subsidy_summary, subsidy_details";

fn location_from_row(row: &Row<'_>) -> rusqlite::Result<LocationRecord> {
    let subsidy_available: Option<bool> = row.get(6)?;
    let subsidy_details = match subsidy_available {
        Some(available) => Some(SubsidyDetails {
            available,
            summary: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            details: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        }),
        None => None,
    };
    Ok(LocationRecord {
        city: row.get(0)?,
        avg_rainfall_mm: row.get(1)?,
        recharge_efficiency_percent: row.get(2)?,
        runoff_coefficient: row.get(3)?,
        soil_type: row.get(4)?,
        avg_depth_to_water_table_meters: row.get(5)?,
        subsidy_details,
    })
}

impl Database {
    /// Look up one city, ignoring case.
    pub fn query_location(&self, city: &str) -> anyhow::Result<Option<LocationRecord>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM locations WHERE city = ?1", LOCATION_COLUMNS);
        let record = conn
            .query_row(&sql, params![city.trim()], location_from_row)
            .optional()?;
        log::debug!(
            "[RWH] query: query_location('{}') found={}",
            city,
            record.is_some()
        );
        Ok(record)
    }

    /// All stored records, ordered by city.
    pub fn query_all_locations(&self) -> anyhow::Result<Vec<LocationRecord>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM locations ORDER BY city", LOCATION_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], location_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[RWH] query: query_all_locations returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// City names, ordered.
    pub fn stored_cities(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT city FROM locations ORDER BY city")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    pub fn count_locations(&self) -> anyhow::Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl LocationSource for Database {
    fn find_location(&self, city: &str) -> anyhow::Result<Option<LocationRecord>> {
        self.query_location(city)
    }

    fn cities(&self) -> anyhow::Result<Vec<String>> {
        self.stored_cities()
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use rwh_core::location::LocationSource;

    fn seeded() -> Database {
        let db = Database::new().unwrap();
        db.load_locations_json(
            r#"[
            {"city": "Mumbai", "avg_rainfall_mm": 2200, "recharge_efficiency_percent": 80,
             "soil_type": "Clayey loam", "avg_depth_to_water_table_meters": 8,
             "subsidy_details": {"available": true, "summary": "Tax rebate", "details": "Plots above 1000 m2"}},
            {"city": "Kolkata", "avg_rainfall_mm": 1600, "recharge_efficiency_percent": 70,
             "soil_type": "Alluvial clay", "avg_depth_to_water_table_meters": 10},
            {"city": "Ahmedabad", "avg_rainfall_mm": 780, "runoff_coefficient": 0.8}
        ]"#,
        )
        .unwrap();
        db
    }

    #[test]
    fn query_location_ignores_case() {
        let db = seeded();
        let a = db.query_location("Mumbai").unwrap().unwrap();
        let b = db.query_location("mUMBAI").unwrap().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.city, "Mumbai");
    }

    #[test]
    fn query_location_is_exact_not_substring() {
        let db = seeded();
        assert!(db.query_location("Mum").unwrap().is_none());
        assert!(db.query_location("Mumbai West").unwrap().is_none());
    }

    #[test]
    fn query_location_trims_input() {
        let db = seeded();
        assert!(db.query_location("  kolkata ").unwrap().is_some());
    }

    #[test]
    fn subsidy_round_trips_through_columns() {
        let db = seeded();
        let mumbai = db.find_location("mumbai").unwrap().unwrap();
        let subsidy = mumbai.subsidy_details.expect("Mumbai has subsidy details");
        assert!(subsidy.available);
        assert_eq!(subsidy.summary, "Tax rebate");

        let kolkata = db.find_location("Kolkata").unwrap().unwrap();
        assert!(kolkata.subsidy_details.is_none());
    }

    #[test]
    fn missing_numeric_fields_come_back_as_none() {
        let db = seeded();
        let r = db.find_location("Ahmedabad").unwrap().unwrap();
        assert_eq!(r.recharge_efficiency_percent, None);
        assert_eq!(r.runoff_coefficient, Some(0.8));
        assert_eq!(r.avg_depth_to_water_table_meters, None);
        assert_eq!(r.soil_type, None);
    }

    #[test]
    fn all_locations_ordered_by_city() {
        let db = seeded();
        let all = db.query_all_locations().unwrap();
        let names: Vec<_> = all.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(names, vec!["Ahmedabad", "Kolkata", "Mumbai"]);
        assert_eq!(db.cities().unwrap(), vec!["Ahmedabad", "Kolkata", "Mumbai"]);
    }

    #[test]
    fn empty_store_misses() {
        let db = Database::new().unwrap();
        assert!(db.find_location("Delhi").unwrap().is_none());
        assert!(db.cities().unwrap().is_empty());
    }
}
