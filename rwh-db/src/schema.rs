//! SQL schema for the location store.

/// Returns the full SQL schema as a single batch string.
///
/// `city` uses `COLLATE NOCASE`, so both the primary key and equality
/// lookups are case-insensitive. Numeric columns are nullable; incomplete
/// rows are loaded as-is and rejected at calculation time. The three
/// `subsidy_*` columns flatten the optional subsidy object and are NULL
/// when a city has none.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS locations (
        city TEXT PRIMARY KEY COLLATE NOCASE,
        avg_rainfall_mm REAL,
        recharge_efficiency_percent REAL,
        runoff_coefficient REAL,
        soil_type TEXT,
        avg_depth_to_water_table_meters REAL,
        subsidy_available INTEGER,
        subsidy_summary TEXT,
        subsidy_details TEXT
    );
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_locations_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='locations'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "Table 'locations' should exist");
    }

    #[test]
    fn city_key_is_case_insensitive() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute("INSERT INTO locations (city) VALUES ('Delhi')", [])
            .unwrap();
        let dup = conn.execute("INSERT INTO locations (city) VALUES ('DELHI')", []);
        assert!(dup.is_err(), "Primary key should collide ignoring case");
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
