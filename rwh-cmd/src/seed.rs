//! Seeding the SQLite location store.

use crate::config::sqlite_path;
use log::info;
use rwh_core::dataset::EMBEDDED_LOCATIONS_JSON;
use rwh_db::Database;
use std::path::Path;

/// Replace the store's contents with `data` (or the embedded dataset).
pub fn run_seed(database: &str, data: Option<&Path>) -> anyhow::Result<()> {
    let json = match data {
        Some(path) => {
            info!("Reading locations from {}", path.display());
            std::fs::read_to_string(path)?
        }
        None => {
            info!("Using embedded locations dataset");
            EMBEDDED_LOCATIONS_JSON.to_string()
        }
    };

    let db = Database::open(sqlite_path(database))?;
    let inserted = db.load_locations_json(&json)?;
    info!("Seed complete. {} locations written to {}", inserted, database);
    Ok(())
}
