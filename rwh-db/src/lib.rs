//! SQLite persistent store for per-city rainfall and soil data.
//!
//! This crate is the primary location source of the calculator. It can be
//! opened on a file (the normal deployment) or in memory (tests), seeded
//! from the same JSON format as the bundled dataset, and queried by
//! case-insensitive city name through [`rwh_core::location::LocationSource`].
//!
//! # Usage
//!
//! ```rust
//! use rwh_core::location::LocationSource;
//! use rwh_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_locations_json(r#"[{"city": "Delhi", "avg_rainfall_mm": 790, "recharge_efficiency_percent": 75}]"#).unwrap();
//!
//! let record = db.find_location("delhi").unwrap().unwrap();
//! assert_eq!(record.city, "Delhi");
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `locations` - one row per city, keyed case-insensitively

pub mod schema;
mod loader;
mod queries;

use anyhow::anyhow;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// SQLite database holding location records.
///
/// Cheaply cloneable (via `Arc`) and shareable across request handler
/// threads; statements run one at a time behind a `Mutex`.
///
/// # Example
///
/// ```rust
/// use rwh_db::Database;
///
/// let db = Database::new().unwrap();
/// assert_eq!(db.count_locations().unwrap(), 0);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Open (or create) a database file and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        log::info!("[RWH] db: Opened {}", path.display());
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }
}
