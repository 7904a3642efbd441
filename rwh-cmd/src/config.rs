//! Location store and subsidy settings shared by `serve` and `calculate`.

use clap::Args;
use rwh_core::dataset::BundledDataset;
use rwh_core::resolver::LocationResolver;
use rwh_core::service::HarvestService;
use rwh_core::subsidy::SubsidyPolicy;
use rwh_db::Database;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// SQLite database file (or sqlite:// URL) of the primary location store
    #[arg(short = 'd', long, env = "DATABASE_URL")]
    pub database: Option<String>,

    /// JSON file of the fallback dataset (embedded dataset when omitted)
    #[arg(long, env = "LOCATIONS_DATA")]
    pub dataset: Option<PathBuf>,

    /// Subsidy information source: `location` or `tiered`
    #[arg(long, env = "SUBSIDY_POLICY", default_value = "location")]
    pub subsidy_policy: SubsidyPolicy,
}

/// Strip an optional `sqlite://` or `sqlite:` scheme from a database URL.
pub fn sqlite_path(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

impl StoreArgs {
    /// Build the service for these settings.
    ///
    /// A database that cannot be opened is logged and skipped; the service
    /// then answers from the fallback dataset alone.
    pub fn build_service(&self) -> HarvestService {
        let fallback = match &self.dataset {
            Some(path) => BundledDataset::from_path(path),
            None => BundledDataset::embedded(),
        };
        let mut resolver = LocationResolver::new(fallback);

        match self.database.as_deref().map(sqlite_path) {
            Some(path) => match Database::open(path) {
                Ok(db) => resolver = resolver.with_primary(Arc::new(db)),
                Err(e) => log::error!(
                    "Failed to open location database {}: {:#}. Serving from fallback dataset only.",
                    path,
                    e
                ),
            },
            None => log::warn!("No DATABASE_URL configured. Serving from fallback dataset only."),
        }

        log::info!("Subsidy policy: {}", self.subsidy_policy);
        HarvestService::new(resolver, self.subsidy_policy)
    }
}
