//! Command implementations for the RWH CLI.
//!
//! Provides subcommands for serving the calculator over HTTP, seeding the
//! SQLite location store, and running a single calculation from the shell.

use clap::Subcommand;
use std::net::IpAddr;
use std::path::PathBuf;

pub mod calculate;
pub mod config;
pub mod seed;
pub mod server;

use config::StoreArgs;

#[derive(Subcommand)]
pub enum Command {
    /// Serve the calculator JSON API (and optionally a static frontend)
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
        port: u16,

        /// Directory of static frontend files, served with index.html fallback
        #[arg(long, env = "STATIC_DIR")]
        static_dir: Option<PathBuf>,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Replace the contents of the SQLite location store with a JSON dataset
    Seed {
        /// SQLite database file (or sqlite:// URL) to seed
        #[arg(short = 'd', long, env = "DATABASE_URL")]
        database: String,

        /// JSON dataset to load (embedded dataset when omitted)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Run one calculation and print the result as JSON
    Calculate {
        /// City name (case-insensitive)
        #[arg(short = 'l', long)]
        location: String,

        /// Roof area in square metres
        #[arg(short = 'a', long)]
        roof_area: f64,

        /// Number of people in the household
        #[arg(short = 'n', long)]
        dwellers: u32,

        #[command(flatten)]
        store: StoreArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            host,
            port,
            static_dir,
            store,
        } => {
            let service = store.build_service();
            server::run_server(host, port, static_dir, service).await
        }
        Command::Seed { database, data } => seed::run_seed(&database, data.as_deref()),
        Command::Calculate {
            location,
            roof_area,
            dwellers,
            store,
        } => {
            let service = store.build_service();
            calculate::run_calculate(&service, &location, roof_area, dwellers)
        }
    }
}
