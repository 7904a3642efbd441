//! RWH CLI - rooftop rainwater harvesting calculator and web server.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "rwh-cli",
    version,
    about = "Rainwater harvesting feasibility calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: rwh_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    rwh_cmd::run(cli.command).await
}
