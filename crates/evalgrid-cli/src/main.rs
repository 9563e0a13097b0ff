use clap::{Parser, Subcommand};
use evalgrid_client::{ApiClient, ClientConfig, ListCache};
use evalgrid_core::PageArgs;
use std::process;
use tracing::{error, info};
use uuid::Uuid;

mod cmd;
mod reports;
mod sheets;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Evaluation backend URL
    #[arg(global = true, long, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(global = true, long, default_value_t = 0)]
    skip: u32,

    #[arg(global = true, long, default_value_t = 100)]
    limit: u32,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List employees (the expert pool)
    Employees(cmd::employees::EmployeesArgs),
    /// List departments
    Departments(cmd::departments::DepartmentsArgs),
    /// List metric definitions, or push updated ones
    Metrics(cmd::metrics::MetricsArgs),
    /// Assign metrics to an expert for a year/quarter
    Assign(cmd::assign::AssignArgs),
    /// Edit and save an expert's score grid
    Score(cmd::score::ScoreArgs),
    /// Render an aggregate report
    Report(cmd::report::ReportArgs),
    /// Export a report to a file
    Export(cmd::export::ExportArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let run_id = format!(
        "run-{}",
        Uuid::new_v4().to_string().split('-').next().unwrap()
    );
    info!("🚀 evalgrid {} → {}", run_id, cli.base_url);

    let client = ApiClient::new(ClientConfig::builder().base_url(cli.base_url).build());
    let mut cache = ListCache::new(PageArgs {
        skip: cli.skip,
        limit: cli.limit,
    });

    let outcome = match cli.command {
        Commands::Employees(args) => cmd::employees::run(args, &client, &mut cache).await,
        Commands::Departments(args) => cmd::departments::run(args, &client, &mut cache).await,
        Commands::Metrics(args) => cmd::metrics::run(args, &client, &mut cache).await,
        Commands::Assign(args) => cmd::assign::run(args, &client, &mut cache).await,
        Commands::Score(args) => cmd::score::run(args, &client, &mut cache).await,
        Commands::Report(args) => cmd::report::run(args, &client, &mut cache).await,
        Commands::Export(args) => cmd::export::run(args, &client, &mut cache).await,
    };

    if let Err(e) = outcome {
        error!("❌ {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
