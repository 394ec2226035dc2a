use crate::report::{run_alert_report, run_catalog, AlertReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cronos::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Cronos",
    about = "Track expiry of occupational exams, NR trainings, and compliance documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify a CSV export against the due-soon windows
    Alerts {
        #[command(subcommand)]
        command: AlertsCommand,
    },
    /// Print the exam, training, and document catalog
    Catalog,
}

#[derive(Subcommand, Debug)]
enum AlertsCommand {
    /// Generate a bucketed expiry report and optional item listing
    Report(AlertReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV export used to seed the item source at startup
    #[arg(long, requires = "tenant")]
    pub(crate) items_csv: Option<PathBuf>,
    /// Tenant that owns the seeded items
    #[arg(long, requires = "items_csv")]
    pub(crate) tenant: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Alerts {
            command: AlertsCommand::Report(args),
        } => run_alert_report(args),
        Command::Catalog => run_catalog(),
    }
}
