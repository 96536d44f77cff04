use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use nbpx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for nbpx::AppCommand {
    fn from(cmd: Commands) -> nbpx::AppCommand {
        match cmd {
            Commands::Convert {
                source,
                destination,
                amount,
            } => nbpx::AppCommand::Convert {
                source,
                destination,
                amount,
            },
            Commands::Rates => nbpx::AppCommand::Rates,
            Commands::Interactive => nbpx::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount, e.g. `convert USD EUR 10,5`
    Convert {
        /// Source currency code or full label
        source: String,
        /// Destination currency code or full label
        destination: String,
        /// Amount to convert, a decimal comma is accepted
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// List the current exchange rates
    Rates,
    /// Convert repeatedly in a prompt loop
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => nbpx::cli::setup::setup(),
        Some(cmd) => nbpx::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
