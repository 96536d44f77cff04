pub mod cli;
pub mod core;
pub mod providers;
pub mod rates;
pub mod store;

use crate::cli::ui;
use crate::core::config::AppConfig;
use crate::core::rate::RateTable;
use crate::providers::NbpProvider;
use crate::rates::RateProvider;
use crate::store::DiskSnapshot;
use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Convert {
        source: String,
        destination: String,
        amount: String,
    },
    Rates,
    Interactive,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Loads the session rate table: live NBP rates, else the cached snapshot.
pub async fn load_rates(config: &AppConfig) -> Result<RateTable> {
    let provider = RateProvider::new(
        NbpProvider::from_config(&config.provider),
        DiskSnapshot::new(&config.cache_path),
        config.base_currency.clone(),
    );

    let spinner = ui::new_spinner("Fetching NBP exchange rates...");
    let table = provider.load().await;
    spinner.finish_and_clear();

    let table = table?;
    info!(
        origin = ?table.origin(),
        currencies = table.len(),
        "Rate table ready"
    );
    Ok(table)
}

/// Runs `command` and returns what should be printed to stdout.
pub async fn execute(command: AppCommand, config: &AppConfig) -> Result<String> {
    let table = load_rates(config).await?;

    match command {
        AppCommand::Convert {
            source,
            destination,
            amount,
        } => {
            let result = cli::convert::convert(&table, &source, &destination, &amount)?;
            Ok(result.to_string())
        }
        AppCommand::Rates => Ok(cli::rates::display_as_table(&table)),
        AppCommand::Interactive => {
            println!(
                "{}",
                ui::style_text(&cli::rates::describe_origin(&table), ui::StyleType::Subtle)
            );
            cli::interactive::run(&table)?;
            Ok(String::new())
        }
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("nbpx starting...");
    let config = load_config(config_path)?;

    let output = execute(command, &config).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
