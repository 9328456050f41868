mod commands;
mod logging;

use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use tracing::{error, warn};
use zipdiff_core::{AppConfig, DiffEngine, LocalDirProvider, Validation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match zipdiff_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Diff { left, right }) => match run_diff(config, left, right) {
            Ok(valid) => {
                if !valid {
                    process::exit(1);
                }
            }
            Err(err) => {
                error!("Error: {}", err);
                process::exit(1);
            }
        },
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_diff(
    mut config: AppConfig,
    left: Option<String>,
    right: Option<String>,
) -> Result<bool, Box<dyn std::error::Error>> {
    if let (Some(left), Some(right)) = (left, right) {
        config.resources = vec![left, right];
    }

    let engine = DiffEngine::new(config);
    let validation = engine.validate(&LocalDirProvider)?;
    render(&validation);

    Ok(validation.valid)
}

fn render(validation: &Validation) {
    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    println!(
        "{} added, {} removed, {} changed, {} unchanged, {} filtered in {:.2}s",
        format!("{}", validation.diff.added.len()).green(),
        format!("{}", validation.diff.removed.len()).red(),
        format!("{}", validation.diff.changed.len()).yellow(),
        format!("{}", validation.diff.unchanged.len()).normal(),
        format!("{}", validation.diff.filtered.len()).dimmed(),
        validation.duration.as_secs_f64(),
    );

    if validation.valid {
        println!("{}", "PASS".green().bold());
    } else {
        println!("{}", "FAIL".red().bold());
        for fail in &validation.fails {
            println!("  {}", format!("{fail}").red());
        }
    }
}
