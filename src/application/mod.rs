// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! This module contains the implementation of the `gmxprep` binary.

use clap::Parser;
use colored::Colorize;
use gmxprep::errors::ApplicationError;
use gmxprep::prelude::Prep;
use gmxprep::GMXPREP_VERSION;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Assemble a finalized Gromacs mdp file from a base configuration and overrides."
)]
pub struct Args {
    #[arg(
        help = "Config yaml file",
        long_help = "Configuration yaml file specifying the base mdp file, the parameter overrides and the output."
    )]
    pub config: String,
}

pub(crate) fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let config_str = std::fs::read_to_string(&args.config)
        .map_err(|_| ApplicationError::CouldNotReadConfig(args.config.clone()))?;
    let prep: Prep = serde_yaml::from_str(&config_str)
        .map_err(|e| ApplicationError::CouldNotParseConfig(args.config.clone(), e))?;

    if prep.silent() {
        colog::basic_builder()
            .filter(None, log::LevelFilter::Error)
            .init();
    } else {
        colog::init();
        let header = format!(">>> GMXPREP v{} <<<", GMXPREP_VERSION).bold();
        println!("\n{}\n", header);
        log::info!("Read config file '{}'.", args.config);
    }

    let result = prep.run().map_err(Box::from);

    if !prep.silent() {
        match &result {
            Ok(_) => {
                let prefix = format!(
                    "{}{}{}",
                    "[".to_string().blue().bold(),
                    "✔".to_string().bright_green().bold(),
                    "]".to_string().blue().bold()
                );
                let message = "ASSEMBLY COMPLETED".to_string().bright_green().bold();
                println!("{} {}", prefix, message);
            }
            Err(e) => {
                log::error!("{}", e);

                let prefix = format!(
                    "{}{}{}",
                    "[".to_string().blue().bold(),
                    "✖".to_string().red().bold(),
                    "]".to_string().blue().bold()
                );
                let message = "ASSEMBLY FAILED".to_string().red().bold();
                println!("{} {}", prefix, message);
            }
        }
    }

    result
}
