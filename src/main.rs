// Entry point for the avif-converter CLI.
// The library crate holds all conversion logic; this file wires up logging,
// configuration and output.

mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use avif_converter::commands::{
    batch_convert, convert_image, image_info, render_batch_summary, render_conversion,
    render_formats, render_info,
};
use avif_converter::core::{ConfigOverrides, ConverterConfig};
use avif_converter::processing::default_encoder;
use avif_converter::utils::list_supported_formats;
use cli::{Cli, Commands};

/// Exit status when `batch --strict` saw at least one failed file.
const EXIT_PARTIAL_FAILURE: u8 = 2;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("avif_converter={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Defaults, then the config file, then command-line flags.
fn resolve_config(config_file: Option<&Path>, overrides: ConfigOverrides) -> Result<ConverterConfig> {
    let mut config = ConverterConfig::load_or_default(config_file)?;
    config.apply(overrides);
    config.validate()?;
    debug!("Resolved config: {:?}", config);
    Ok(config)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config_file = cli.config_file.as_deref();
    let overrides = cli.command.overrides();

    match cli.command {
        Commands::Convert { input, output, json, .. } => {
            let config = resolve_config(config_file, overrides)?;
            let encoder = default_encoder()?;
            let result = convert_image(&config, encoder, &input, &output).await?;
            if json {
                print_json(&result)?;
            } else {
                print!("{}", render_conversion(&result));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Batch {
            input_dir,
            output_dir,
            json,
            strict,
            ..
        } => {
            let config = resolve_config(config_file, overrides)?;
            let encoder = default_encoder()?;
            let result = batch_convert(&config, encoder, &input_dir, &output_dir).await?;
            if json {
                print_json(&result)?;
            } else {
                print!("{}", render_batch_summary(&result));
            }

            if strict && result.failed > 0 {
                return Ok(ExitCode::from(EXIT_PARTIAL_FAILURE));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Formats { json } => {
            let formats = list_supported_formats();
            if json {
                print_json(&formats)?;
            } else {
                print!("{}", render_formats(&formats));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Info { image, json } => {
            let encoder = default_encoder()?;
            let info = image_info(encoder, &image).await?;
            if json {
                print_json(&info)?;
            } else {
                print!("{}", render_info(&info));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
