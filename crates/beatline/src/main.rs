//! Beatline CLI binary.
//!
//! This binary provides command-line access to Beatline's functionality:
//! - Validate scripts before shipping them
//! - Play scripts in the terminal
//! - List the clip graph

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, play_script, print_graph, validate_script};

    // Load .env so API keys for the remote analyzer are picked up
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    if cli.otel {
        beatline::init_telemetry("beatline-cli")?;
    } else {
        let log_level = if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_target(false)
            .init();
    }

    let config = cli.config.as_deref();

    // Execute the requested command
    let result = match cli.command {
        Commands::Validate {
            script,
            characters,
            analyzer,
        } => match validate_script(&script, &characters, analyzer, config) {
            Ok(true) => Ok(()),
            Ok(false) => {
                if cli.otel {
                    beatline::shutdown_telemetry();
                }
                std::process::exit(1);
            }
            Err(e) => Err(e),
        },

        Commands::Play {
            script,
            analyzer,
            pace,
        } => play_script(&script, analyzer, pace, config).await,

        Commands::Graph { script } => print_graph(&script),
    };

    if cli.otel {
        beatline::shutdown_telemetry();
    }

    result?;
    Ok(())
}
