//! TimeBar - menu-bar clock for a configurable world time zone
//!
//! Renders a configurable clock label in the menu-bar style:
//! - Live status line in the terminal (via `timebar menubar`)
//! - One-shot label printing for scripting (default command)
//! - Settings, login-item and update management from the CLI

mod cli;
mod flags;
mod label;
mod launch_agent;
mod localization;
mod logging;
mod menubar;
mod settings;
mod single_instance;
mod updater;
mod zone;

use clap::Parser;
use cli::{exit_codes, Cli, Commands};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    // An explicit --log-level beats the built-in default filter.
    if let Some(ref level) = cli.log_level {
        if std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", format!("timebar={}", level));
        }
    }

    // Initialize logging
    if let Err(e) = logging::init(cli.verbose, cli.json_output, cli.no_color) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    // Create tokio runtime for async commands
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {}", e);
            return exit_codes::UNEXPECTED_FAILURE;
        }
    };

    match cli.command {
        Some(Commands::Label(args)) => rt.block_on(async {
            match cli::label::run(args).await {
                Ok(()) => exit_codes::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    categorize_error(&e)
                }
            }
        }),
        Some(Commands::Menubar) => {
            // Check for existing instance
            let _guard = match single_instance::SingleInstanceGuard::try_acquire() {
                Some(guard) => guard,
                None => {
                    eprintln!("TimeBar is already running.");
                    return exit_codes::SUCCESS; // Not an error, just exit gracefully
                }
            };

            rt.block_on(async {
                match menubar::run().await {
                    Ok(()) => exit_codes::SUCCESS,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        exit_codes::UNEXPECTED_FAILURE
                    }
                }
            })
        }
        Some(Commands::Config(args)) => rt.block_on(async {
            match cli::config::run(args).await {
                Ok(()) => exit_codes::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    categorize_error(&e)
                }
            }
        }),
        Some(Commands::Autostart(args)) => rt.block_on(async {
            match cli::autostart::run(args).await {
                Ok(()) => exit_codes::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    exit_codes::UNEXPECTED_FAILURE
                }
            }
        }),
        Some(Commands::Update(args)) => rt.block_on(async {
            match cli::update::run(args).await {
                Ok(()) => exit_codes::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    exit_codes::UNEXPECTED_FAILURE
                }
            }
        }),
        Some(Commands::Timezones(args)) => rt.block_on(async {
            match cli::timezones::run(args).await {
                Ok(()) => exit_codes::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    exit_codes::UNEXPECTED_FAILURE
                }
            }
        }),
        None => {
            // Default: run label command with args from top-level CLI
            let args = cli.to_label_args();
            rt.block_on(async {
                match cli::label::run(args).await {
                    Ok(()) => exit_codes::SUCCESS,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        categorize_error(&e)
                    }
                }
            })
        }
    }
}

/// Categorize an error into the appropriate exit code
fn categorize_error(e: &anyhow::Error) -> i32 {
    let msg = e.to_string().to_lowercase();

    if msg.contains("unknown") || msg.contains("invalid") || msg.contains("not a boolean") {
        exit_codes::INVALID_ARGUMENT
    } else if msg.contains("parse") || msg.contains("expected") {
        exit_codes::PARSE_ERROR
    } else {
        exit_codes::UNEXPECTED_FAILURE
    }
}
