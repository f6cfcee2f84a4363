//! CLI module - command-line interface
//!
//! - `timebar` - defaults to the label command
//! - `timebar label` - print the composed menu-bar label once
//! - `timebar menubar` - run the live menu-bar loop in the terminal
//! - `timebar config` - inspect and mutate settings
//! - `timebar autostart` - manage login-item registration
//! - `timebar update` - check GitHub for a newer release
//! - `timebar timezones` - list known time-zone identifiers

pub mod autostart;
pub mod config;
pub mod label;
pub mod timezones;
pub mod update;

use clap::{Parser, Subcommand};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    pub const INVALID_ARGUMENT: i32 = 2;
    pub const PARSE_ERROR: i32 = 3;
}

/// Version string with build metadata, e.g. "1.6.3 (a1b2c3d 2026-08-06)".
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT"),
    " ",
    env!("BUILD_DATE"),
    ")"
);

/// TimeBar - Menu-bar clock for a configurable world time zone
///
/// Renders a configurable clock label (flag, time, time difference,
/// day/night glyph) for a chosen IANA time zone.
/// Defaults to the label command when no subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "timebar")]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    // === Global flags ===

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit machine-readable logs (JSON) to stderr
    #[arg(long = "json-output", global = true)]
    pub json_output: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", global = true, value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,

    /// Disable ANSI colors in output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Top-level args for the default label command ===

    /// Print the label fragments as JSON
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the composed label once (default command)
    Label(label::LabelArgs),

    /// Run the live menu-bar loop in the terminal
    Menubar,

    /// Inspect and mutate settings
    Config(config::ConfigArgs),

    /// Manage start-at-login registration
    Autostart(autostart::AutostartArgs),

    /// Check GitHub for a newer release
    Update(update::UpdateArgs),

    /// List known IANA time-zone identifiers
    Timezones(timezones::TimezonesArgs),
}

impl Cli {
    /// Convert top-level args to LabelArgs for default command
    pub fn to_label_args(&self) -> label::LabelArgs {
        label::LabelArgs {
            json: self.json,
            pretty: self.pretty,
        }
    }
}
