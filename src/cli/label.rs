//! Label command implementation
//!
//! Composes the menu-bar label once and prints it.

use chrono::Utc;
use clap::Args;

use crate::label::{compose_label, derive_fragments, local_offset_secs};
use crate::settings::SettingsStore;

#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Print the label fragments as JSON
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: LabelArgs) -> anyhow::Result<()> {
    let store = SettingsStore::open_default()?;
    let settings = store.settings();

    let now = Utc::now();
    let local_offset = local_offset_secs();

    if args.json {
        let fragments = derive_fragments(settings, now, local_offset);
        let payload = serde_json::json!({
            "label": compose_label(settings, now, local_offset),
            "fragments": fragments,
        });
        let json = if args.pretty {
            serde_json::to_string_pretty(&payload)?
        } else {
            serde_json::to_string(&payload)?
        };
        println!("{}", json);
    } else {
        println!("{}", compose_label(settings, now, local_offset));
    }

    Ok(())
}
