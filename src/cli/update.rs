//! Update command implementation
//!
//! One-shot check against GitHub releases.

use clap::Args;

use crate::localization::localized;
use crate::settings::SettingsStore;
use crate::updater;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Check even when automatic update checks are disabled
    #[arg(long)]
    pub force: bool,
}

pub async fn run(args: UpdateArgs) -> anyhow::Result<()> {
    let store = SettingsStore::open_default()?;
    let settings = store.settings();

    if !args.force && !updater::automatically_checks_for_updates(settings) {
        println!("Automatic update checks are disabled. Use --force to check anyway.");
        return Ok(());
    }

    let language = settings.selected_language;
    println!("Current version: {}", updater::current_version());

    match updater::check_for_updates(settings).await {
        Some(info) => {
            println!("{}: {}", localized(language, "update.available"), info.version);
            println!("Release page: {}", info.release_url);
            if let Some(url) = info.download_url {
                println!("Download: {}", url);
            }
            if !info.release_notes.is_empty() {
                println!();
                println!("{}", info.release_notes);
            }
        }
        None => {
            println!("{}", localized(language, "update.up_to_date"));
        }
    }

    Ok(())
}
