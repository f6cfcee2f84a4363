//! Live menu-bar loop
//!
//! Renders the composed label as a terminal status line. Two triggers feed
//! one recompute path: a 1-second tick and the settings-change
//! subscription. External edits to the settings file are detected on the
//! tick and replayed through the store's setters, so the change arm sees
//! them like any in-process mutation.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Utc;
use crossbeam_channel::{select, tick};

use crate::label::{compose_label, local_offset_secs};
use crate::settings::{JsonFileStore, SettingKey, Settings, SettingsStore};
use crate::updater;

/// Keys whose change forces a label recompute.
const LABEL_KEYS: [SettingKey; 5] = [
    SettingKey::TimeZoneIdentifier,
    SettingKey::TimeZoneNickname,
    SettingKey::ShowFlag,
    SettingKey::ShowTimeDifference,
    SettingKey::ComponentOrder,
];

pub async fn run() -> anyhow::Result<()> {
    let mut store = SettingsStore::open_default()?;
    let subscription = store.subscribe();

    if updater::automatically_checks_for_updates(store.settings()) {
        if let Some(info) = updater::check_for_updates(store.settings()).await {
            tracing::info!("Update available: {}", info.version);
            eprintln!(
                "A new version of TimeBar is available: {} ({})",
                info.version, info.release_url
            );
        }
    }

    let settings_path = JsonFileStore::default_path();
    let mut last_modified = settings_path.as_deref().and_then(modified_at);

    render(store.settings())?;

    let ticker = tick(Duration::from_secs(1));
    loop {
        select! {
            recv(ticker) -> _ => {
                if let Some(modified) = check_for_file_change(&settings_path, &mut last_modified) {
                    last_modified = Some(modified);
                    sync_from_disk(&mut store);
                }
                render(store.settings())?;
            }
            recv(subscription.receiver) -> msg => {
                match msg {
                    Ok(key) if LABEL_KEYS.contains(&key) => render(store.settings())?,
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        }
    }

    store.unsubscribe(subscription);
    Ok(())
}

fn render(settings: &Settings) -> anyhow::Result<()> {
    let label = compose_label(settings, Utc::now(), local_offset_secs());
    let mut stdout = std::io::stdout();
    write!(stdout, "\r\x1b[2K{}", label)?;
    stdout.flush()?;
    Ok(())
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).ok()?.modified().ok()
}

fn check_for_file_change(
    path: &Option<PathBuf>,
    last_modified: &mut Option<SystemTime>,
) -> Option<SystemTime> {
    let path = path.as_deref()?;
    let modified = modified_at(path);
    if modified != *last_modified {
        modified
    } else {
        None
    }
}

/// Replay label-relevant differences from the settings file through the
/// store's setters. Own writes settle after one cycle: the rewritten file
/// produces no further differences.
fn sync_from_disk(store: &mut SettingsStore) {
    let Some(path) = JsonFileStore::default_path() else {
        return;
    };
    let disk = SettingsStore::load(Box::new(JsonFileStore::open(path)));
    let disk = disk.settings().clone();
    let current = store.settings().clone();

    if disk.time_zone_identifier != current.time_zone_identifier {
        store.set_time_zone_identifier(disk.time_zone_identifier.clone());
    }
    if disk.time_zone_nickname != current.time_zone_nickname {
        store.set_time_zone_nickname(disk.time_zone_nickname.clone());
    }
    if disk.show_flag != current.show_flag {
        store.set_show_flag(disk.show_flag);
    }
    if disk.show_time_difference != current.show_time_difference {
        store.set_show_time_difference(disk.show_time_difference);
    }
    if disk.component_order != store.settings().component_order {
        store.set_component_order(disk.component_order);
    }
}
