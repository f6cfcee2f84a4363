//! Config command implementation
//!
//! Utilities for inspecting and mutating settings.

use clap::{Parser, Subcommand};

use crate::launch_agent::SystemLoginItems;
use crate::localization::{localized, Language};
use crate::settings::{ComponentKind, JsonFileStore, SettingKey, Settings, SettingsStore};

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the current value of a setting
    Get {
        /// Setting key, e.g. timeZoneIdentifier
        key: String,
    },
    /// Change a setting
    Set {
        /// Setting key, e.g. timeZoneIdentifier
        key: String,
        /// New value; componentOrder takes a comma-separated tag list
        value: String,
    },
    /// Flip a boolean setting
    Toggle {
        /// Setting key, e.g. showFlag
        key: String,
    },
    /// Swap two positions in the component order
    Reorder {
        from: usize,
        to: usize,
    },
    /// Dump all settings to stdout
    Dump {
        /// Output format: json or toml
        #[arg(short, long, default_value = "json")]
        format: String,
    },
    /// Show configuration file paths
    Path,
}

/// Run the config command
pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Get { key } => get(&key),
        ConfigCommand::Set { key, value } => set(&key, &value),
        ConfigCommand::Toggle { key } => toggle(&key),
        ConfigCommand::Reorder { from, to } => reorder(from, to),
        ConfigCommand::Dump { format } => dump(&format),
        ConfigCommand::Path => show_paths(),
    }
}

fn parse_key(key: &str) -> anyhow::Result<SettingKey> {
    SettingKey::all()
        .into_iter()
        .find(|k| k.storage_key() == key)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown setting '{}'. Known settings: {}",
                key,
                SettingKey::all()
                    .iter()
                    .map(|k| k.storage_key())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
}

fn get(key: &str) -> anyhow::Result<()> {
    let key = parse_key(key)?;
    let store = SettingsStore::open_default()?;
    let settings = store.settings();

    match key {
        SettingKey::TimeZoneIdentifier => println!("{}", settings.time_zone_identifier),
        SettingKey::TimeZoneNickname => println!("{}", settings.time_zone_nickname),
        SettingKey::ShowFlag => println!("{}", settings.show_flag),
        SettingKey::ShowTimeDifference => println!("{}", settings.show_time_difference),
        SettingKey::ComponentOrder => println!("{}", order_tags(&settings.component_order)),
        SettingKey::TimeDifferenceLastIndex => {
            println!("{}", settings.time_difference_last_index)
        }
        SettingKey::SelectedLanguage => println!("{}", settings.selected_language.tag()),
        SettingKey::LaunchAtLogin => println!("{}", settings.launch_at_login),
        SettingKey::ShowSettingsWindowAtStartup => {
            println!("{}", settings.show_settings_window_at_startup)
        }
        SettingKey::AutomaticallyCheckForUpdates => {
            println!("{}", settings.automatically_check_for_updates)
        }
        SettingKey::AutomaticallyDownloadUpdates => {
            println!("{}", settings.automatically_download_updates)
        }
    }
    Ok(())
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let key = parse_key(key)?;
    let mut store = SettingsStore::open_default()?;

    match key {
        SettingKey::TimeZoneIdentifier => {
            store.set_time_zone_identifier(value.to_string());
        }
        SettingKey::TimeZoneNickname => {
            store.set_time_zone_nickname(value.to_string());
        }
        SettingKey::ShowFlag => store.set_show_flag(parse_bool(value)?),
        SettingKey::ShowTimeDifference => {
            store.set_show_time_difference(parse_bool(value)?);
        }
        SettingKey::ComponentOrder => {
            store.set_component_order(parse_order(value)?);
            println!("Order is now: {}", order_tags(&store.settings().component_order));
        }
        SettingKey::TimeDifferenceLastIndex => {
            anyhow::bail!("timeDifferenceLastIndex is managed by the showTimeDifference toggle")
        }
        SettingKey::SelectedLanguage => {
            let language = Language::from_tag(value).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown language '{}'. Known languages: {}",
                    value,
                    Language::all()
                        .iter()
                        .map(|l| l.tag())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?;
            store.set_selected_language(language);
            println!(
                "{}: {}",
                localized(language, "settings.language"),
                language.display_name()
            );
            // The running menubar loop keeps its strings until restarted.
            println!(
                "{}: {}",
                localized(language, "alert.restart.title"),
                localized(language, "alert.restart.message")
            );
        }
        SettingKey::LaunchAtLogin => {
            let enabled = parse_bool(value)?;
            if let Err(e) = store.set_launch_at_login(enabled, &SystemLoginItems) {
                anyhow::bail!("{}", e);
            }
        }
        SettingKey::ShowSettingsWindowAtStartup => {
            store.set_show_settings_window_at_startup(parse_bool(value)?);
        }
        SettingKey::AutomaticallyCheckForUpdates => {
            store.set_automatically_check_for_updates(parse_bool(value)?);
        }
        SettingKey::AutomaticallyDownloadUpdates => {
            store.set_automatically_download_updates(parse_bool(value)?);
        }
    }
    Ok(())
}

fn toggle(key: &str) -> anyhow::Result<()> {
    let key = parse_key(key)?;
    let mut store = SettingsStore::open_default()?;
    let settings = store.settings().clone();

    let new_value = match key {
        SettingKey::ShowFlag => {
            store.set_show_flag(!settings.show_flag);
            !settings.show_flag
        }
        SettingKey::ShowTimeDifference => {
            store.set_show_time_difference(!settings.show_time_difference);
            !settings.show_time_difference
        }
        SettingKey::LaunchAtLogin => {
            let enabled = !settings.launch_at_login;
            if let Err(e) = store.set_launch_at_login(enabled, &SystemLoginItems) {
                anyhow::bail!("{}", e);
            }
            enabled
        }
        SettingKey::ShowSettingsWindowAtStartup => {
            store.set_show_settings_window_at_startup(!settings.show_settings_window_at_startup);
            !settings.show_settings_window_at_startup
        }
        SettingKey::AutomaticallyCheckForUpdates => {
            store.set_automatically_check_for_updates(!settings.automatically_check_for_updates);
            !settings.automatically_check_for_updates
        }
        SettingKey::AutomaticallyDownloadUpdates => {
            store.set_automatically_download_updates(!settings.automatically_download_updates);
            !settings.automatically_download_updates
        }
        other => anyhow::bail!("'{}' is not a boolean setting", other.storage_key()),
    };

    println!("{} = {}", key.storage_key(), new_value);
    Ok(())
}

fn reorder(from: usize, to: usize) -> anyhow::Result<()> {
    let mut store = SettingsStore::open_default()?;
    if !store.reorder(from, to) {
        anyhow::bail!(
            "Invalid positions {} and {}; the order has {} components",
            from,
            to,
            store.settings().component_order.len()
        );
    }
    println!("Order is now: {}", order_tags(&store.settings().component_order));
    Ok(())
}

/// Dump configuration to stdout
fn dump(format: &str) -> anyhow::Result<()> {
    let store = SettingsStore::open_default()?;
    let settings: &Settings = store.settings();

    match format.to_lowercase().as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(settings)?;
            println!("{}", json);
        }
        "toml" => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        _ => {
            anyhow::bail!("Unknown format '{}'. Supported formats: json, toml", format);
        }
    }

    Ok(())
}

/// Show configuration file paths
fn show_paths() -> anyhow::Result<()> {
    println!("Configuration paths:");

    if let Some(path) = JsonFileStore::default_path() {
        let exists = if path.exists() { "" } else { " (not found)" };
        println!("  Settings: {}{}", path.display(), exists);
    } else {
        println!("  Settings: (could not determine path)");
    }

    if let Some(config_dir) = dirs::config_dir() {
        let timebar_dir = config_dir.join("TimeBar");
        println!();
        println!("Config directory: {}", timebar_dir.display());
    }

    Ok(())
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => anyhow::bail!("Expected a boolean, got '{}'", value),
    }
}

fn parse_order(value: &str) -> anyhow::Result<Vec<ComponentKind>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| {
            ComponentKind::from_tag(tag).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown component '{}'. Known components: {}",
                    tag,
                    ComponentKind::all()
                        .iter()
                        .map(|k| k.tag())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
        })
        .collect()
}

fn order_tags(order: &[ComponentKind]) -> String {
    order.iter().map(|k| k.tag()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("ON").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn parse_order_maps_tags() {
        let order = parse_order("time, flag").unwrap();
        assert_eq!(order, vec![ComponentKind::Time, ComponentKind::Flag]);
        assert!(parse_order("time,bogus").is_err());
    }

    #[test]
    fn parse_key_rejects_unknown_keys() {
        assert!(parse_key("timeZoneIdentifier").is_ok());
        assert!(parse_key("noSuchKey").is_err());
    }
}
