//! Settings management for TimeBar
//!
//! Handles persistent configuration including:
//! - Time zone selection and nickname
//! - Label component visibility and ordering
//! - Launch-at-login and update preferences
//!
//! Every setter writes through to the backing store immediately and
//! notifies subscribers of the changed key. There is no batching.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::launch_agent::{LoginItemError, LoginItems};
use crate::localization::Language;

/// A single piece of the menu-bar label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Flag,
    Time,
    TimeDifference,
    DayNight,
}

impl ComponentKind {
    /// All kinds, in the default display order.
    pub fn all() -> [ComponentKind; 4] {
        [
            ComponentKind::Flag,
            ComponentKind::Time,
            ComponentKind::TimeDifference,
            ComponentKind::DayNight,
        ]
    }

    /// Stable tag used in the persisted `componentOrder` array.
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::Flag => "flag",
            ComponentKind::Time => "time",
            ComponentKind::TimeDifference => "timeDifference",
            ComponentKind::DayNight => "dayNight",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ComponentKind> {
        match tag {
            "flag" => Some(ComponentKind::Flag),
            "time" => Some(ComponentKind::Time),
            "timeDifference" => Some(ComponentKind::TimeDifference),
            "dayNight" => Some(ComponentKind::DayNight),
            _ => None,
        }
    }
}

/// Identifies a persisted setting. Subscribers receive the key that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    TimeZoneIdentifier,
    TimeZoneNickname,
    ShowFlag,
    ShowTimeDifference,
    ComponentOrder,
    TimeDifferenceLastIndex,
    SelectedLanguage,
    LaunchAtLogin,
    ShowSettingsWindowAtStartup,
    AutomaticallyCheckForUpdates,
    AutomaticallyDownloadUpdates,
}

impl SettingKey {
    /// Key name in the persisted store.
    pub fn storage_key(&self) -> &'static str {
        match self {
            SettingKey::TimeZoneIdentifier => "timeZoneIdentifier",
            SettingKey::TimeZoneNickname => "timeZoneNickname",
            SettingKey::ShowFlag => "showFlag",
            SettingKey::ShowTimeDifference => "showTimeDifference",
            SettingKey::ComponentOrder => "componentOrder",
            SettingKey::TimeDifferenceLastIndex => "timeDifferenceLastIndex",
            SettingKey::SelectedLanguage => "selectedLanguage",
            SettingKey::LaunchAtLogin => "launchAtLogin",
            SettingKey::ShowSettingsWindowAtStartup => "showSettingsWindowAtStartup",
            SettingKey::AutomaticallyCheckForUpdates => "automaticallyCheckForUpdates",
            SettingKey::AutomaticallyDownloadUpdates => "automaticallyDownloadUpdates",
        }
    }

    pub fn all() -> [SettingKey; 11] {
        [
            SettingKey::TimeZoneIdentifier,
            SettingKey::TimeZoneNickname,
            SettingKey::ShowFlag,
            SettingKey::ShowTimeDifference,
            SettingKey::ComponentOrder,
            SettingKey::TimeDifferenceLastIndex,
            SettingKey::SelectedLanguage,
            SettingKey::LaunchAtLogin,
            SettingKey::ShowSettingsWindowAtStartup,
            SettingKey::AutomaticallyCheckForUpdates,
            SettingKey::AutomaticallyDownloadUpdates,
        ]
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// IANA identifier of the displayed time zone
    pub time_zone_identifier: String,

    /// Optional nickname shown instead of the derived city name
    pub time_zone_nickname: String,

    /// Whether the country flag component is shown
    pub show_flag: bool,

    /// Whether the hour-difference component is shown
    pub show_time_difference: bool,

    /// Display order of the label components
    pub component_order: Vec<ComponentKind>,

    /// Position the time-difference component returns to when re-enabled
    pub time_difference_last_index: usize,

    /// UI language
    pub selected_language: Language,

    /// Whether the app registers itself as a login item
    pub launch_at_login: bool,

    /// Whether the settings window opens on launch
    pub show_settings_window_at_startup: bool,

    /// Whether to probe for new releases on startup
    pub automatically_check_for_updates: bool,

    /// Whether a found update may be fetched without asking
    pub automatically_download_updates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_zone_identifier: "Asia/Shanghai".to_string(),
            time_zone_nickname: String::new(),
            show_flag: true,
            show_time_difference: true,
            component_order: ComponentKind::all().to_vec(),
            time_difference_last_index: 2,
            selected_language: Language::Auto,
            launch_at_login: false,
            show_settings_window_at_startup: false,
            automatically_check_for_updates: true,
            automatically_download_updates: false,
        }
    }
}

/// Durable key-value storage. One value per setting key.
pub trait KvStore: Send {
    fn read(&self, key: &str) -> Option<Value>;
    fn write(&mut self, key: &str, value: Value);
}

/// Flat JSON object on disk, one entry per setting key.
pub struct JsonFileStore {
    path: PathBuf,
    map: serde_json::Map<String, Value>,
}

impl JsonFileStore {
    /// Default settings path under the user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("TimeBar").join("settings.json"))
    }

    /// Open the store at `path`, tolerating a missing or unreadable file.
    pub fn open(path: PathBuf) -> Self {
        let map = std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();
        Self { path, map }
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create config directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(&Value::Object(self.map.clone())) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!("Failed to save settings: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to serialize settings: {}", e);
            }
        }
    }
}

impl KvStore for JsonFileStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.map.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) {
        self.map.insert(key.to_string(), value);
        self.persist();
    }
}

/// In-memory store used by tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    map: serde_json::Map<String, Value>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.map.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) {
        self.map.insert(key.to_string(), value);
    }
}

/// Handle returned by [`SettingsStore::subscribe`]. Pass it back to
/// [`SettingsStore::unsubscribe`] to stop receiving notifications.
pub struct Subscription {
    id: u64,
    pub receiver: Receiver<SettingKey>,
}

/// Observable settings store with write-through persistence.
pub struct SettingsStore {
    settings: Settings,
    store: Box<dyn KvStore>,
    subscribers: Vec<(u64, Sender<SettingKey>)>,
    next_subscriber_id: u64,
}

impl SettingsStore {
    /// Open the store backed by the default settings file.
    pub fn open_default() -> anyhow::Result<Self> {
        let path = JsonFileStore::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(Self::load(Box::new(JsonFileStore::open(path))))
    }

    /// Build the store from a backing KV store, applying per-key fallbacks.
    pub fn load(store: Box<dyn KvStore>) -> Self {
        let defaults = Settings::default();
        let mut settings = Settings {
            time_zone_identifier: read_string(&*store, SettingKey::TimeZoneIdentifier)
                .unwrap_or(defaults.time_zone_identifier),
            time_zone_nickname: read_string(&*store, SettingKey::TimeZoneNickname)
                .unwrap_or(defaults.time_zone_nickname),
            show_flag: read_bool(&*store, SettingKey::ShowFlag).unwrap_or(defaults.show_flag),
            show_time_difference: read_bool(&*store, SettingKey::ShowTimeDifference)
                .unwrap_or(defaults.show_time_difference),
            component_order: defaults.component_order.clone(),
            time_difference_last_index: defaults.time_difference_last_index,
            selected_language: read_string(&*store, SettingKey::SelectedLanguage)
                .and_then(|tag| Language::from_tag(&tag))
                .unwrap_or(defaults.selected_language),
            launch_at_login: read_bool(&*store, SettingKey::LaunchAtLogin)
                .unwrap_or(defaults.launch_at_login),
            show_settings_window_at_startup: read_bool(
                &*store,
                SettingKey::ShowSettingsWindowAtStartup,
            )
            .unwrap_or(defaults.show_settings_window_at_startup),
            automatically_check_for_updates: read_bool(
                &*store,
                SettingKey::AutomaticallyCheckForUpdates,
            )
            .unwrap_or(defaults.automatically_check_for_updates),
            automatically_download_updates: read_bool(
                &*store,
                SettingKey::AutomaticallyDownloadUpdates,
            )
            .unwrap_or(defaults.automatically_download_updates),
        };

        // A stored last index only takes effect when positive.
        if let Some(index) = store
            .read(SettingKey::TimeDifferenceLastIndex.storage_key())
            .and_then(|v| v.as_u64())
        {
            if index > 0 {
                settings.time_difference_last_index = index as usize;
            }
        }

        // A malformed order array falls back to the compiled-in default.
        if let Some(value) = store.read(SettingKey::ComponentOrder.storage_key()) {
            match serde_json::from_value::<Vec<ComponentKind>>(value) {
                Ok(order) if is_valid_order(&order) => settings.component_order = order,
                _ => {
                    tracing::warn!("Ignoring malformed componentOrder, using default");
                }
            }
        }

        // The order never carries timeDifference while the toggle is off.
        if !settings.show_time_difference {
            settings
                .component_order
                .retain(|kind| *kind != ComponentKind::TimeDifference);
        }

        Self {
            settings,
            store,
            subscribers: Vec::new(),
            next_subscriber_id: 0,
        }
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Register for change notifications.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = unbounded();
        let id = self.next_subscriber_id;
        self.next_subscriber_id += 1;
        self.subscribers.push((id, tx));
        Subscription { id, receiver: rx }
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscribers.retain(|(id, _)| *id != subscription.id);
    }

    fn notify(&mut self, key: SettingKey) {
        self.subscribers.retain(|(_, tx)| tx.send(key).is_ok());
    }

    fn write_through(&mut self, key: SettingKey) {
        let value = self.field_value(key);
        self.store.write(key.storage_key(), value);
        self.notify(key);
    }

    fn field_value(&self, key: SettingKey) -> Value {
        match key {
            SettingKey::TimeZoneIdentifier => Value::from(self.settings.time_zone_identifier.clone()),
            SettingKey::TimeZoneNickname => Value::from(self.settings.time_zone_nickname.clone()),
            SettingKey::ShowFlag => Value::from(self.settings.show_flag),
            SettingKey::ShowTimeDifference => Value::from(self.settings.show_time_difference),
            SettingKey::ComponentOrder => {
                serde_json::to_value(&self.settings.component_order).unwrap_or(Value::Null)
            }
            SettingKey::TimeDifferenceLastIndex => {
                Value::from(self.settings.time_difference_last_index as u64)
            }
            SettingKey::SelectedLanguage => Value::from(self.settings.selected_language.tag()),
            SettingKey::LaunchAtLogin => Value::from(self.settings.launch_at_login),
            SettingKey::ShowSettingsWindowAtStartup => {
                Value::from(self.settings.show_settings_window_at_startup)
            }
            SettingKey::AutomaticallyCheckForUpdates => {
                Value::from(self.settings.automatically_check_for_updates)
            }
            SettingKey::AutomaticallyDownloadUpdates => {
                Value::from(self.settings.automatically_download_updates)
            }
        }
    }

    pub fn set_time_zone_identifier(&mut self, identifier: String) {
        self.settings.time_zone_identifier = identifier;
        self.write_through(SettingKey::TimeZoneIdentifier);
    }

    pub fn set_time_zone_nickname(&mut self, nickname: String) {
        self.settings.time_zone_nickname = nickname;
        self.write_through(SettingKey::TimeZoneNickname);
    }

    pub fn set_show_flag(&mut self, show: bool) {
        self.settings.show_flag = show;
        self.write_through(SettingKey::ShowFlag);
    }

    /// Toggle the time-difference component.
    ///
    /// Turning it off records its current position and removes it from the
    /// order. Turning it on reinserts it at the recorded position, clamped
    /// to the current length.
    pub fn set_show_time_difference(&mut self, show: bool) {
        if self.settings.show_time_difference == show {
            return;
        }
        self.settings.show_time_difference = show;
        self.write_through(SettingKey::ShowTimeDifference);

        if show {
            let index = self
                .settings
                .time_difference_last_index
                .min(self.settings.component_order.len());
            self.settings
                .component_order
                .insert(index, ComponentKind::TimeDifference);
            self.write_through(SettingKey::ComponentOrder);
        } else if let Some(index) = self
            .settings
            .component_order
            .iter()
            .position(|kind| *kind == ComponentKind::TimeDifference)
        {
            self.settings.time_difference_last_index = index;
            self.write_through(SettingKey::TimeDifferenceLastIndex);
            self.settings.component_order.remove(index);
            self.write_through(SettingKey::ComponentOrder);
        }
    }

    /// Replace the component order wholesale.
    ///
    /// Unknown duplicates collapse to their first occurrence and the
    /// time-difference component is dropped while its toggle is off.
    pub fn set_component_order(&mut self, order: Vec<ComponentKind>) {
        let mut sanitized: Vec<ComponentKind> = Vec::with_capacity(order.len());
        for kind in order {
            if sanitized.contains(&kind) {
                continue;
            }
            if kind == ComponentKind::TimeDifference && !self.settings.show_time_difference {
                continue;
            }
            sanitized.push(kind);
        }
        self.settings.component_order = sanitized;
        self.write_through(SettingKey::ComponentOrder);
    }

    /// Swap two positions in the component order. Returns false when either
    /// index is out of bounds.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.settings.component_order.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            self.settings.component_order.swap(from, to);
            self.write_through(SettingKey::ComponentOrder);
        }
        true
    }

    pub fn set_selected_language(&mut self, language: Language) {
        self.settings.selected_language = language;
        self.write_through(SettingKey::SelectedLanguage);
    }

    /// Toggle login-item registration.
    ///
    /// The registrar is invoked after the value is persisted; on failure the
    /// value reverts in memory and on disk and the error is returned for the
    /// caller to surface once.
    pub fn set_launch_at_login(
        &mut self,
        enabled: bool,
        login_items: &dyn LoginItems,
    ) -> Result<(), LoginItemError> {
        let previous = self.settings.launch_at_login;
        self.settings.launch_at_login = enabled;
        self.write_through(SettingKey::LaunchAtLogin);

        let result = if enabled {
            login_items.register()
        } else {
            login_items.unregister()
        };

        if let Err(e) = result {
            self.settings.launch_at_login = previous;
            self.write_through(SettingKey::LaunchAtLogin);
            return Err(e);
        }
        Ok(())
    }

    pub fn set_show_settings_window_at_startup(&mut self, show: bool) {
        self.settings.show_settings_window_at_startup = show;
        self.write_through(SettingKey::ShowSettingsWindowAtStartup);
    }

    pub fn set_automatically_check_for_updates(&mut self, check: bool) {
        self.settings.automatically_check_for_updates = check;
        self.write_through(SettingKey::AutomaticallyCheckForUpdates);
    }

    pub fn set_automatically_download_updates(&mut self, download: bool) {
        self.settings.automatically_download_updates = download;
        self.write_through(SettingKey::AutomaticallyDownloadUpdates);
    }
}

fn read_string(store: &dyn KvStore, key: SettingKey) -> Option<String> {
    store
        .read(key.storage_key())
        .and_then(|v| v.as_str().map(str::to_string))
}

fn read_bool(store: &dyn KvStore, key: SettingKey) -> Option<bool> {
    store.read(key.storage_key()).and_then(|v| v.as_bool())
}

/// An order is valid when no kind appears twice.
fn is_valid_order(order: &[ComponentKind]) -> bool {
    for (i, kind) in order.iter().enumerate() {
        if order[i + 1..].contains(kind) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FailingLoginItems;

    impl LoginItems for FailingLoginItems {
        fn register(&self) -> Result<(), LoginItemError> {
            Err(LoginItemError::NoHomeDirectory)
        }

        fn unregister(&self) -> Result<(), LoginItemError> {
            Err(LoginItemError::NoHomeDirectory)
        }

        fn status(&self) -> crate::launch_agent::LoginItemStatus {
            crate::launch_agent::LoginItemStatus::Disabled
        }
    }

    struct OkLoginItems;

    impl LoginItems for OkLoginItems {
        fn register(&self) -> Result<(), LoginItemError> {
            Ok(())
        }

        fn unregister(&self) -> Result<(), LoginItemError> {
            Ok(())
        }

        fn status(&self) -> crate::launch_agent::LoginItemStatus {
            crate::launch_agent::LoginItemStatus::Disabled
        }
    }

    fn store_with(entries: &[(&str, Value)]) -> MemoryStore {
        let mut store = MemoryStore::new();
        for (key, value) in entries {
            store.write(key, value.clone());
        }
        store
    }

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.time_zone_identifier, "Asia/Shanghai");
        assert!(settings.show_flag);
        assert!(settings.show_time_difference);
        assert_eq!(settings.component_order, ComponentKind::all().to_vec());
        assert_eq!(settings.time_difference_last_index, 2);
        assert!(settings.automatically_check_for_updates);
        assert!(!settings.automatically_download_updates);
        assert!(!settings.launch_at_login);
    }

    #[test]
    fn load_empty_store_uses_defaults() {
        let store = SettingsStore::load(Box::new(MemoryStore::new()));
        assert_eq!(store.settings().time_zone_identifier, "Asia/Shanghai");
        assert_eq!(store.settings().component_order, ComponentKind::all().to_vec());
    }

    #[test]
    fn load_reads_persisted_values() {
        let backing = store_with(&[
            ("timeZoneIdentifier", json!("Europe/Paris")),
            ("showFlag", json!(false)),
            ("timeZoneNickname", json!("HQ")),
        ]);
        let store = SettingsStore::load(Box::new(backing));
        assert_eq!(store.settings().time_zone_identifier, "Europe/Paris");
        assert!(!store.settings().show_flag);
        assert_eq!(store.settings().time_zone_nickname, "HQ");
    }

    #[test]
    fn load_ignores_malformed_order() {
        let backing = store_with(&[("componentOrder", json!(["time", "bogus"]))]);
        let store = SettingsStore::load(Box::new(backing));
        assert_eq!(store.settings().component_order, ComponentKind::all().to_vec());
    }

    #[test]
    fn load_ignores_duplicate_order() {
        let backing = store_with(&[("componentOrder", json!(["time", "time", "flag"]))]);
        let store = SettingsStore::load(Box::new(backing));
        assert_eq!(store.settings().component_order, ComponentKind::all().to_vec());
    }

    #[test]
    fn load_accepts_valid_order() {
        let backing = store_with(&[("componentOrder", json!(["time", "flag"]))]);
        let store = SettingsStore::load(Box::new(backing));
        assert_eq!(
            store.settings().component_order,
            vec![ComponentKind::Time, ComponentKind::Flag]
        );
    }

    #[test]
    fn load_zero_last_index_keeps_default() {
        let backing = store_with(&[("timeDifferenceLastIndex", json!(0))]);
        let store = SettingsStore::load(Box::new(backing));
        assert_eq!(store.settings().time_difference_last_index, 2);
    }

    #[test]
    fn load_positive_last_index_overrides_default() {
        let backing = store_with(&[("timeDifferenceLastIndex", json!(1))]);
        let store = SettingsStore::load(Box::new(backing));
        assert_eq!(store.settings().time_difference_last_index, 1);
    }

    #[test]
    fn load_strips_time_difference_when_toggle_off() {
        let backing = store_with(&[
            ("showTimeDifference", json!(false)),
            (
                "componentOrder",
                json!(["flag", "time", "timeDifference", "dayNight"]),
            ),
        ]);
        let store = SettingsStore::load(Box::new(backing));
        assert!(!store
            .settings()
            .component_order
            .contains(&ComponentKind::TimeDifference));
    }

    #[test]
    fn setter_persists_immediately() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        store.set_time_zone_identifier("America/New_York".to_string());
        assert_eq!(
            store.store.read("timeZoneIdentifier"),
            Some(json!("America/New_York"))
        );
    }

    #[test]
    fn toggle_off_records_index_and_removes() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        store.set_show_time_difference(false);
        assert_eq!(store.settings().time_difference_last_index, 2);
        assert_eq!(
            store.settings().component_order,
            vec![ComponentKind::Flag, ComponentKind::Time, ComponentKind::DayNight]
        );
        assert_eq!(store.store.read("timeDifferenceLastIndex"), Some(json!(2)));
    }

    #[test]
    fn toggle_on_reinserts_at_recorded_index() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        store.set_show_time_difference(false);
        store.set_show_time_difference(true);
        assert_eq!(store.settings().component_order, ComponentKind::all().to_vec());
    }

    #[test]
    fn toggle_on_clamps_index_to_length() {
        let backing = store_with(&[
            ("showTimeDifference", json!(false)),
            ("componentOrder", json!(["time"])),
            ("timeDifferenceLastIndex", json!(5)),
        ]);
        let mut store = SettingsStore::load(Box::new(backing));
        store.set_show_time_difference(true);
        assert_eq!(
            store.settings().component_order,
            vec![ComponentKind::Time, ComponentKind::TimeDifference]
        );
    }

    #[test]
    fn toggle_same_value_is_a_no_op() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        let sub = store.subscribe();
        store.set_show_time_difference(true);
        assert!(sub.receiver.try_recv().is_err());
    }

    #[test]
    fn reorder_swaps_positions() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        assert!(store.reorder(0, 3));
        assert_eq!(
            store.settings().component_order,
            vec![
                ComponentKind::DayNight,
                ComponentKind::Time,
                ComponentKind::TimeDifference,
                ComponentKind::Flag,
            ]
        );
    }

    #[test]
    fn reorder_out_of_bounds_is_rejected() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        assert!(!store.reorder(0, 9));
        assert_eq!(store.settings().component_order, ComponentKind::all().to_vec());
    }

    #[test]
    fn set_order_collapses_duplicates() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        store.set_component_order(vec![
            ComponentKind::Time,
            ComponentKind::Time,
            ComponentKind::Flag,
        ]);
        assert_eq!(
            store.settings().component_order,
            vec![ComponentKind::Time, ComponentKind::Flag]
        );
    }

    #[test]
    fn set_order_drops_hidden_time_difference() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        store.set_show_time_difference(false);
        store.set_component_order(vec![
            ComponentKind::TimeDifference,
            ComponentKind::Time,
        ]);
        assert_eq!(store.settings().component_order, vec![ComponentKind::Time]);
    }

    #[test]
    fn subscribers_see_toggle_event_sequence() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        let sub = store.subscribe();
        store.set_show_time_difference(false);
        let events: Vec<SettingKey> = sub.receiver.try_iter().collect();
        assert_eq!(
            events,
            vec![
                SettingKey::ShowTimeDifference,
                SettingKey::TimeDifferenceLastIndex,
                SettingKey::ComponentOrder,
            ]
        );
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        let sub = store.subscribe();
        store.unsubscribe(sub);
        store.set_show_flag(false);
        assert!(store.subscribers.is_empty());
    }

    #[test]
    fn launch_at_login_success_persists() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        assert!(store.set_launch_at_login(true, &OkLoginItems).is_ok());
        assert!(store.settings().launch_at_login);
        assert_eq!(store.store.read("launchAtLogin"), Some(json!(true)));
    }

    #[test]
    fn launch_at_login_failure_reverts() {
        let mut store = SettingsStore::load(Box::new(MemoryStore::new()));
        let result = store.set_launch_at_login(true, &FailingLoginItems);
        assert!(result.is_err());
        assert!(!store.settings().launch_at_login);
        assert_eq!(store.store.read("launchAtLogin"), Some(json!(false)));
    }

    #[test]
    fn json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        {
            let mut store = JsonFileStore::open(path.clone());
            store.write("timeZoneIdentifier", json!("Europe/London"));
            store.write("showFlag", json!(false));
        }
        let store = JsonFileStore::open(path);
        assert_eq!(
            store.read("timeZoneIdentifier"),
            Some(json!("Europe/London"))
        );
        assert_eq!(store.read("showFlag"), Some(json!(false)));
    }

    #[test]
    fn json_file_store_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::open(path);
        assert_eq!(store.read("timeZoneIdentifier"), None);
    }

    #[test]
    fn component_kind_tags_round_trip() {
        for kind in ComponentKind::all() {
            assert_eq!(ComponentKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ComponentKind::from_tag("bogus"), None);
    }
}
