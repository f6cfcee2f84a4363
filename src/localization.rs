//! UI language selection and localized strings
//!
//! TimeBar ships embedded string tables for English, Simplified Chinese and
//! Traditional Chinese. Lookup falls back to English when a key is missing
//! from the selected table. "Auto" resolves from the process environment.

use serde::{Deserialize, Serialize};

/// Selectable UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-Hans")]
    SimplifiedChinese,
    #[serde(rename = "zh-Hant")]
    TraditionalChinese,
}

impl Language {
    pub fn all() -> [Language; 4] {
        [
            Language::Auto,
            Language::English,
            Language::SimplifiedChinese,
            Language::TraditionalChinese,
        ]
    }

    /// Stable tag used in the persisted store and on the CLI.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::English => "en",
            Language::SimplifiedChinese => "zh-Hans",
            Language::TraditionalChinese => "zh-Hant",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Language> {
        match tag {
            "auto" => Some(Language::Auto),
            "en" => Some(Language::English),
            "zh-Hans" => Some(Language::SimplifiedChinese),
            "zh-Hant" => Some(Language::TraditionalChinese),
            _ => None,
        }
    }

    /// Name shown in the language picker, in the language itself.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Auto => "Auto",
            Language::English => "English",
            Language::SimplifiedChinese => "简体中文",
            Language::TraditionalChinese => "繁體中文",
        }
    }

    /// The concrete language to render in, resolving Auto from the
    /// environment.
    pub fn effective(&self) -> Language {
        match self {
            Language::Auto => detect_system_language(),
            other => *other,
        }
    }
}

/// Look up `key` in the table for `language`, falling back to English.
pub fn localized(language: Language, key: &'static str) -> &'static str {
    let language = language.effective();
    let table = match language {
        Language::SimplifiedChinese => SIMPLIFIED_CHINESE,
        Language::TraditionalChinese => TRADITIONAL_CHINESE,
        _ => ENGLISH,
    };
    lookup(table, key)
        .or_else(|| lookup(ENGLISH, key))
        .unwrap_or(key)
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Best-effort system language from `LC_ALL`/`LANG`.
pub fn detect_system_language() -> Language {
    let locale = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default();
    language_for_locale(&locale)
}

fn language_for_locale(locale: &str) -> Language {
    let lower = locale.to_lowercase();
    if lower.starts_with("zh_tw") || lower.starts_with("zh_hk") || lower.starts_with("zh-hant") {
        Language::TraditionalChinese
    } else if lower.starts_with("zh") {
        Language::SimplifiedChinese
    } else {
        Language::English
    }
}

const ENGLISH: &[(&str, &'static str)] = &[
    ("alert.restart.title", "Language Changed"),
    (
        "alert.restart.message",
        "Restart TimeBar for the new language to take full effect.",
    ),
    ("alert.restart.button.now", "Restart Now"),
    ("alert.restart.button.later", "Later"),
    ("settings.language", "Language"),
    ("settings.timezone", "Time Zone"),
    ("settings.nickname", "Nickname"),
    ("settings.show_flag", "Show Flag"),
    ("settings.show_time_difference", "Show Time Difference"),
    ("settings.launch_at_login", "Launch at Login"),
    ("settings.check_updates", "Automatically Check for Updates"),
    ("update.available", "A new version of TimeBar is available"),
    ("update.up_to_date", "TimeBar is up to date"),
];

const SIMPLIFIED_CHINESE: &[(&str, &'static str)] = &[
    ("alert.restart.title", "语言已更改"),
    ("alert.restart.message", "重新启动 TimeBar 以使新语言完全生效。"),
    ("alert.restart.button.now", "立即重启"),
    ("alert.restart.button.later", "稍后"),
    ("settings.language", "语言"),
    ("settings.timezone", "时区"),
    ("settings.nickname", "昵称"),
    ("settings.show_flag", "显示国旗"),
    ("settings.show_time_difference", "显示时差"),
    ("settings.launch_at_login", "登录时启动"),
    ("settings.check_updates", "自动检查更新"),
    ("update.available", "TimeBar 有新版本可用"),
    ("update.up_to_date", "TimeBar 已是最新版本"),
];

const TRADITIONAL_CHINESE: &[(&str, &'static str)] = &[
    ("alert.restart.title", "語言已變更"),
    ("alert.restart.message", "重新啟動 TimeBar 以使新語言完全生效。"),
    ("alert.restart.button.now", "立即重啟"),
    ("alert.restart.button.later", "稍後"),
    ("settings.language", "語言"),
    ("settings.timezone", "時區"),
    ("settings.nickname", "暱稱"),
    ("settings.show_flag", "顯示國旗"),
    ("settings.show_time_difference", "顯示時差"),
    ("settings.launch_at_login", "登入時啟動"),
    ("settings.check_updates", "自動檢查更新"),
    ("update.available", "TimeBar 有新版本可用"),
    ("update.up_to_date", "TimeBar 已是最新版本"),
];
