//! Auto-update checker for TimeBar
//! Checks GitHub releases for new versions

use serde::Deserialize;

use crate::settings::Settings;

const GITHUB_REPO: &str = "isbool/timebar";
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct UpdateInfo {
    pub version: String,
    pub release_url: String,
    pub release_notes: String,
    /// Set when a downloadable asset exists and the user opted into
    /// automatic downloads.
    pub download_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubRelease {
    tag_name: String,
    html_url: String,
    body: Option<String>,
    assets: Vec<GitHubAsset>,
}

#[derive(Debug, Deserialize)]
struct GitHubAsset {
    name: String,
    browser_download_url: String,
}

/// Whether the startup check runs at all.
pub fn automatically_checks_for_updates(settings: &Settings) -> bool {
    settings.automatically_check_for_updates
}

/// Whether a found update may be fetched without asking.
pub fn automatically_downloads_updates(settings: &Settings) -> bool {
    settings.automatically_download_updates
}

/// Check the latest GitHub release.
///
/// Returns `None` when up to date or when the probe fails; network failures
/// are logged, never surfaced.
pub async fn check_for_updates(settings: &Settings) -> Option<UpdateInfo> {
    let url = format!("https://api.github.com/repos/{}/releases/latest", GITHUB_REPO);

    let client = reqwest::Client::builder()
        .user_agent("TimeBar")
        .build()
        .ok()?;

    let response = client.get(&url).send().await.ok()?;

    if !response.status().is_success() {
        tracing::debug!("GitHub API returned status: {}", response.status());
        return None;
    }

    let release: GitHubRelease = response.json().await.ok()?;

    // Parse version from tag (remove 'v' prefix if present)
    let remote_version = release.tag_name.trim_start_matches('v');

    if !is_newer_version(remote_version, CURRENT_VERSION) {
        return None;
    }

    let download_url = if automatically_downloads_updates(settings) {
        release
            .assets
            .iter()
            .find(|a| a.name.ends_with(".tar.gz") || a.name.ends_with(".zip"))
            .map(|a| a.browser_download_url.clone())
    } else {
        None
    };

    Some(UpdateInfo {
        version: release.tag_name,
        release_url: release.html_url,
        release_notes: release.body.unwrap_or_default(),
        download_url,
    })
}

/// Compare semantic versions, returns true if remote is newer
fn is_newer_version(remote: &str, current: &str) -> bool {
    let parse_version = |v: &str| -> (u32, u32, u32) {
        let parts: Vec<u32> = v.split('.').filter_map(|p| p.parse().ok()).collect();
        (
            parts.first().copied().unwrap_or(0),
            parts.get(1).copied().unwrap_or(0),
            parts.get(2).copied().unwrap_or(0),
        )
    };

    let remote_v = parse_version(remote);
    let current_v = parse_version(current);

    remote_v > current_v
}

/// Get the current version
pub fn current_version() -> &'static str {
    CURRENT_VERSION
}
