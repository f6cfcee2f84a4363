//! Single instance detection using a pid lock file
//!
//! Prevents multiple instances of the menubar loop from running
//! simultaneously.

use std::path::PathBuf;

/// Guard that holds the single instance lock file
/// When dropped, the lock file is removed
pub struct SingleInstanceGuard {
    path: PathBuf,
}

impl SingleInstanceGuard {
    const LOCK_FILE: &'static str = "timebar.lock";

    /// Try to acquire the single instance lock
    /// Returns Some(guard) if this is the first instance, None if another instance is running
    pub fn try_acquire() -> Option<Self> {
        let path = Self::lock_path()?;

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                tracing::warn!("Failed to create lock directory");
                return None;
            }
        }

        if let Ok(content) = std::fs::read_to_string(&path) {
            if let Ok(pid) = content.trim().parse::<u32>() {
                if process_alive(pid) {
                    return None;
                }
            }
            // Stale lock from a dead process, take it over.
            tracing::debug!("Removing stale lock file at {}", path.display());
        }

        match std::fs::write(&path, std::process::id().to_string()) {
            Ok(()) => Some(Self { path }),
            Err(e) => {
                tracing::warn!("Failed to write lock file: {}", e);
                None
            }
        }
    }

    fn lock_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("TimeBar").join(Self::LOCK_FILE))
    }
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    std::path::Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    // No cheap liveness probe here; treat any recorded pid as live.
    true
}

impl Drop for SingleInstanceGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
