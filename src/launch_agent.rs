//! Login-item management
//!
//! Registers/unregisters TimeBar to start automatically at login. On macOS
//! this writes a user launchd agent plist; elsewhere it writes an XDG
//! autostart desktop entry. The registered command launches the menubar
//! loop.

use std::path::PathBuf;

use thiserror::Error;

#[cfg(not(target_os = "macos"))]
const APP_NAME: &str = "TimeBar";

#[cfg(target_os = "macos")]
const AGENT_LABEL: &str = "com.timebar.menubar";

/// Current registration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginItemStatus {
    Enabled,
    Disabled,
}

/// Failure modes of login-item registration. Each carries enough context
/// for a one-shot user-facing message.
#[derive(Debug, Error)]
pub enum LoginItemError {
    #[error("Could not determine the home directory. Check that $HOME is set and retry.")]
    NoHomeDirectory,

    #[error("Could not locate the timebar executable: {0}. Reinstall and retry.")]
    ExecutableNotFound(#[source] std::io::Error),

    #[error("Could not write the login item file at {}: {source}. Check permissions on the parent directory and retry.", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not remove the login item file at {}: {source}. Remove it manually if it persists.", path.display())]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Boundary for the host login-item facility. The settings store calls
/// through this trait so tests can substitute a failing registrar.
pub trait LoginItems {
    fn register(&self) -> Result<(), LoginItemError>;
    fn unregister(&self) -> Result<(), LoginItemError>;
    fn status(&self) -> LoginItemStatus;
}

/// The real registrar for the host OS.
pub struct SystemLoginItems;

impl LoginItems for SystemLoginItems {
    fn register(&self) -> Result<(), LoginItemError> {
        let path = entry_path()?;
        let exe = std::env::current_exe().map_err(LoginItemError::ExecutableNotFound)?;
        let content = entry_content(&exe);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LoginItemError::WriteFailed {
                path: path.clone(),
                source,
            })?;
        }
        std::fs::write(&path, content)
            .map_err(|source| LoginItemError::WriteFailed { path: path.clone(), source })?;
        tracing::info!("Registered login item at {}", path.display());
        Ok(())
    }

    fn unregister(&self) -> Result<(), LoginItemError> {
        let path = entry_path()?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("Removed login item at {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LoginItemError::RemoveFailed { path, source }),
        }
    }

    fn status(&self) -> LoginItemStatus {
        match entry_path() {
            Ok(path) if path.exists() => LoginItemStatus::Enabled,
            _ => LoginItemStatus::Disabled,
        }
    }
}

/// Path of the login-item file for the host OS.
pub fn entry_path() -> Result<PathBuf, LoginItemError> {
    let home = dirs::home_dir().ok_or(LoginItemError::NoHomeDirectory)?;
    Ok(platform_entry_path(&home))
}

#[cfg(target_os = "macos")]
fn platform_entry_path(home: &std::path::Path) -> PathBuf {
    home.join("Library")
        .join("LaunchAgents")
        .join(format!("{}.plist", AGENT_LABEL))
}

#[cfg(not(target_os = "macos"))]
fn platform_entry_path(home: &std::path::Path) -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
    config.join("autostart").join(format!("{}.desktop", APP_NAME))
}

#[cfg(target_os = "macos")]
fn entry_content(exe: &std::path::Path) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{exe}</string>
        <string>menubar</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
</dict>
</plist>
"#,
        label = AGENT_LABEL,
        exe = exe.display()
    )
}

#[cfg(not(target_os = "macos"))]
fn entry_content(exe: &std::path::Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name={name}\n\
         Exec=\"{exe}\" menubar\n\
         X-GNOME-Autostart-enabled=true\n",
        name = APP_NAME,
        exe = exe.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_content_launches_menubar() {
        let content = entry_content(std::path::Path::new("/opt/timebar/timebar"));
        assert!(content.contains("/opt/timebar/timebar"));
        assert!(content.contains("menubar"));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn entry_path_is_under_autostart() {
        let path = platform_entry_path(std::path::Path::new("/home/user"));
        assert!(path.ends_with("autostart/TimeBar.desktop"));
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn entry_path_is_a_launch_agent_plist() {
        let path = platform_entry_path(std::path::Path::new("/Users/user"));
        assert!(path.ends_with("Library/LaunchAgents/com.timebar.menubar.plist"));
    }

    #[test]
    fn errors_carry_remediation_text() {
        let message = LoginItemError::NoHomeDirectory.to_string();
        assert!(message.contains("retry"));
    }
}
