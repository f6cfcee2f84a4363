//! Auto-start management
//!
//! Enables/disables TimeBar starting automatically at login.

use clap::Args;

use crate::launch_agent::{LoginItemStatus, LoginItems, SystemLoginItems};
use crate::settings::SettingsStore;

#[derive(Args, Debug)]
pub struct AutostartArgs {
    /// Enable auto-start at login
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Disable auto-start
    #[arg(long, conflicts_with = "enable")]
    pub disable: bool,

    /// Show current auto-start status
    #[arg(long, conflicts_with_all = ["enable", "disable"])]
    pub status: bool,
}

pub async fn run(args: AutostartArgs) -> anyhow::Result<()> {
    let login_items = SystemLoginItems;

    if args.enable {
        let mut store = SettingsStore::open_default()?;
        if let Err(e) = store.set_launch_at_login(true, &login_items) {
            anyhow::bail!("{}", e);
        }
        println!("Auto-start enabled. TimeBar will start when you log in.");
    } else if args.disable {
        let mut store = SettingsStore::open_default()?;
        if let Err(e) = store.set_launch_at_login(false, &login_items) {
            anyhow::bail!("{}", e);
        }
        println!("Auto-start disabled.");
    } else {
        // Default: show status
        match login_items.status() {
            LoginItemStatus::Enabled => println!("Auto-start is enabled."),
            LoginItemStatus::Disabled => println!("Auto-start is disabled."),
        }
    }
    Ok(())
}
