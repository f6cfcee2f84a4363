//! Timezones command implementation
//!
//! Lists the identifiers the zone database knows, for use with
//! `config set timeZoneIdentifier`.

use clap::Args;

use crate::zone;

#[derive(Args, Debug)]
pub struct TimezonesArgs {
    /// Case-insensitive substring filter, e.g. "shanghai" or "america"
    pub filter: Option<String>,

    /// Render identifiers the way the picker shows them, with spaces
    #[arg(long)]
    pub display: bool,
}

pub async fn run(args: TimezonesArgs) -> anyhow::Result<()> {
    let filter = args.filter.map(|f| f.to_lowercase());

    for identifier in zone::known_identifiers() {
        if let Some(ref filter) = filter {
            let haystack = identifier.to_lowercase();
            if !haystack.contains(filter) && !haystack.replace('_', " ").contains(filter) {
                continue;
            }
        }
        if args.display {
            println!("{}", identifier.replace('_', " "));
        } else {
            println!("{}", identifier);
        }
    }

    Ok(())
}
