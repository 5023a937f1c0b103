use crate::cli::WindowsArgs;
use crate::config::PartialAprConfig;
use crate::error::Result;
use apr_restraints::core::models::window::{WindowId, check_window_counts, create_window_list};
use tracing::info;

pub fn run(args: WindowsArgs) -> Result<()> {
    let windows = list(&PartialAprConfig::from_file(&args.config)?)?;
    for window in &windows {
        println!("{window}");
    }
    info!("Listed {} windows.", windows.len());
    Ok(())
}

fn list(config: &PartialAprConfig) -> Result<Vec<WindowId>> {
    let restraints = config.load_restraints()?;
    check_window_counts(&restraints)?;
    Ok(create_window_list(&restraints)?)
}
