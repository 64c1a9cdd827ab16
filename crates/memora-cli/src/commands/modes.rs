//! Modes command handler

use anyhow::Result;

use memora_core::Config;

use crate::output::Output;

/// List reading modes with their profiles
pub fn list(config: &Config, output: &Output) -> Result<()> {
    let profiles = config.mode_profiles()?;
    output.print_modes(&profiles);
    Ok(())
}
