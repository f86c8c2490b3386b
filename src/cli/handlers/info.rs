//! Configuration display

use crate::cli::output::print_config;
use crate::AppConfig;
use crate::Result;

pub fn handle_config(config: &AppConfig) -> Result<()> {
    print_config(config);
    Ok(())
}
