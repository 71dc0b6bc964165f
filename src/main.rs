use anyhow::{Context, Result};
use log::error;

use webshare::bootstrap::setup::{initialize_folder, initialize_logger};
use webshare::build_rocket;
use webshare::common::ROCKET_RUNTIME;
use webshare::config::ShareConfig;
use webshare::registry::ShareRegistry;

fn main() -> Result<()> {
    initialize_logger();

    let config = ShareConfig::load()?;
    if let Err(e) = initialize_folder(&config.upload_dir) {
        error!("{:?}", e);
        std::process::exit(1);
    }

    ROCKET_RUNTIME
        .block_on(async { build_rocket(config, ShareRegistry::new()).launch().await })
        .context("Rocket server failed")?;

    Ok(())
}
