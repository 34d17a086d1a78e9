use letterboxd_scraper_lib::{batch, config, logger, ScrapeConfig};

use std::error::Error;
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    info!("Starting Letterboxd scraper (without rating counts)...");

    let config = ScrapeConfig::reduced().apply_overrides(config::OVERRIDES_FILE)?;
    batch::run(&config)?;
    Ok(())
}
