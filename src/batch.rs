use std::io::Write;
use log::{info, error};

use crate::config::{NetworkFailurePolicy, ScrapeConfig};
use crate::delay_manager;
use crate::error::ScrapeError;
use crate::extractor::Extractor;
use crate::input_loader;
use crate::record::RecordWriter;
use crate::scraper::{PageFetcher, Scraper};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Loads the URL list, scrapes every page over HTTP and writes `config.output_path`.
pub fn run(config: &ScrapeConfig) -> Result<BatchSummary, ScrapeError> {
    config.validate()?;
    let urls = input_loader::load_urls(&config.input_path)?;
    let fetcher = Scraper::new(config)?;
    let mut writer = RecordWriter::create(&config.output_path, config.layout)?;

    let summary = scrape_all(config, &urls, &fetcher, &mut writer)?;
    info!(
        "Scraping complete. {} of {} pages saved to {:?}",
        summary.written, summary.attempted, config.output_path
    );
    Ok(summary)
}

/// One URL at a time, in order, with a random pause after each.
pub fn scrape_all<F, W>(
    config: &ScrapeConfig,
    urls: &[String],
    fetcher: &F,
    writer: &mut RecordWriter<W>,
) -> Result<BatchSummary, ScrapeError>
where
    F: PageFetcher + ?Sized,
    W: Write,
{
    let extractor = Extractor::new(config.layout)?;
    let mut summary = BatchSummary::default();
    let total = urls.len();

    for (i, url) in urls.iter().enumerate() {
        summary.attempted += 1;
        info!("Scraping {} ({} / {})...", url, i + 1, total);

        match fetcher.fetch(url) {
            Ok(body) => {
                writer.write(&extractor.extract(&body, url))?;
                summary.written += 1;
            }
            Err(e) => {
                error!("Error fetching {}: {}", url, e);
                summary.skipped += 1;
                if config.network_failure_policy == NetworkFailurePolicy::Abort {
                    return Err(e);
                }
            }
        }

        delay_manager::random_request_delay(config.min_delay_secs, config.max_delay_secs);
    }

    Ok(summary)
}
