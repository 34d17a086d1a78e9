use std::fs;
use std::path::Path;
use log::info;

use crate::error::ScrapeError;

/// Reads the whole file up front. One URL per line; blank lines are skipped.
pub fn load_urls<P: AsRef<Path>>(filename: P) -> Result<Vec<String>, ScrapeError> {
    let path = filename.as_ref();
    let content = fs::read_to_string(path)?;
    let urls = parse_urls(&content);
    info!("Loaded {} URLs from {:?}", urls.len(), path);
    Ok(urls)
}

pub fn parse_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
