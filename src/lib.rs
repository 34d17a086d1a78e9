pub mod batch;
pub mod config;
pub mod delay_manager;
pub mod error;
pub mod extractor;
pub mod input_loader;
pub mod json_ld;
pub mod logger;
pub mod record;
pub mod scraper;

// Exporting types for convenience
pub use batch::BatchSummary;
pub use config::{NetworkFailurePolicy, ScrapeConfig};
pub use error::ScrapeError;
pub use extractor::Extractor;
pub use record::{MovieRecord, RecordLayout};
pub use crate::scraper::{PageFetcher, Scraper};
