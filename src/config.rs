use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use log::info;

use crate::error::ScrapeError;
use crate::record::RecordLayout;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_REFERER: &str = "https://letterboxd.com/";
pub const DEFAULT_OUTPUT: &str = "movies_data.csv";
pub const OVERRIDES_FILE: &str = "scraper.json";

/// What the driver does when a request fails at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkFailurePolicy {
    /// Log the URL and move on to the next one.
    Skip,
    /// Stop the batch and return the error. Rows already written stay on disk.
    Abort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub user_agent: String,
    pub referer: String,
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
    /// `None` disables the request timeout entirely.
    pub request_timeout_secs: Option<u64>,
    pub layout: RecordLayout,
    pub network_failure_policy: NetworkFailurePolicy,
}

/// Partial config read from `scraper.json`; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub min_delay_secs: Option<f64>,
    pub max_delay_secs: Option<f64>,
    pub request_timeout_secs: Option<u64>,
    pub network_failure_policy: Option<NetworkFailurePolicy>,
}

impl ScrapeConfig {
    /// Full layout: reads `urls.txt`, writes the rating-count column.
    pub fn full() -> Self {
        ScrapeConfig {
            input_path: PathBuf::from("urls.txt"),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            min_delay_secs: 2.0,
            max_delay_secs: 4.0,
            request_timeout_secs: None,
            layout: RecordLayout::WithRatingCount,
            network_failure_policy: NetworkFailurePolicy::Skip,
        }
    }

    /// Reduced layout: reads `urls1.txt`, no rating-count column.
    pub fn reduced() -> Self {
        ScrapeConfig {
            input_path: PathBuf::from("urls1.txt"),
            layout: RecordLayout::WithoutRatingCount,
            ..Self::full()
        }
    }

    /// Overlays `path` if it exists. A missing file is not an error.
    pub fn apply_overrides<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(self);
        }

        let content = fs::read_to_string(path)?;
        let overrides: ConfigOverrides = serde_json::from_str(&content)
            .map_err(|e| ScrapeError::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded config overrides from {:?}", path);

        if let Some(v) = overrides.input_path { self.input_path = v; }
        if let Some(v) = overrides.output_path { self.output_path = v; }
        if let Some(v) = overrides.user_agent { self.user_agent = v; }
        if let Some(v) = overrides.referer { self.referer = v; }
        if let Some(v) = overrides.min_delay_secs { self.min_delay_secs = v; }
        if let Some(v) = overrides.max_delay_secs { self.max_delay_secs = v; }
        if overrides.request_timeout_secs.is_some() {
            self.request_timeout_secs = overrides.request_timeout_secs;
        }
        if let Some(v) = overrides.network_failure_policy { self.network_failure_policy = v; }

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ScrapeError> {
        if !self.min_delay_secs.is_finite() || !self.max_delay_secs.is_finite() {
            return Err(ScrapeError::Config("delay bounds must be finite".into()));
        }
        if self.min_delay_secs < 0.0 {
            return Err(ScrapeError::Config(format!(
                "min_delay_secs must not be negative (got {})",
                self.min_delay_secs
            )));
        }
        if self.min_delay_secs > self.max_delay_secs {
            return Err(ScrapeError::Config(format!(
                "min_delay_secs ({}) is greater than max_delay_secs ({})",
                self.min_delay_secs, self.max_delay_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn variants_differ_only_in_input_and_layout() {
        let full = ScrapeConfig::full();
        let reduced = ScrapeConfig::reduced();
        assert_eq!(full.input_path, PathBuf::from("urls.txt"));
        assert_eq!(reduced.input_path, PathBuf::from("urls1.txt"));
        assert_eq!(reduced.layout, RecordLayout::WithoutRatingCount);
        assert_eq!(full.output_path, reduced.output_path);
        assert_eq!(full.user_agent, reduced.user_agent);
        assert_eq!((full.min_delay_secs, full.max_delay_secs), (2.0, 4.0));
        assert!(full.validate().is_ok());
    }

    #[test]
    fn missing_overrides_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ScrapeConfig::full()
            .apply_overrides(dir.path().join("nope.json"))
            .unwrap();
        assert_eq!(cfg, ScrapeConfig::full());
    }

    #[test]
    fn overrides_file_replaces_given_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"min_delay_secs": 0, "max_delay_secs": 1.5, "network_failure_policy": "abort", "request_timeout_secs": 20}}"#
        )
        .unwrap();

        let cfg = ScrapeConfig::reduced().apply_overrides(file.path()).unwrap();
        assert_eq!(cfg.min_delay_secs, 0.0);
        assert_eq!(cfg.max_delay_secs, 1.5);
        assert_eq!(cfg.request_timeout_secs, Some(20));
        assert_eq!(cfg.network_failure_policy, NetworkFailurePolicy::Abort);
        assert_eq!(cfg.input_path, PathBuf::from("urls1.txt"));
    }

    #[test]
    fn malformed_overrides_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"min_delay": 1}}"#).unwrap();
        let err = ScrapeConfig::full().apply_overrides(file.path()).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn inverted_delay_bounds_are_rejected() {
        let cfg = ScrapeConfig {
            min_delay_secs: 5.0,
            max_delay_secs: 1.0,
            ..ScrapeConfig::full()
        };
        assert!(matches!(cfg.validate(), Err(ScrapeError::Config(_))));

        let cfg = ScrapeConfig {
            min_delay_secs: -1.0,
            ..ScrapeConfig::full()
        };
        assert!(cfg.validate().is_err());
    }
}
