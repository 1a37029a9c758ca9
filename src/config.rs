// src/config.rs
// =============================================================================
// Construction settings for the crawler engine.
//
// Three knobs, all must be at least 1:
// - download_parallelism: size of the download worker pool
// - extract_parallelism: size of the link-extraction worker pool
// - per_host: max concurrent downloads against a single host
// =============================================================================

use thiserror::Error;

use crate::cli::Cli;

pub const DEFAULT_DOWNLOADS: usize = 100;
pub const DEFAULT_EXTRACTORS: usize = 100;
pub const DEFAULT_PER_HOST: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("download parallelism must be greater than 0, got {0}")]
    InvalidDownloadParallelism(usize),

    #[error("extract parallelism must be greater than 0, got {0}")]
    InvalidExtractParallelism(usize),

    #[error("per-host limit must be greater than 0, got {0}")]
    InvalidPerHost(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlerConfig {
    pub download_parallelism: usize,
    pub extract_parallelism: usize,
    pub per_host: usize,
}

impl CrawlerConfig {
    pub fn new(download_parallelism: usize, extract_parallelism: usize, per_host: usize) -> Self {
        Self {
            download_parallelism,
            extract_parallelism,
            per_host,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.download_parallelism == 0 {
            return Err(ConfigError::InvalidDownloadParallelism(
                self.download_parallelism,
            ));
        }
        if self.extract_parallelism == 0 {
            return Err(ConfigError::InvalidExtractParallelism(
                self.extract_parallelism,
            ));
        }
        if self.per_host == 0 {
            return Err(ConfigError::InvalidPerHost(self.per_host));
        }
        Ok(())
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DOWNLOADS, DEFAULT_EXTRACTORS, DEFAULT_PER_HOST)
    }
}

impl From<&Cli> for CrawlerConfig {
    fn from(cli: &Cli) -> Self {
        Self::new(cli.downloaders, cli.extractors, cli.per_host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(CrawlerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_values_rejected() {
        assert_eq!(
            CrawlerConfig::new(0, 1, 1).validate(),
            Err(ConfigError::InvalidDownloadParallelism(0))
        );
        assert_eq!(
            CrawlerConfig::new(1, 0, 1).validate(),
            Err(ConfigError::InvalidExtractParallelism(0))
        );
        assert_eq!(
            CrawlerConfig::new(1, 1, 0).validate(),
            Err(ConfigError::InvalidPerHost(0))
        );
    }

    #[test]
    fn test_from_cli() {
        let cli = Cli::parse_from([
            "parallel-crawler",
            "https://example.com",
            "--downloaders",
            "8",
            "--extractors",
            "4",
            "--per-host",
            "2",
        ]);
        assert_eq!(CrawlerConfig::from(&cli), CrawlerConfig::new(8, 4, 2));
    }
}
