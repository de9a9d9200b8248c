use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://gb-ocr-stage.vertekx.com";
pub const CATEGORIZE_ENDPOINT: &str = "/categorize";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub features: FeatureFlags,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub retry_attempts: u32,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub max_file_size: u64,
    pub allowed_file_types: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct FeatureFlags {
    pub enable_retry: bool,
    pub enable_timeout: bool,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub export_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ApiConfig {
    pub fn categorize_url(&self) -> String {
        self.endpoint_url(CATEGORIZE_ENDPOINT)
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), endpoint)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            timeout: Duration::from_millis(30_000),
            retry_attempts: 3,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            allowed_file_types: vec![
                "image/*".to_string(),
                ".pdf".to_string(),
                ".doc".to_string(),
                ".docx".to_string(),
            ],
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_retry: true,
            enable_timeout: true,
        }
    }
}
