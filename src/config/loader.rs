use std::{env, str::FromStr, time::Duration};

use url::Url;

use super::env::{
    ApiConfig, AppConfig, ConfigError, DEFAULT_BASE_URL, DirectoryConfig, FeatureFlags,
    LoggingConfig, UploadConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_raw = get("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&base_raw)?;

        let timeout_ms: u64 = parse_or("API_TIMEOUT", get("API_TIMEOUT"), 30_000)?;
        let retry_attempts: u32 = parse_or("API_RETRY_ATTEMPTS", get("API_RETRY_ATTEMPTS"), 3)?;
        if retry_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "API_RETRY_ATTEMPTS",
                value: retry_attempts.to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }

        let api = ApiConfig {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            retry_attempts,
        };

        let defaults = UploadConfig::default();
        let upload = UploadConfig {
            max_file_size: parse_or("MAX_FILE_SIZE", get("MAX_FILE_SIZE"), defaults.max_file_size)?,
            allowed_file_types: get("ALLOWED_FILE_TYPES")
                .map(|value| {
                    value
                        .split(',')
                        .map(|part| part.trim().to_string())
                        .filter(|part| !part.is_empty())
                        .collect::<Vec<_>>()
                })
                .unwrap_or(defaults.allowed_file_types),
        };

        let features = FeatureFlags {
            enable_retry: get("ENABLE_RETRY").as_deref() != Some("false"),
            enable_timeout: get("ENABLE_TIMEOUT").as_deref() != Some("false"),
        };

        let directories = DirectoryConfig {
            logs_dir: get("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
            export_dir: get("EXPORT_DIR").unwrap_or_else(|| ".".to_string()),
        };

        let logging = LoggingConfig {
            level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            api,
            upload,
            features,
            directories,
            logging,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "API_BASE_URL",
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_string()));
    }
    Ok(url)
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
            value: raw,
        }),
    }
}
