pub mod env;
mod loader;

pub use env::{
    ApiConfig, AppConfig, ConfigError, DirectoryConfig, FeatureFlags, LoggingConfig, UploadConfig,
};
pub use loader::load_config;
