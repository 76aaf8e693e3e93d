use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::models::Vendor;

pub const AUTO_VENDOR: &str = "auto";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub vendor: String,
    pub warn_days: i64,
    pub pretty: bool,
    pub config_path: Option<String>,
    /// Why the config file at `config_path` could not be used.
    pub config_error: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    log_level: Option<String>,
    vendor: Option<String>,
    warn_days: Option<i64>,
    pretty: Option<bool>,
}

#[derive(Default)]
struct YamlConfigWithPath {
    config: YamlConfig,
    path: Option<String>,
    error: Option<String>,
}

#[derive(Debug)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl Config {
    pub fn load() -> Self {
        Self::from_sources(Self::load_yaml(), |key| env::var(key).ok())
    }

    fn from_sources(yaml: YamlConfigWithPath, var: impl Fn(&str) -> Option<String>) -> Self {
        let YamlConfigWithPath {
            config: yaml_config,
            path: config_path,
            error: config_error,
        } = yaml;

        let log_level = var("BMC_CERTS_LOG_LEVEL")
            .or(yaml_config.log_level)
            .unwrap_or_else(|| "info".to_string());

        let vendor = var("BMC_CERTS_VENDOR")
            .or(yaml_config.vendor)
            .unwrap_or_else(|| AUTO_VENDOR.to_string());

        let warn_days = var("BMC_CERTS_WARN_DAYS")
            .and_then(|v| v.parse().ok())
            .or(yaml_config.warn_days)
            .unwrap_or(30);

        let pretty = var("BMC_CERTS_PRETTY")
            .and_then(|v| v.parse().ok())
            .or(yaml_config.pretty)
            .unwrap_or(false);

        Self {
            log_level,
            vendor,
            warn_days,
            pretty,
            config_path,
            config_error,
        }
    }

    /// The vendor every document is forced to, or `None` to detect per document.
    pub fn vendor_override(&self) -> Option<Vendor> {
        if self.vendor.eq_ignore_ascii_case(AUTO_VENDOR) {
            None
        } else {
            self.vendor.parse().ok()
        }
    }

    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        if let Some(ref e) = self.config_error {
            errors.push(ConfigValidationError {
                field: "config_file".to_string(),
                message: format!(
                    "{}: {}",
                    self.config_path.as_deref().unwrap_or("<unknown>"),
                    e
                ),
            });
        }

        if !self.vendor.eq_ignore_ascii_case(AUTO_VENDOR) {
            if let Err(e) = self.vendor.parse::<Vendor>() {
                errors.push(ConfigValidationError {
                    field: "vendor".to_string(),
                    message: format!(
                        "{}; expected auto, dell, hpe, cisco, supermicro or unknown",
                        e
                    ),
                });
            }
        }

        if self.warn_days < 0 {
            errors.push(ConfigValidationError {
                field: "warn_days".to_string(),
                message: "Warning threshold cannot be negative".to_string(),
            });
        }

        if let Err(e) = EnvFilter::try_new(&self.log_level) {
            errors.push(ConfigValidationError {
                field: "log_level".to_string(),
                message: format!("Invalid log filter: {}", e),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn load_yaml() -> YamlConfigWithPath {
        let search = [
            env::var("BMC_CERTS_CONFIG").ok(),
            Some("config.yaml".to_string()),
            Some("config.yml".to_string()),
            Some("/etc/bmc-cert-metrics/config.yaml".to_string()),
        ];
        Self::load_first_yaml(search.into_iter().flatten())
    }

    /// The first existing file wins; a file that cannot be read or parsed is
    /// reported instead of silently skipped.
    fn load_first_yaml(search: impl IntoIterator<Item = String>) -> YamlConfigWithPath {
        let Some(path) = search.into_iter().find(|p| Path::new(p).exists()) else {
            return YamlConfigWithPath::default();
        };

        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                if content.trim().is_empty() {
                    Ok(YamlConfig::default())
                } else {
                    serde_yaml::from_str::<YamlConfig>(&content).map_err(|e| e.to_string())
                }
            });

        match parsed {
            Ok(config) => YamlConfigWithPath {
                config,
                path: Some(path),
                error: None,
            },
            Err(error) => YamlConfigWithPath {
                path: Some(path),
                error: Some(error),
                ..Default::default()
            },
        }
    }
}
