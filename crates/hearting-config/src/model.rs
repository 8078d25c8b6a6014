use crate::ConfigError;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://hearting.kr/api/";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub version: u32,
    pub api: ApiConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    #[serde(default)]
    pub access_token: Option<String>,
    /// Requests never time out unless this is set.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistenceConfig {
    pub enabled: bool,
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            // Parsing a literal we control.
            base_url: Url::parse(DEFAULT_API_BASE).expect("default api base is a valid url"),
            access_token: None,
            request_timeout_secs: None,
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file_name: "ui-state.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api: ApiConfig::default(),
            persistence: PersistenceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.api.base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::Invalid {
                    field: "api.base_url",
                    reason: format!("unsupported scheme `{other}`"),
                })
            }
        }
        if self.api.base_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid {
                field: "api.base_url",
                reason: "must be a base url".to_string(),
            });
        }
        if self.persistence.enabled && self.persistence.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "persistence.file_name",
                reason: "must not be empty when persistence is enabled".to_string(),
            });
        }
        if self.api.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                field: "api.request_timeout_secs",
                reason: "use no value instead of zero to disable the timeout".to_string(),
            });
        }
        Ok(())
    }
}
