use crate::{AppConfig, ConfigError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const ORG: &str = "kr";
const AUTHOR: &str = "Hearting";
const APP: &str = "Hearting";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    data_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from(ORG, AUTHOR, APP).ok_or(ConfigError::MissingDirectories)?;
        Self::from_dirs(dirs.config_dir().to_path_buf(), dirs.data_dir().to_path_buf())
    }

    /// Keeps config and data under one explicit root instead of the platform directories.
    pub fn at(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let root = root.as_ref();
        Self::from_dirs(root.join("config"), root.join("data"))
    }

    fn from_dirs(config_dir: PathBuf, data_dir: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&config_dir)?;
        fs::create_dir_all(&data_dir)?;

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            let initial = AppConfig::default();
            let content = toml::to_string_pretty(&initial)?;
            fs::write(&config_path, content)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
        }

        Ok(Self {
            config_path,
            data_dir,
        })
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(&self.config_path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Where the persisted UI flags live, `None` when persistence is off.
    pub fn persisted_state_path(&self, config: &AppConfig) -> Option<PathBuf> {
        config
            .persistence
            .enabled
            .then(|| self.data_dir.join(&config.persistence.file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn first_run_writes_default_config() {
        let root = tempfile::tempdir().expect("tempdir");
        let manager = ConfigManager::at(root.path()).expect("manager");

        assert!(manager.config_path().exists());
        let config = manager.load().expect("config loads");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.request_timeout_secs, None);
    }

    #[test]
    fn saved_config_round_trips_and_keeps_existing_file() {
        let root = tempfile::tempdir().expect("tempdir");
        let manager = ConfigManager::at(root.path()).expect("manager");

        let mut config = manager.load().expect("config loads");
        config.api.base_url = Url::parse("http://localhost:8080/api/").expect("url");
        config.api.access_token = Some("token-123".to_string());
        manager.save(&config).expect("config saved");

        let reopened = ConfigManager::at(root.path()).expect("manager reopened");
        assert_eq!(reopened.load().expect("config loads"), config);
    }

    #[test]
    fn persisted_state_path_follows_toggle() {
        let root = tempfile::tempdir().expect("tempdir");
        let manager = ConfigManager::at(root.path()).expect("manager");
        let mut config = AppConfig::default();

        let path = manager.persisted_state_path(&config).expect("enabled by default");
        assert_eq!(path, manager.data_dir().join("ui-state.json"));

        config.persistence.enabled = false;
        assert_eq!(manager.persisted_state_path(&config), None);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = Url::parse("ftp://hearting.kr/").expect("url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "api.base_url", .. })
        ));
    }
}
