use anyhow::Context;
use hearting_api::HttpHeartApi;
use hearting_board::{HeartBoard, Prompter};
use hearting_config::{AppConfig, ConfigManager};
use hearting_state::MessageStateStore;
use std::sync::Arc;

pub struct AppState {
    pub(crate) config_manager: ConfigManager,
    pub(crate) config: AppConfig,
    pub(crate) board: HeartBoard,
}

impl AppState {
    pub fn load_config() -> anyhow::Result<(ConfigManager, AppConfig)> {
        let config_manager = ConfigManager::new().context("initialize config manager")?;
        let config = config_manager.load().context("load app config")?;
        Ok((config_manager, config))
    }

    pub fn initialize(
        config_manager: ConfigManager,
        config: AppConfig,
        prompter: Arc<dyn Prompter>,
    ) -> anyhow::Result<Self> {
        let store = match config_manager.persisted_state_path(&config) {
            Some(path) => MessageStateStore::with_persistence(path),
            None => MessageStateStore::new(),
        };
        let api = HttpHeartApi::new(&config.api).context("build hearting http client")?;
        tracing::debug!(base_url = %api.base_url(), "hearting client ready");

        let board = HeartBoard::new(Arc::new(api), prompter, store);

        Ok(Self {
            config_manager,
            config,
            board,
        })
    }
}
