use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::github::GitHubClient;

pub struct AppState {
    pub config: AppConfig,
    pub client: GitHubClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = GitHubClient::new(&config)?;
        Ok(Self { config, client })
    }
}

pub type SharedState = Arc<AppState>;
