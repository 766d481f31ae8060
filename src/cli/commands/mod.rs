//! CLI subcommands

pub mod analyse;
pub mod encode;
pub mod feedback;
pub mod locate;

use crate::api::AnalysisClient;
use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::Args;

/// Endpoint overrides shared by every command that talks to the backend
#[derive(Args, Clone, Debug, Default)]
pub struct EndpointArgs {
    /// Analysis endpoint URL (overrides config.toml)
    #[arg(long)]
    pub analysis_url: Option<String>,

    /// Feedback endpoint URL (overrides config.toml)
    #[arg(long)]
    pub feedback_url: Option<String>,

    /// Geolocation endpoint URL (overrides config.toml)
    #[arg(long)]
    pub geolocation_url: Option<String>,
}

impl EndpointArgs {
    /// Load configuration and apply CLI overrides on top
    pub fn resolve_config(&self) -> AppConfig {
        let mut config = AppConfig::get_defaults();
        if let Some(url) = &self.analysis_url {
            config.api.analysis_url = url.clone();
        }
        if let Some(url) = &self.feedback_url {
            config.api.feedback_url = url.clone();
        }
        if let Some(url) = &self.geolocation_url {
            config.api.geolocation_url = url.clone();
        }
        config
    }

    pub fn build_client(&self) -> AppResult<AnalysisClient> {
        let config = self.resolve_config();
        Ok(AnalysisClient::from_config(&config)?)
    }
}
