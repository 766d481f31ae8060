use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Default analysis endpoint of the BuyEuropean backend
pub const DEFAULT_ANALYSIS_URL: &str =
    "https://buy-e-ubackend-felixgraeber.replit.app/analyze-product";

/// Default feedback endpoint of the BuyEuropean backend
pub const DEFAULT_FEEDBACK_URL: &str = "https://buy-e-ubackend-felixgraeber.replit.app/feedback";

/// Default public IP geolocation endpoint
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub client: ClientConfig,
}

/// Remote endpoints used by the analysis client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub analysis_url: String,
    pub feedback_url: String,
    pub geolocation_url: String,
    /// Value sent in the `origin` header; `referer` is derived from it
    pub origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            analysis_url: DEFAULT_ANALYSIS_URL.to_string(),
            feedback_url: DEFAULT_FEEDBACK_URL.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            origin: "https://buyeuropean.io".to_string(),
        }
    }
}

/// Client identity and image settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub app_name: String,
    pub version: String,
    /// JPEG quality used when re-encoding images (1-100)
    pub jpeg_quality: u8,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_name: "BuyEuropean".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            jpeg_quality: 90,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let api = ApiConfig::default();
        let client = ClientConfig::default();
        let config = Config::builder()
            .set_default("api.analysis_url", api.analysis_url)?
            .set_default("api.feedback_url", api.feedback_url)?
            .set_default("api.geolocation_url", api.geolocation_url)?
            .set_default("api.origin", api.origin)?
            .set_default("client.app_name", client.app_name)?
            .set_default("client.version", client.version)?
            .set_default("client.jpeg_quality", client.jpeg_quality as i64)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // BUYEUROPEAN_API__ANALYSIS_URL overrides api.analysis_url, etc.
            .add_source(
                Environment::with_prefix("BUYEUROPEAN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;

        if app_config.client.jpeg_quality == 0 || app_config.client.jpeg_quality > 100 {
            return Err(ConfigError::Message(format!(
                "client.jpeg_quality must be between 1 and 100, got {}",
                app_config.client.jpeg_quality
            )));
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Falling back to built-in configuration: {}", e);
                Self {
                    api: ApiConfig::default(),
                    client: ClientConfig::default(),
                }
            }
        }
    }
}
