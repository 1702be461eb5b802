use serde::Deserialize;
use config::{Config, ConfigError};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://openapi.etsy.com/v3/application";
pub const DEFAULT_KEY_ENV: &str = "ETSY_KEY_STRING";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub shop: ShopConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub key_env: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ShopConfig {
    pub name: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.key_env", DEFAULT_KEY_ENV)?
            .set_default("output.dir", ".")?
            .add_source(config::File::with_name("config/default.yaml").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let config = builder.build()?;
        let settings: Settings = config.try_deserialize()?;

        debug!(
            base_url = %settings.api.base_url,
            key_env = %settings.api.key_env,
            output_dir = %settings.output.dir,
            "Loaded settings"
        );

        Ok(settings)
    }

    /// Settings pointing at an arbitrary API root, used by tests and tools.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                key_env: DEFAULT_KEY_ENV.to_string(),
            },
            output: OutputConfig {
                dir: ".".to_string(),
            },
            shop: ShopConfig::default(),
        }
    }
}
