use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_WEBHOOK_URL: &str = "https://sumeettz.app.n8n.cloud/webhook-test/real-estate";

#[derive(Debug, Clone, Deserialize)]
pub struct Relay {
    pub bind_addr: String,
    pub webhook_url: String,
    pub timeout_secs: u64,
}

impl Relay {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Rest,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Store {
    pub backend: Backend,
    pub url: String,
    pub api_key: String,
    pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub relay: Relay,
    pub store: Store,
}

impl Settings {
    /// Defaults, then `enquiry.toml` if present, then `ENQUIRY__*` variables
    /// (`ENQUIRY__RELAY__WEBHOOK_URL`, `ENQUIRY__STORE__API_KEY`, ...)
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(
            Environment::with_prefix("ENQUIRY")
                .prefix_separator("__")
                .separator("__"),
        )
    }

    fn load(env: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("relay.bind_addr", "0.0.0.0:8080")?
            .set_default("relay.webhook_url", DEFAULT_WEBHOOK_URL)?
            .set_default("relay.timeout_secs", 30)?
            .set_default("store.backend", "memory")?
            .set_default("store.url", "")?
            .set_default("store.api_key", "")?
            .set_default("store.table", "property_enquiries")?
            .add_source(
                File::with_name("enquiry.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }
}
