use reqwest::Url;
use thiserror::Error;

/// Fixed backend address used when running in a development context.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:8000";

const GENERATE_PATH: &str = "generate_cover_letter";
const HEALTH_PATH: &str = "health";

const DEVELOPMENT_NAMES: &[&str] = &["development", "dev", "local"];
const LOCAL_HOSTNAMES: &[&str] = &["localhost", "127.0.0.1", "::1"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required environment variable 'API_URL' is not set for the production environment")]
    MissingApiUrl,

    #[error("API_URL '{0}' is not an absolute http(s) URL")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Development when either the environment name or the hostname says so.
    pub fn detect(name: Option<&str>, hostname: Option<&str>) -> Self {
        let dev_name = name
            .map(|n| DEVELOPMENT_NAMES.contains(&n.to_lowercase().as_str()))
            .unwrap_or(false);
        let local_host = hostname
            .map(|h| LOCAL_HOSTNAMES.contains(&h.to_lowercase().as_str()))
            .unwrap_or(false);

        if dev_name || local_host {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    pub debug: bool,
}

/// Raw environment signals the configuration is resolved from.
#[derive(Debug, Clone, Default)]
pub struct EnvSignals {
    pub environment: Option<String>,
    pub hostname: Option<String>,
    pub api_url: Option<String>,
    pub version: Option<String>,
    pub rust_log: Option<String>,
}

impl EnvSignals {
    pub fn from_process() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Collects the signals through `lookup`. Values are trimmed and blank
    /// ones count as unset, so a blank `APP_ENV` falls through to `NODE_ENV`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            environment: read("APP_ENV")
                .or_else(|| read("NODE_ENV"))
                .or_else(|| read("ENVIRONMENT")),
            hostname: read("APP_HOSTNAME"),
            api_url: read("API_URL"),
            version: read("APP_VERSION"),
            rust_log: read("RUST_LOG"),
        }
    }
}

/// Client configuration. Built once at start-up and handed by reference to
/// whatever needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub api_base_url: String,
    pub version: String,
    pub features: Features,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::resolve(&EnvSignals::from_process())
    }

    /// Resolves the configuration from already collected signals.
    /// A production context without a usable `API_URL` is an error.
    pub fn resolve(signals: &EnvSignals) -> Result<Self, ConfigError> {
        let environment =
            Environment::detect(signals.environment.as_deref(), signals.hostname.as_deref());

        let api_base_url = match environment {
            Environment::Development => LOCAL_API_BASE_URL.to_string(),
            Environment::Production => {
                let raw = signals
                    .api_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .ok_or(ConfigError::MissingApiUrl)?;
                normalize_base_url(raw)?
            }
        };

        let debug = environment == Environment::Development;

        Ok(Config {
            environment,
            api_base_url,
            version: signals
                .version
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            features: Features { debug },
            rust_log: signals
                .rust_log
                .clone()
                .unwrap_or_else(|| if debug { "debug" } else { "info" }.to_string()),
        })
    }

    pub fn generate_endpoint(&self) -> String {
        format!("{}/{}", self.api_base_url, GENERATE_PATH)
    }

    pub fn health_endpoint(&self) -> String {
        format!("{}/{}", self.api_base_url, HEALTH_PATH)
    }

    #[cfg(test)]
    pub fn for_base_url(api_base_url: &str) -> Self {
        Config {
            environment: Environment::Production,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            version: "test".to_string(),
            features: Features { debug: false },
            rust_log: "info".to_string(),
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|_| ConfigError::InvalidApiUrl(raw.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
