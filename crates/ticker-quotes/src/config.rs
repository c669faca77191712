use crate::error::ConfigError;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 300;

// environment variables
pub const API_KEY_VAR: &str = "ALPHA_VANTAGE_API";
pub const BASE_URL_VAR: &str = "ALPHA_VANTAGE_URL";
pub const TIMEOUT_VAR: &str = "FETCH_TIMEOUT_SECS";
pub const USER_AGENT_VAR: &str = "USER_AGENT";

/// Everything the fetcher needs from outside the process.
///
/// The API key is an opaque credential; it is never printed by the `Debug` impl.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Read the config from the process environment, loading `.env` first if present.
    ///
    /// | variable             | required | default                            |
    /// |----------------------|----------|------------------------------------|
    /// | `ALPHA_VANTAGE_API`  | yes      |                                    |
    /// | `ALPHA_VANTAGE_URL`  | no       | `https://www.alphavantage.co/query`|
    /// | `FETCH_TIMEOUT_SECS` | no       | `30` (1 to 300)                    |
    /// | `USER_AGENT`         | no       | reqwest's default                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenv::var(name).ok())
    }

    /// Build the config from any name -> value lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;
        let mut config = Self::new(api_key);

        if let Some(base_url) = get(BASE_URL_VAR) {
            config.base_url = base_url;
        }

        if let Some(secs) = get(TIMEOUT_VAR) {
            let secs = secs.parse::<u64>().map_err(|e| ConfigError::InvalidVar {
                name: TIMEOUT_VAR,
                reason: e.to_string(),
            })?;
            if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
                return Err(ConfigError::InvalidVar {
                    name: TIMEOUT_VAR,
                    reason: format!("expected 1 to {MAX_TIMEOUT_SECS} seconds, got {secs}"),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        config.user_agent = get(USER_AGENT_VAR);

        Ok(config)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
