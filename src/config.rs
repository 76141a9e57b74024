use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::exchange::BINANCE_API_URL;

/// Runtime settings, sourced from the process environment (a `.env` file
/// is loaded by `main` before this runs). Credentials are required;
/// construction fails before any trading call can be made without them.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    BINANCE_API_URL.to_string()
}

impl Settings {
    /// Read `BINANCE_API_KEY`, `BINANCE_API_SECRET` and optionally
    /// `BINANCE_API_URL` from the environment.
    pub fn new() -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(Environment::with_prefix("BINANCE"))
            .build()?
            .try_deserialize()?;

        settings.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            return Err(ConfigError::Message(
                "The API key and API secret are required".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_is_production() {
        assert_eq!(default_api_url(), "https://api.binance.com");
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let missing_key = Settings {
            api_key: String::new(),
            api_secret: "secret".to_string(),
            api_url: default_api_url(),
        };
        assert!(missing_key.validate().is_err());

        let missing_secret = Settings {
            api_key: "key".to_string(),
            api_secret: String::new(),
            api_url: default_api_url(),
        };
        assert!(missing_secret.validate().is_err());

        let complete = Settings {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            api_url: default_api_url(),
        };
        assert!(complete.validate().is_ok());
    }
}
