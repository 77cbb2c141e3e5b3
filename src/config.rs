use crate::constants::API_TOKEN_ENV;
use crate::error::{AppError, Result};

/// Runtime configuration, resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// FinMind API access token, sent as a query parameter on every request.
    pub api_token: String,
}

impl Config {
    /// Read configuration from the environment. A missing or empty token is a
    /// startup error; the process must not begin serving without credentials.
    pub fn from_env() -> Result<Self> {
        let api_token = std::env::var(API_TOKEN_ENV).map_err(|_| {
            AppError::Config(format!(
                "{} must be set (FinMind API token, see https://finmindtrade.com)",
                API_TOKEN_ENV
            ))
        })?;

        if api_token.trim().is_empty() {
            return Err(AppError::Config(format!("{} is set but empty", API_TOKEN_ENV)));
        }

        Ok(Self { api_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_config_error() {
        std::env::remove_var(API_TOKEN_ENV);
        match Config::from_env() {
            Err(AppError::Config(msg)) => assert!(msg.contains(API_TOKEN_ENV)),
            other => panic!("expected Config error, got {:?}", other),
        }
    }
}
