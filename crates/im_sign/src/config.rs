use serde::{Deserialize, Serialize};

use crate::error::SignError;

pub const ENDPOINT_ENV: &str = "SIGN_SERVER_URL";
pub const USER_AGENT_ENV: &str = "SIGN_USER_AGENT";
/// Comma separated commands appended to the default whitelist.
pub const EXTRA_COMMANDS_ENV: &str = "SIGN_EXTRA_COMMANDS";

fn default_user_agent() -> String {
    format!("im-sign/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignConfig {
    /// Sign service URL; the query string is appended per request.
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub extra_commands: Vec<String>,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            user_agent: default_user_agent(),
            extra_commands: vec![],
        }
    }
}

impl SignConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> Result<Self, SignError> {
        let endpoint =
            std::env::var(ENDPOINT_ENV).map_err(|_| SignError::MissingConfig(ENDPOINT_ENV))?;
        let user_agent = std::env::var(USER_AGENT_ENV)
            .ok()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(default_user_agent);
        let extra_commands = std::env::var(EXTRA_COMMANDS_ENV)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|cmd| !cmd.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            endpoint,
            user_agent,
            extra_commands,
        })
    }
}
