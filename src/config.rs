//! Server configuration.
//!
//! Credentials are sourced from the process environment (optionally via a
//! `.env` file loaded in `main`). All three credential values are required;
//! the base URL has a sensible default and only needs overriding for test
//! or staging deployments.

use anyhow::{bail, Result};

use crate::api::DEFAULT_BASE_URL;
use crate::auth::Credentials;

const ENV_USER_ID: &str = "ALICEBLUE_USER_ID";
const ENV_AUTH_CODE: &str = "ALICEBLUE_AUTH_CODE";
const ENV_API_SECRET: &str = "ALICEBLUE_API_SECRET";
const ENV_BASE_URL: &str = "ALICEBLUE_BASE_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub user_id: String,
    pub auth_code: String,
    pub api_secret: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let user_id = require(&lookup, ENV_USER_ID)?;
        let auth_code = require(&lookup, ENV_AUTH_CODE)?;
        let api_secret = require(&lookup, ENV_API_SECRET)?;
        let base_url = lookup(ENV_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            user_id,
            auth_code,
            api_secret,
            base_url,
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.user_id.clone(),
            self.auth_code.clone(),
            self.api_secret.clone(),
        )
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("missing required environment variable {key}"),
    }
}
