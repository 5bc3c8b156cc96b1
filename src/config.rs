//! Runtime configuration, read from the environment (and `.env`, if present).
//!
//! - `SLACK_TOKEN`: required bot token.
//! - `SLACK_API_BASE`: optional override of [API_BASE].
//! - `FAILURE_POLICY`: optional, `isolate` (default) or `abort`.
//! - `RNG_SEED`: optional `u64`, making selection reproducible.

use crate::{
    slack::{api::API_BASE, auth::SlackAccessToken},
    workflow::FailurePolicy,
};
use std::fmt;
use url::Url;

pub struct Config {
    pub slack_token: SlackAccessToken,
    pub api_base: Url,
    pub policy: FailurePolicy,
    pub seed: Option<u64>,
}

/// Every way the environment can be unusable.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            ConfigError::Missing(var) => format!("No ${} environment variable found", var),
            ConfigError::Invalid { var, value } => format!("Could not parse ${}: {}", var, value),
        };

        write!(f, "{}", x)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.is_empty());

        let slack_token = get("SLACK_TOKEN")
            .map(SlackAccessToken)
            .ok_or(ConfigError::Missing("SLACK_TOKEN"))?;

        let api_base = match get("SLACK_API_BASE") {
            Some(v) => Url::parse(&v).map_err(|_| ConfigError::Invalid {
                var: "SLACK_API_BASE",
                value: v,
            })?,
            None => Url::parse(API_BASE).map_err(|_| ConfigError::Invalid {
                var: "SLACK_API_BASE",
                value: API_BASE.to_owned(),
            })?,
        };

        let policy = match get("FAILURE_POLICY").as_deref() {
            None => FailurePolicy::default(),
            Some(v) => parse_policy(v).ok_or_else(|| ConfigError::Invalid {
                var: "FAILURE_POLICY",
                value: v.to_owned(),
            })?,
        };

        let seed = match get("RNG_SEED") {
            None => None,
            Some(v) => Some(v.parse().map_err(|_| ConfigError::Invalid {
                var: "RNG_SEED",
                value: v,
            })?),
        };

        Ok(Config {
            slack_token,
            api_base,
            policy,
            seed,
        })
    }
}

fn parse_policy(x: &str) -> Option<FailurePolicy> {
    match x.to_ascii_lowercase().as_str() {
        "isolate" => Some(FailurePolicy::Isolate),
        "abort" => Some(FailurePolicy::Abort),
        _ => None,
    }
}
