use std::env;
use std::fmt;

use crate::error::{Error, Result};
use crate::{DEFAULT_CLOB_HOST, DEFAULT_CLOB_TIMEOUT_SECS};

#[derive(Clone)]
pub struct BuilderCredentials {
    pub key: String,
    pub secret: String,
    pub passphrase: String,
}

// Keep secrets out of logs.
impl fmt::Debug for BuilderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderCredentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .field("passphrase", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub timeout_secs: u64,
    pub credentials: BuilderCredentials,
}

fn required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{} not set", name)))
}

impl BuilderCredentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            key: required(&lookup, "BUILDER_API_KEY")?,
            secret: required(&lookup, "BUILDER_SECRET")?,
            passphrase: required(&lookup, "BUILDER_PASS_PHRASE")?,
        })
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup("CLOB_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .ok()
                .filter(|secs: &u64| *secs > 0)
                .ok_or_else(|| Error::Config("Invalid CLOB_TIMEOUT_SECS format".to_string()))?,
            None => DEFAULT_CLOB_TIMEOUT_SECS,
        };

        Ok(Self {
            host: lookup("CLOB_HOST").unwrap_or_else(|| DEFAULT_CLOB_HOST.to_string()),
            timeout_secs,
            credentials: BuilderCredentials::from_lookup(&lookup)?,
        })
    }
}
