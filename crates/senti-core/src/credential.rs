//! HuggingFace hub credential.
//!
//! The token is read from the environment (or passed on the command line) and
//! handed to the hub clients explicitly. It is never written back into the
//! process environment and never printed in full.

use std::fmt;

use thiserror::Error;

/// Environment variables checked for a hub token, in priority order.
pub const TOKEN_ENV_VARS: &[&str] = &["HF_TOKEN", "HUGGINGFACEHUB_API_TOKEN"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("hub token is empty")]
    Empty,
}

/// A hub access token. `Debug` and `Display` only show a short prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CredentialError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Read the token from [`TOKEN_ENV_VARS`], skipping unset or blank values.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        TOKEN_ENV_VARS
            .iter()
            .filter_map(|key| lookup(*key))
            .find_map(|value| Self::new(value).ok())
    }

    /// The raw secret, for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(3).collect();
        format!("{prefix}***")
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&self.redacted()).finish()
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
