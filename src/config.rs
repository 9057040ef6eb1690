//! Provider configuration.
//!
//! The provider block accepts three optional settings, each of which can
//! also come from the environment:
//!
//! | attribute   | environment variable     |
//! |-------------|--------------------------|
//! | `api_token` | `FUSIONAUTH_API_TOKEN`   |
//! | `endpoint`  | `FUSIONAUTH_ENDPOINT`    |
//! | `tenant`    | `FUSIONAUTH_TENANT`      |
//!
//! A non-empty value in the block overrides the environment. Resolution
//! reports every problem it finds rather than stopping at the first.

use crate::diagnostics::Diagnostics;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const ENV_API_TOKEN: &str = "FUSIONAUTH_API_TOKEN";
pub const ENV_ENDPOINT: &str = "FUSIONAUTH_ENDPOINT";
pub const ENV_TENANT: &str = "FUSIONAUTH_TENANT";

/// Per-request network budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw provider settings, from the configuration block or the environment.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub tenant: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("tenant", &self.tenant)
            .finish()
    }
}

/// Treat empty strings the same as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ProviderConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_token: lookup(ENV_API_TOKEN),
            endpoint: lookup(ENV_ENDPOINT),
            tenant: lookup(ENV_TENANT),
        }
    }

    /// Layer this block over `fallback`; non-empty values here win.
    pub fn merge(self, fallback: ProviderConfig) -> ProviderConfig {
        ProviderConfig {
            api_token: non_empty(self.api_token).or_else(|| non_empty(fallback.api_token)),
            endpoint: non_empty(self.endpoint).or_else(|| non_empty(fallback.endpoint)),
            tenant: non_empty(self.tenant).or_else(|| non_empty(fallback.tenant)),
        }
    }

    /// Validate the merged settings into client settings.
    pub fn resolve(self) -> Result<ClientSettings, Diagnostics> {
        let mut diags = Diagnostics::new();

        let api_token = non_empty(self.api_token);
        if api_token.is_none() {
            diags.push(
                ConfigError::MissingApiToken {
                    env_var: ENV_API_TOKEN,
                }
                .into(),
            );
        }

        let base_url = match non_empty(self.endpoint) {
            None => {
                diags.push(
                    ConfigError::MissingEndpoint {
                        env_var: ENV_ENDPOINT,
                    }
                    .into(),
                );
                None
            }
            Some(endpoint) => match parse_endpoint(&endpoint) {
                Ok(url) => Some(url),
                Err(error) => {
                    diags.push(error.into());
                    None
                }
            },
        };

        match (api_token, base_url) {
            (Some(api_token), Some(base_url)) if !diags.has_error() => Ok(ClientSettings {
                base_url,
                api_token,
                tenant_id: non_empty(self.tenant),
                timeout: DEFAULT_TIMEOUT,
            }),
            _ => Err(diags),
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(endpoint).map_err(|e| ConfigError::invalid_endpoint(endpoint, e))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_endpoint(
            endpoint,
            "expected an http or https URL",
        ));
    }
    Ok(url)
}

/// Validated settings used to build the shared client.
#[derive(Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub api_token: String,
    /// Tenant scope for every request; `None` when unset or empty
    pub tenant_id: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}
