use std::env::vars;

use chrono::TimeDelta;
use serde::Deserialize;
use ustr::Ustr;

use crate::ALERT_TIMEOUT;

const NATIVE_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Base URL without trailing slash; empty means same origin.
    api_base_url: String,
    alert_timeout: TimeDelta,
}

// Environment variables as read, before defaults are applied.
#[derive(Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    alert_timeout_ms: Option<u32>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url().to_owned(),
            alert_timeout: ALERT_TIMEOUT,
        }
    }
}

fn default_api_base_url() -> &'static str {
    if cfg!(target_arch = "wasm32") {
        ""
    } else {
        NATIVE_API_BASE_URL
    }
}

impl UploadConfig {
    pub fn new(api_base_url: impl Into<String>) -> anyhow::Result<Self> {
        Self::from_raw(RawConfig {
            api_base_url: Some(api_base_url.into()),
            alert_timeout_ms: None,
        })
    }

    /// Reads `API_BASE_URL` and `ALERT_TIMEOUT_MS` from the environment.
    pub fn init() -> anyhow::Result<Self> {
        log::info!(target: "leafcheck_business::config", "Loading configuration from environment");
        let raw: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            api_base_url,
            alert_timeout_ms,
        } = raw;

        let api_base_url = match api_base_url {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_owned();
                if !(url.is_empty()
                    || url.starts_with("http://")
                    || url.starts_with("https://")
                    || url.starts_with('/'))
                {
                    anyhow::bail!(
                        "API_BASE_URL must start with http://, https:// or /, got {:?}",
                        url
                    );
                }
                url
            }
            None => {
                let url = default_api_base_url();
                log::info!(
                    target: "leafcheck_business::config",
                    "API_BASE_URL not set, defaulting to {:?}",
                    url
                );
                url.to_owned()
            }
        };

        let alert_timeout = match alert_timeout_ms {
            Some(0) => anyhow::bail!("ALERT_TIMEOUT_MS must be greater than zero"),
            Some(ms) => TimeDelta::milliseconds(i64::from(ms)),
            None => ALERT_TIMEOUT,
        };

        Ok(Self {
            api_base_url,
            alert_timeout,
        })
    }

    /// Where the upload form is posted.
    pub fn endpoint(&self) -> Ustr {
        Ustr::from(&format!("{}/upload", self.api_base_url))
    }

    pub fn alert_timeout(&self) -> TimeDelta {
        self.alert_timeout
    }
}
