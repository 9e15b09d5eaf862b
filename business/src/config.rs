use std::any::Any;
use std::env::vars;

use imgshare_states::{State, state_assign_impl};
use serde::Deserialize;

/// The public ImgBB upload endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.imgbb.com/1/upload";

/// Where uploads go and with which key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingConfig {
    /// Upload URL, e.g. [`DEFAULT_ENDPOINT`] or a proxy in front of it.
    pub endpoint: String,
    /// Sent as the `key` query parameter; may be empty behind a proxy.
    pub api_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    imgshare_endpoint: Option<String>,
    imgshare_api_key: Option<String>,
}

impl HostingConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Build-time defaults overridden by `IMGSHARE_ENDPOINT` and
    /// `IMGSHARE_API_KEY` from the process environment.
    pub fn init() -> anyhow::Result<Self> {
        Self::from_vars(vars())
    }

    pub fn from_vars<I, S>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let raw: RawConfig = serde_env::from_iter(vars)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            imgshare_endpoint,
            imgshare_api_key,
        } = raw;
        let defaults = Self::default();

        let endpoint = imgshare_endpoint
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.endpoint);
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            anyhow::bail!("IMGSHARE_ENDPOINT must be an http(s) URL, got {endpoint:?}");
        }

        let api_key = imgshare_api_key
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.api_key);
        if api_key.is_empty() {
            log::warn!(
                target: "imgshare_business::config",
                "hosting_api_key_missing endpoint={endpoint}"
            );
        }

        Ok(Self { endpoint, api_key })
    }
}

impl Default for HostingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: option_env!("IMGBB_API_KEY").unwrap_or_default().to_owned(),
        }
    }
}

impl State for HostingConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}
