//! DigitalOcean DNS Provider

mod error;
mod http;
mod provider;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::config::{ConfigOption, ConfigOptionType, ConfigurationSchema, ProviderConfig};
use crate::error::Result;
use crate::providers::common::{HttpSettings, base_url, create_http_client};
use crate::types::DnsRecordType;
use crate::utils::log_sanitizer::Redactor;

pub(crate) const PROVIDER_NAME: &str = "digitalocean";
pub(crate) const DO_API_BASE: &str = "https://api.digitalocean.com/v2";
/// DigitalOcean 单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 200;

pub(crate) const SUPPORTED_RECORD_TYPES: &[DnsRecordType] = &[
    DnsRecordType::A,
    DnsRecordType::Aaaa,
    DnsRecordType::Cname,
    DnsRecordType::Mx,
    DnsRecordType::Txt,
    DnsRecordType::Srv,
    DnsRecordType::Ns,
    DnsRecordType::Caa,
];

pub(crate) fn configuration_schema() -> ConfigurationSchema {
    ConfigurationSchema::new()
        .option(
            "api_token",
            ConfigOption::required(
                ConfigOptionType::String,
                "DigitalOcean Personal Access Token with write scope",
            )
            .sensitive(),
        )
        .option(
            "base_url",
            ConfigOption::optional(ConfigOptionType::Url, "API endpoint override"),
        )
}

/// DigitalOcean DNS provider.
///
/// Domains are addressed by name, so no prerequisite lookup is needed.
pub struct DigitalOceanProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_token: Option<String>,
    pub(crate) redactor: Redactor,
}

/// Builder for [`DigitalOceanProvider`] with configurable transport timeouts.
pub struct DigitalOceanProviderBuilder {
    config: ProviderConfig,
    settings: HttpSettings,
}

impl DigitalOceanProviderBuilder {
    fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            settings: HttpSettings::default(),
        }
    }

    /// Total request timeout (default: 30s).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Connect timeout (default: 10s).
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<DigitalOceanProvider> {
        Ok(DigitalOceanProvider {
            client: create_http_client(PROVIDER_NAME, self.settings)?,
            base_url: base_url(&self.config, DO_API_BASE),
            api_token: self.config.get_non_empty("api_token").map(str::to_string),
            redactor: Redactor::from_config(&configuration_schema(), &self.config),
        })
    }
}

impl DigitalOceanProvider {
    /// Creates a provider with default transport settings.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(config: ProviderConfig) -> DigitalOceanProviderBuilder {
        DigitalOceanProviderBuilder::new(config)
    }
}

impl std::fmt::Debug for DigitalOceanProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanProvider")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}
