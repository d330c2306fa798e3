//! Cloudflare DNS Provider

mod error;
mod http;
mod provider;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::config::{ConfigOption, ConfigOptionType, ConfigurationSchema, ProviderConfig};
use crate::error::Result;
use crate::prerequisite::KeyedPrerequisites;
use crate::providers::common::{HttpSettings, base_url, create_http_client};
use crate::types::DnsRecordType;
use crate::utils::log_sanitizer::Redactor;

pub(crate) const PROVIDER_NAME: &str = "cloudflare";
pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

pub(crate) const SUPPORTED_RECORD_TYPES: &[DnsRecordType] = &[
    DnsRecordType::A,
    DnsRecordType::Aaaa,
    DnsRecordType::Cname,
    DnsRecordType::Mx,
    DnsRecordType::Txt,
    DnsRecordType::Srv,
    DnsRecordType::Ns,
    DnsRecordType::Caa,
    DnsRecordType::Ptr,
];

pub(crate) fn configuration_schema() -> ConfigurationSchema {
    ConfigurationSchema::new()
        .option(
            "api_token",
            ConfigOption::required(
                ConfigOptionType::String,
                "Cloudflare API Token with Zone.DNS edit permission",
            )
            .sensitive(),
        )
        .option(
            "base_url",
            ConfigOption::optional(ConfigOptionType::Url, "API endpoint override"),
        )
}

/// Cloudflare DNS provider.
///
/// Records live under a zone id, looked up once per domain and instance
/// through `GET /zones?name=<domain>`.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_token: Option<String>,
    pub(crate) zone_ids: KeyedPrerequisites,
    pub(crate) redactor: Redactor,
}

/// Builder for [`CloudflareProvider`] with configurable transport timeouts.
pub struct CloudflareProviderBuilder {
    config: ProviderConfig,
    settings: HttpSettings,
}

impl CloudflareProviderBuilder {
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

    /// Build the [`CloudflareProvider`] instance.
    pub fn build(self) -> Result<CloudflareProvider> {
        Ok(CloudflareProvider {
            client: create_http_client(PROVIDER_NAME, self.settings)?,
            base_url: base_url(&self.config, CF_API_BASE),
            api_token: self.config.get_non_empty("api_token").map(str::to_string),
            zone_ids: KeyedPrerequisites::new(),
            redactor: Redactor::from_config(&configuration_schema(), &self.config),
        })
    }
}

impl CloudflareProvider {
    /// Creates a provider with default transport settings.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(config: ProviderConfig) -> CloudflareProviderBuilder {
        CloudflareProviderBuilder::new(config)
    }
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}
