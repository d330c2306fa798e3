//! DNSimple DNS Provider

mod error;
mod http;
mod provider;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::config::{ConfigOption, ConfigOptionType, ConfigurationSchema, ProviderConfig};
use crate::error::Result;
use crate::prerequisite::PrerequisiteCell;
use crate::providers::common::{HttpSettings, base_url, create_http_client};
use crate::types::DnsRecordType;
use crate::utils::log_sanitizer::Redactor;

pub(crate) const PROVIDER_NAME: &str = "dnsimple";
pub(crate) const DNSIMPLE_API_BASE: &str = "https://api.dnsimple.com/v2";
/// DNSimple 单页最大记录数
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

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
            ConfigOption::required(ConfigOptionType::String, "DNSimple API Access Token")
                .sensitive(),
        )
        .option(
            "account_id",
            ConfigOption::optional(
                ConfigOptionType::String,
                "DNSimple Account ID (Optional, will be auto-detected if not provided)",
            ),
        )
        .option(
            "base_url",
            ConfigOption::optional(
                ConfigOptionType::Url,
                "API endpoint override, e.g. https://api.sandbox.dnsimple.com/v2",
            ),
        )
}

/// DNSimple DNS provider.
///
/// Authenticates with a bearer API token. Zone calls are scoped by account
/// id: taken from the `account_id` option when set, otherwise discovered once
/// per instance through `GET /whoami`.
///
/// # Construction
///
/// ```rust,no_run
/// use std::time::Duration;
/// use dns_gateway_provider::{DnsimpleProvider, ProviderConfig};
///
/// let config = ProviderConfig::new().with("api_token", "your-token");
/// let provider = DnsimpleProvider::builder(config)
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok::<(), dns_gateway_provider::DnsProviderError>(())
/// ```
pub struct DnsimpleProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_token: Option<String>,
    pub(crate) account_id: PrerequisiteCell,
    pub(crate) redactor: Redactor,
}

/// Builder for [`DnsimpleProvider`] with configurable transport timeouts.
pub struct DnsimpleProviderBuilder {
    config: ProviderConfig,
    settings: HttpSettings,
}

impl DnsimpleProviderBuilder {
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

    /// Build the [`DnsimpleProvider`] instance.
    ///
    /// A missing `api_token` is not an error here; every operation reports it
    /// as `InvalidConfiguration` before touching the network.
    pub fn build(self) -> Result<DnsimpleProvider> {
        let redactor = Redactor::from_config(&configuration_schema(), &self.config);
        Ok(DnsimpleProvider {
            client: create_http_client(PROVIDER_NAME, self.settings)?,
            base_url: base_url(&self.config, DNSIMPLE_API_BASE),
            api_token: self.config.get_non_empty("api_token").map(str::to_string),
            account_id: PrerequisiteCell::new(
                self.config.get_non_empty("account_id").map(str::to_string),
            ),
            redactor,
        })
    }
}

impl DnsimpleProvider {
    /// Creates a provider with default transport settings.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(config: ProviderConfig) -> DnsimpleProviderBuilder {
        DnsimpleProviderBuilder::new(config)
    }
}

impl std::fmt::Debug for DnsimpleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsimpleProvider")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("account_id", &self.account_id.get())
            .finish_non_exhaustive()
    }
}
