//! # dns-gateway-provider
//!
//! A provider-agnostic DNS record client: one contract for creating,
//! reading, updating, deleting and listing records across unrelated vendor
//! REST APIs, with one record model, one configuration schema format and one
//! error taxonomy.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method | Prerequisite |
//! |----------|-------------|-------------|--------------|
//! | [DNSimple](https://dnsimple.com/) | `dnsimple` | Bearer Token | account id (`account_id` or `/whoami`) |
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token | zone id per domain |
//! | [DigitalOcean](https://www.digitalocean.com/) | `digitalocean` | Bearer Token | none |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: enable every provider listed above.
//! - **`dnsimple`**, **`cloudflare`**, **`digitalocean`**: enable a single provider.
//! - **`native-tls`** *(default)* or **`rustls`**: TLS backend.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_gateway_provider::{
//!     create_provider, CreateRecordRequest, DnsRecordType, ProviderConfig, RecordFilter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Build a provider from a name and its configuration
//!     let config = ProviderConfig::new().with("api_token", "your-token");
//!     let provider = create_provider("dnsimple", config)?;
//!
//!     // 2. Check the configuration against the vendor
//!     provider.test_connection().await?;
//!
//!     // 3. Create a record
//!     let id = provider
//!         .create_record(
//!             &CreateRecordRequest::new("example.com", "www", DnsRecordType::A, "1.2.3.4")
//!                 .with_ttl(300),
//!         )
//!         .await?;
//!
//!     // 4. List every A record of the zone, across all vendor pages
//!     let records = provider
//!         .list_records("example.com", &RecordFilter::by_type(DnsRecordType::A))
//!         .await?;
//!     for record in &records {
//!         println!("{} {} {:?}", record.name, record.record_type, record.content);
//!     }
//!
//!     provider.delete_record("example.com", &id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, DnsProviderError>`](DnsProviderError).
//! The taxonomy is closed; vendor and transport errors never leak:
//!
//! - [`DnsProviderError::InvalidConfiguration`]: missing or malformed option
//! - [`DnsProviderError::ConnectionFailed`]: transport error, timeout, failed read
//! - [`DnsProviderError::RecordCreationFailed`] / [`RecordUpdateFailed`](DnsProviderError::RecordUpdateFailed) /
//!   [`RecordDeletionFailed`](DnsProviderError::RecordDeletionFailed): vendor rejected a mutation
//! - [`DnsProviderError::UnknownProvider`]: no adapter registered under the name
//!
//! Adapters never retry. [`DnsProviderError::is_retryable`] tells callers
//! which failures are worth retrying on their side.

/// 单元测试用：断言 `Option` 为 `Some` 并取出内部值。
#[cfg(test)]
macro_rules! require_some {
    ($expr:expr) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

mod config;
mod error;
mod factory;
mod http_client;
mod prerequisite;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{DnsProviderError, ErrorKind, Result};

// Re-export configuration types
pub use config::{ConfigOption, ConfigOptionType, ConfigurationSchema, ProviderConfig};

// Re-export registry and factory functions
pub use factory::{ProviderEntry, ProviderRegistry, create_provider, get_all_provider_metadata};

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsProvider;

// Re-export types
pub use types::{
    BatchCreateFailure, BatchCreateResult, BatchDeleteFailure, BatchDeleteResult,
    CreateRecordRequest, DnsRecord, DnsRecordType, ProviderMetadata, RecordContent, RecordFilter,
    StructuredContent, UnknownRecordType, UpdateRecordRequest,
};

// Re-export utils module
pub use utils::datetime;

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "cloudflare")]
pub use providers::{CloudflareProvider, CloudflareProviderBuilder};
#[cfg(feature = "digitalocean")]
pub use providers::{DigitalOceanProvider, DigitalOceanProviderBuilder};
#[cfg(feature = "dnsimple")]
pub use providers::{DnsimpleProvider, DnsimpleProviderBuilder};
