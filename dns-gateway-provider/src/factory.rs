//! Provider registry, factory functions and metadata.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::{DnsProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::ProviderMetadata;

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;
#[cfg(feature = "digitalocean")]
use crate::providers::DigitalOceanProvider;
#[cfg(feature = "dnsimple")]
use crate::providers::DnsimpleProvider;

type Constructor = dyn Fn(ProviderConfig) -> Result<Arc<dyn DnsProvider>> + Send + Sync;

/// One registered adapter: its metadata and how to build it from a config.
#[derive(Clone)]
pub struct ProviderEntry {
    metadata: fn() -> ProviderMetadata,
    constructor: Arc<Constructor>,
}

impl ProviderEntry {
    pub fn new<F>(metadata: fn() -> ProviderMetadata, constructor: F) -> Self
    where
        F: Fn(ProviderConfig) -> Result<Arc<dyn DnsProvider>> + Send + Sync + 'static,
    {
        Self {
            metadata,
            constructor: Arc::new(constructor),
        }
    }

    /// Entry for adapter type `P` built by `constructor`.
    pub fn of<P>(constructor: fn(ProviderConfig) -> Result<P>) -> Self
    where
        P: DnsProvider + 'static,
    {
        Self::new(P::metadata, move |config| {
            constructor(config).map(|p| Arc::new(p) as Arc<dyn DnsProvider>)
        })
    }

    pub fn metadata(&self) -> ProviderMetadata {
        (self.metadata)()
    }
}

impl fmt::Debug for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("id", &(self.metadata)().id)
            .finish_non_exhaustive()
    }
}

/// Name → adapter map.
///
/// Lookups are case-insensitive. New vendors are added with
/// [`register`](Self::register); nothing else in the crate branches on
/// provider names.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    entries: BTreeMap<String, ProviderEntry>,
}

fn registry_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every adapter enabled by Cargo features.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        #[cfg(feature = "dnsimple")]
        registry.register(ProviderEntry::of::<DnsimpleProvider>(DnsimpleProvider::new));
        #[cfg(feature = "cloudflare")]
        registry.register(ProviderEntry::of::<CloudflareProvider>(CloudflareProvider::new));
        #[cfg(feature = "digitalocean")]
        registry.register(ProviderEntry::of::<DigitalOceanProvider>(DigitalOceanProvider::new));
        registry
    }

    /// Registers `entry` under its metadata id, returning any entry it replaces.
    pub fn register(&mut self, entry: ProviderEntry) -> Option<ProviderEntry> {
        let key = registry_key(entry.metadata().id);
        self.entries.insert(key, entry)
    }

    #[must_use]
    pub fn with(mut self, entry: ProviderEntry) -> Self {
        self.register(entry);
        self
    }

    /// Registered provider names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&registry_key(name))
    }

    fn entry(&self, name: &str) -> Result<&ProviderEntry> {
        self.entries
            .get(&registry_key(name))
            .ok_or_else(|| DnsProviderError::UnknownProvider {
                name: name.to_string(),
            })
    }

    /// Metadata of one provider, without constructing it.
    pub fn metadata(&self, name: &str) -> Result<ProviderMetadata> {
        self.entry(name).map(ProviderEntry::metadata)
    }

    /// Metadata of every registered provider, sorted by name.
    pub fn all_metadata(&self) -> Vec<ProviderMetadata> {
        self.entries.values().map(ProviderEntry::metadata).collect()
    }

    /// Resolves `name`, validates `config` against the adapter's schema,
    /// constructs the adapter and runs its own
    /// [`validate_configuration`](DnsProvider::validate_configuration) before
    /// handing it out.
    ///
    /// No network call is made.
    pub fn create(&self, name: &str, config: ProviderConfig) -> Result<Arc<dyn DnsProvider>> {
        let entry = self.entry(name)?;
        let metadata = entry.metadata();
        metadata.schema.validate(metadata.id, &config)?;

        log::debug!("Creating provider {} with {config:?}", metadata.id);
        let provider = (entry.constructor)(config.clone())?;
        provider.validate_configuration(&config)?;
        Ok(provider)
    }
}

/// Creates a built-in [`DnsProvider`] by name.
///
/// The returned provider is wrapped in `Arc<dyn DnsProvider>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_gateway_provider::{create_provider, ProviderConfig};
///
/// let config = ProviderConfig::new().with("api_token", "your-token");
/// let provider = create_provider("dnsimple", config)?;
/// # Ok::<(), dns_gateway_provider::DnsProviderError>(())
/// ```
pub fn create_provider(name: &str, config: ProviderConfig) -> Result<Arc<dyn DnsProvider>> {
    ProviderRegistry::builtin().create(name, config)
}

/// Returns metadata for all providers enabled via feature flags.
///
/// Useful for building dynamic UIs that enumerate available providers
/// and their configuration options.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    ProviderRegistry::builtin().all_metadata()
}
