//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub(crate) mod common;

#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "digitalocean")]
mod digitalocean;
#[cfg(feature = "dnsimple")]
mod dnsimple;

#[cfg(feature = "cloudflare")]
pub use cloudflare::{CloudflareProvider, CloudflareProviderBuilder};
#[cfg(feature = "digitalocean")]
pub use digitalocean::{DigitalOceanProvider, DigitalOceanProviderBuilder};
#[cfg(feature = "dnsimple")]
pub use dnsimple::{DnsimpleProvider, DnsimpleProviderBuilder};
