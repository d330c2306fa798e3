//! Provider configuration and its schema.
//!
//! A [`ProviderConfig`] is a flat option-name → value map produced by an
//! external settings store. A [`ConfigurationSchema`] describes which options an
//! adapter accepts, which are required and which are secrets. The schema is
//! serialized as `{ "<key>": { "type", "required", "description", "sensitive" } }`
//! so a settings UI can render provider forms without knowing vendor details.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DnsProviderError, Result};

// ============ ProviderConfig ============

/// Option name → value mapping supplied once at adapter construction.
///
/// `Debug` prints keys only, so a config can be logged without exposing secrets.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderConfig(BTreeMap<String, String>);

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value, including blank strings.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProviderConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============ ConfigurationSchema ============

/// Declared value shape of a configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOptionType {
    /// Any non-blank string.
    String,
    /// A base-10 integer.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// An absolute `http`/`https` URL.
    Url,
}

/// Definition of a single configuration option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOption {
    #[serde(rename = "type")]
    pub option_type: ConfigOptionType,
    pub required: bool,
    pub description: String,
    /// Secrets are never logged and are masked in error messages.
    pub sensitive: bool,
}

impl ConfigOption {
    pub fn required(option_type: ConfigOptionType, description: impl Into<String>) -> Self {
        Self {
            option_type,
            required: true,
            description: description.into(),
            sensitive: false,
        }
    }

    pub fn optional(option_type: ConfigOptionType, description: impl Into<String>) -> Self {
        Self {
            option_type,
            required: false,
            description: description.into(),
            sensitive: false,
        }
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    fn check_shape(&self, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match self.option_type {
            ConfigOptionType::String => Ok(()),
            ConfigOptionType::Integer => value
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| "expected an integer".to_string()),
            ConfigOptionType::Boolean => match value {
                "true" | "false" => Ok(()),
                _ => Err("expected `true` or `false`".to_string()),
            },
            ConfigOptionType::Url => match reqwest::Url::parse(value) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
                Ok(url) => Err(format!("unsupported URL scheme '{}'", url.scheme())),
                Err(e) => Err(format!("invalid URL: {e}")),
            },
        }
    }
}

/// Option name → [`ConfigOption`] mapping describing an adapter's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigurationSchema(BTreeMap<String, ConfigOption>);

impl ConfigurationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn option(mut self, key: impl Into<String>, option: ConfigOption) -> Self {
        self.0.insert(key.into(), option);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigOption> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigOption)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys of options marked `required`.
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, o)| o.required).map(|(k, _)| k)
    }

    /// Keys of options marked `sensitive`.
    pub fn sensitive_keys(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, o)| o.sensitive).map(|(k, _)| k)
    }

    /// Validates `config` locally, without touching the network.
    ///
    /// Every required option must be present and non-blank; every present
    /// option must match its declared shape. Unknown keys are ignored.
    /// Error messages name the key, never the value.
    pub fn validate(&self, provider: &str, config: &ProviderConfig) -> Result<()> {
        for (key, option) in self.iter() {
            let value = config.get(key);
            match value {
                None if option.required => {
                    return Err(invalid(provider, key, "missing required option"));
                }
                Some(v) if v.trim().is_empty() && option.required => {
                    return Err(invalid(provider, key, "required option must not be empty"));
                }
                Some(v) if !v.trim().is_empty() => {
                    option
                        .check_shape(v)
                        .map_err(|reason| invalid(provider, key, reason))?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn invalid(provider: &str, key: &str, reason: impl Into<String>) -> DnsProviderError {
    DnsProviderError::InvalidConfiguration {
        provider: provider.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ConfigurationSchema {
        ConfigurationSchema::new()
            .option(
                "api_token",
                ConfigOption::required(ConfigOptionType::String, "API token").sensitive(),
            )
            .option(
                "account_id",
                ConfigOption::optional(ConfigOptionType::String, "Account"),
            )
            .option(
                "base_url",
                ConfigOption::optional(ConfigOptionType::Url, "Endpoint"),
            )
            .option(
                "page_size",
                ConfigOption::optional(ConfigOptionType::Integer, "Page size"),
            )
            .option(
                "sandbox",
                ConfigOption::optional(ConfigOptionType::Boolean, "Sandbox"),
            )
    }

    fn config(pairs: &[(&str, &str)]) -> ProviderConfig {
        pairs.iter().copied().collect()
    }

    #[test]
    fn accepts_config_with_required_keys() {
        let res = schema().validate("dnsimple", &config(&[("api_token", "abc")]));
        assert!(res.is_ok(), "unexpected: {res:?}");
    }

    #[test]
    fn missing_required_key_is_named() {
        let res = schema().validate("dnsimple", &config(&[("account_id", "1")]));
        assert!(
            matches!(
                &res,
                Err(DnsProviderError::InvalidConfiguration { provider, key, .. })
                    if provider == "dnsimple" && key == "api_token"
            ),
            "unexpected: {res:?}"
        );
    }

    #[test]
    fn blank_required_key_is_rejected() {
        let res = schema().validate("dnsimple", &config(&[("api_token", "   ")]));
        assert!(
            matches!(&res, Err(DnsProviderError::InvalidConfiguration { key, .. }) if key == "api_token"),
            "unexpected: {res:?}"
        );
    }

    #[test]
    fn blank_optional_key_is_ignored() {
        let res = schema().validate("dnsimple", &config(&[("api_token", "abc"), ("base_url", "")]));
        assert!(res.is_ok(), "unexpected: {res:?}");
    }

    #[test]
    fn malformed_values_are_rejected() {
        for (key, value) in [
            ("base_url", "not a url"),
            ("base_url", "ftp://example.com"),
            ("page_size", "ten"),
            ("sandbox", "yes"),
        ] {
            let res = schema().validate("dnsimple", &config(&[("api_token", "abc"), (key, value)]));
            assert!(
                matches!(&res, Err(DnsProviderError::InvalidConfiguration { key: k, .. }) if k == key),
                "{key}={value}: unexpected {res:?}"
            );
        }
    }

    #[test]
    fn error_never_contains_value() {
        let res = schema().validate(
            "dnsimple",
            &config(&[("api_token", "abc"), ("base_url", "s3cr3t-not-a-url")]),
        );
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(e) = res else {
            return;
        };
        assert!(!e.to_string().contains("s3cr3t"));
    }

    #[test]
    fn schema_serializes_in_settings_shape() {
        let json = serde_json::to_value(schema()).unwrap_or_default();
        assert_eq!(
            json["api_token"],
            serde_json::json!({
                "type": "string",
                "required": true,
                "description": "API token",
                "sensitive": true
            })
        );
        assert_eq!(json["base_url"]["type"], "url");
    }

    #[test]
    fn required_and_sensitive_keys() {
        let s = schema();
        assert_eq!(s.required_keys().collect::<Vec<_>>(), vec!["api_token"]);
        assert_eq!(s.sensitive_keys().collect::<Vec<_>>(), vec!["api_token"]);
    }

    #[test]
    fn debug_hides_values() {
        let c = config(&[("api_token", "super-secret")]);
        let dbg = format!("{c:?}");
        assert!(dbg.contains("api_token"));
        assert!(!dbg.contains("super-secret"));
    }

    #[test]
    fn get_non_empty_trims() {
        let c = config(&[("a", "  x "), ("b", "  ")]);
        assert_eq!(c.get_non_empty("a"), Some("x"));
        assert_eq!(c.get_non_empty("b"), None);
        assert_eq!(c.get_non_empty("c"), None);
    }
}
