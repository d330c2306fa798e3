//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::config::ProviderConfig;
use crate::error::{DnsProviderError, Result};
use crate::types::{CreateRecordRequest, DnsRecordType, StructuredContent};

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transport settings shared by every adapter builder.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HttpSettings {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// 创建带超时配置的 HTTP Client
pub(crate) fn create_http_client(provider: &str, settings: HttpSettings) -> Result<Client> {
    Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.timeout)
        .build()
        .map_err(|e| DnsProviderError::ConnectionFailed {
            provider: provider.to_string(),
            detail: format!("failed to create HTTP client: {e}"),
        })
}

// ============ 配置 ============

/// API base URL from the `base_url` option, or `default`. Trailing slashes are stripped.
pub(crate) fn base_url(config: &ProviderConfig, default: &str) -> String {
    config
        .get_non_empty("base_url")
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the API token or `InvalidConfiguration` when it was not configured.
///
/// Checked on every operation before any request is built.
pub(crate) fn require_token<'a>(provider: &str, token: Option<&'a str>) -> Result<&'a str> {
    token.ok_or_else(|| DnsProviderError::InvalidConfiguration {
        provider: provider.to_string(),
        key: "api_token".to_string(),
        reason: "missing required option".to_string(),
    })
}

/// Joins `base`, `path` and a percent-encoded query string.
pub(crate) fn build_url(base: &str, path: &str, query: &[(&str, String)]) -> String {
    let mut url = format!("{base}{path}");
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}

/// Percent-encodes one path segment (domain name, record id).
pub(crate) fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

// ============ 记录校验 ============

/// Local checks for a create request, run before any network call.
///
/// The type must be one the adapter supports and structured content must
/// belong to the requested type.
pub(crate) fn check_create_request(
    provider: &str,
    req: &CreateRecordRequest,
    supported: &[DnsRecordType],
) -> Result<()> {
    let reject = |detail: String| DnsProviderError::RecordCreationFailed {
        provider: provider.to_string(),
        domain: normalize_domain_name(&req.domain),
        name: normalize_record_name(&req.name),
        detail,
    };

    if !supported.contains(&req.record_type) {
        return Err(reject(format!(
            "record type {} is not supported by this provider",
            req.record_type
        )));
    }
    req.content.check_type(req.record_type).map_err(reject)
}

// ============ 记录内容 ============

/// Parses `"<weight> <port> <target>"`, the SRV content form used when the
/// priority travels in its own field.
pub(crate) fn parse_srv_content(priority: u16, content: &str) -> Option<StructuredContent> {
    let mut parts = content.split_whitespace();
    let (weight, port, target) = parse_srv_tail(&mut parts)?;
    Some(StructuredContent::Srv {
        priority,
        weight,
        port,
        target,
    })
}

fn parse_srv_tail<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<(u16, u16, String)> {
    let weight = parts.next()?.parse().ok()?;
    let port = parts.next()?.parse().ok()?;
    let target = parts.next()?.to_string();
    parts.next().is_none().then_some((weight, port, target))
}

/// `"<weight> <port> <target>"`
pub(crate) fn format_srv_content(weight: u16, port: u16, target: &str) -> String {
    format!("{weight} {port} {target}")
}

/// `<flags> <tag> "<value>"`, the value may be quoted and contain spaces.
pub(crate) fn parse_caa_content(text: &str) -> Option<StructuredContent> {
    let mut parts = text.trim().splitn(3, char::is_whitespace);
    let flags = parts.next()?.parse().ok()?;
    let tag = parts.next()?.to_string();
    let value = parts.next()?.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    if tag.is_empty() || value.is_empty() {
        return None;
    }
    Some(StructuredContent::Caa {
        flags,
        tag,
        value: value.to_string(),
    })
}

/// `<flags> <tag> "<value>"`
pub(crate) fn format_caa_content(flags: u8, tag: &str, value: &str) -> String {
    format!("{flags} {tag} \"{value}\"")
}

// ============ 域名名称处理 ============

/// 去掉域名首尾空白与末尾的点，统一小写
pub(crate) fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Relative record name as stored in the model: trimmed, `"@"` becomes the empty apex name.
pub(crate) fn normalize_record_name(name: &str) -> String {
    let name = name.trim().trim_end_matches('.');
    if name == "@" {
        String::new()
    } else {
        name.to_string()
    }
}

/// 将完整域名转换为相对名称
/// 如: "www.example.com" + "example.com" -> "www"
/// 如: "example.com" + "example.com" -> ""
pub(crate) fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full == zone {
        String::new()
    } else if let Some(subdomain) = full.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        full
    }
}

/// 将相对名称转换为完整域名
/// 如: "www" + "example.com" -> "www.example.com"
/// 如: "@" / "" + "example.com" -> "example.com"
pub(crate) fn relative_to_full_name(relative_name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);
    let relative = normalize_record_name(relative_name);

    if relative.is_empty() {
        zone
    } else {
        format!("{relative}.{zone}")
    }
}

// ============ Serde helpers ============

/// Record ids arrive as JSON numbers from some vendors and strings from others.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(n) => n.to_string(),
        Id::Text(s) => s,
    })
}

/// Vendor type strings outside the model (SOA, ALIAS, ...) yield `None` and are skipped.
pub(crate) fn parse_vendor_record_type(provider: &str, raw: &str) -> Option<DnsRecordType> {
    match raw.parse() {
        Ok(t) => Some(t),
        Err(_) => {
            log::debug!("[{provider}] Skipping record of unsupported type {raw}");
            None
        }
    }
}
