//! DNSimple error mapping

use crate::traits::{ApiFailure, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::Redactor;

use super::types::DnsimpleErrorBody;
use super::{DnsimpleProvider, PROVIDER_NAME};

/// DNSimple reports failures through the HTTP status; the body carries a
/// message and optional per-field validation errors.
/// Reference: <https://developer.dnsimple.com/v2/#response-codes>
impl ProviderErrorMapper for DnsimpleProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    fn extract_error(&self, status: u16, body: &str) -> RawApiError {
        let failure = match status {
            // 402: plan limit reached
            402 => ApiFailure::QuotaExceeded,
            other => ApiFailure::from_status(other),
        };

        let message = match serde_json::from_str::<DnsimpleErrorBody>(body) {
            Ok(parsed) => {
                let mut message = parsed
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| format!("HTTP {status}"));
                let fields: Vec<String> = parsed
                    .errors
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(field, errors)| format!("{field}: {}", errors.join(", ")))
                    .collect();
                if !fields.is_empty() {
                    message = format!("{message} ({})", fields.join("; "));
                }
                message
            }
            Err(_) if body.trim().is_empty() => format!("HTTP {status}"),
            Err(_) => body.trim().to_string(),
        };

        RawApiError::new(failure, message).with_status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::error::DnsProviderError;
    use crate::traits::Operation;

    fn provider() -> Option<DnsimpleProvider> {
        DnsimpleProvider::new(ProviderConfig::new().with("api_token", "tok-secret-123")).ok()
    }

    #[test]
    fn validation_errors_are_listed() {
        let p = require_some!(provider());
        let raw = p.extract_error(
            400,
            r#"{"message":"Validation failed","errors":{"content":["can't be blank"],"ttl":["is too low"]}}"#,
        );
        assert_eq!(raw.failure, ApiFailure::Validation);
        assert_eq!(raw.status, Some(400));
        assert_eq!(
            raw.message,
            "Validation failed (content: can't be blank; ttl: is too low)"
        );
    }

    #[test]
    fn status_classification() {
        let p = require_some!(provider());
        assert_eq!(
            p.extract_error(401, r#"{"message":"Authentication failed"}"#).failure,
            ApiFailure::Unauthorized
        );
        assert_eq!(p.extract_error(402, "").failure, ApiFailure::QuotaExceeded);
        assert_eq!(p.extract_error(404, "").failure, ApiFailure::NotFound);
        assert_eq!(p.extract_error(429, "").failure, ApiFailure::RateLimited);
    }

    #[test]
    fn empty_or_non_json_body() {
        let p = require_some!(provider());
        assert_eq!(p.extract_error(404, "").message, "HTTP 404");
        assert_eq!(p.extract_error(502, "<html>Bad Gateway</html>").message, "<html>Bad Gateway</html>");
    }

    #[test]
    fn unauthorized_create_is_creation_failure() {
        let p = require_some!(provider());
        let raw = p.extract_error(401, r#"{"message":"Authentication failed"}"#);
        let err = p.map_error(
            raw,
            &Operation::Create {
                domain: "example.com",
                name: "www",
            },
        );
        assert!(
            matches!(
                &err,
                DnsProviderError::RecordCreationFailed { provider, detail, .. }
                    if provider == "dnsimple" && detail.contains("HTTP 401")
            ),
            "unexpected: {err:?}"
        );
    }

    #[test]
    fn not_found_read_is_connection_failure() {
        let p = require_some!(provider());
        let raw = p.extract_error(404, r#"{"message":"Record `42` not found"}"#);
        let err = p.map_error(raw, &Operation::Read);
        assert!(
            matches!(&err, DnsProviderError::ConnectionFailed { detail, .. } if detail.contains("not found (HTTP 404)")),
            "unexpected: {err:?}"
        );
    }

    #[test]
    fn token_across_truncation_limit_is_redacted() {
        let p = require_some!(provider());
        let body = format!("{}tok-secret-123{}", "x".repeat(215), "y".repeat(100));
        let raw = p.extract_error(502, &body);
        let err = p.map_error(raw, &Operation::Read);
        let message = err.to_string();
        assert!(!message.contains("tok-sec"), "{message}");
        assert!(message.contains("***"), "{message}");
        assert!(message.contains("[truncated"), "{message}");
    }

    #[test]
    fn token_echoed_by_vendor_is_redacted() {
        let p = require_some!(provider());
        let raw = p.extract_error(401, r#"{"message":"Token tok-secret-123 is invalid"}"#);
        let err = p.map_error(raw, &Operation::Probe);
        assert!(!err.to_string().contains("tok-secret-123"));
        assert!(err.to_string().contains("***"));
    }
}
