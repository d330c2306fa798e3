//! Cloudflare error mapping

use crate::traits::{ApiFailure, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::Redactor;

use super::types::CloudflareErrorEnvelope;
use super::{CloudflareProvider, PROVIDER_NAME};

/// Cloudflare error code classification.
/// Reference: <https://api.cloudflare.com/#getting-started-responses>
fn classify(code: i64, status: u16) -> ApiFailure {
    match code {
        // 6003: Invalid request headers
        // 6103: Invalid format for X-Auth-Key header
        // 6111: Invalid format for Authorization header
        // 9109: Unauthorized to access requested resource
        // 10000: Authentication error
        6003 | 6103 | 6111 | 9109 | 10000 => ApiFailure::Unauthorized,

        // 1004: DNS Validation Error
        // 9000: Invalid or missing name
        // 9005/9006: Invalid A/AAAA content
        // 9009: Content for MX record must be a hostname
        // 9021: Invalid TTL
        1004 | 9000 | 9005 | 9006 | 9009 | 9021 => ApiFailure::Validation,

        // 81053-81058: record already exists / conflicts with an existing record
        81053..=81058 => ApiFailure::Conflict,

        // 81044: Record does not exist
        // 7000: No route for that URI
        // 7003: Could not route, object identifier invalid
        81044 | 7000 | 7003 => ApiFailure::NotFound,

        // 81045: The record quota has been exceeded
        81045 => ApiFailure::QuotaExceeded,

        // 971: Please wait and consider throttling your request speed
        971 => ApiFailure::RateLimited,

        _ => ApiFailure::from_status(status),
    }
}

impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    /// Reads `errors[]` from the envelope; also used for `200 {"success": false}`.
    fn extract_error(&self, status: u16, body: &str) -> RawApiError {
        let errors = serde_json::from_str::<CloudflareErrorEnvelope>(body)
            .map(|e| e.errors)
            .unwrap_or_default();

        let raw = match errors.first() {
            Some(first) => {
                let message = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                RawApiError::new(classify(first.code, status), message)
                    .with_code(first.code.to_string())
            }
            None if body.trim().is_empty() => {
                RawApiError::new(ApiFailure::from_status(status), format!("HTTP {status}"))
            }
            None => RawApiError::new(ApiFailure::from_status(status), body.trim()),
        };
        raw.with_status(status)
    }
}
