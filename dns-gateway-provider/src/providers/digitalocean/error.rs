//! DigitalOcean error mapping

use crate::traits::{ApiFailure, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::Redactor;

use super::types::DigitalOceanErrorBody;
use super::{DigitalOceanProvider, PROVIDER_NAME};

/// Reference: <https://docs.digitalocean.com/reference/api/digitalocean/#section/Introduction/Responses>
fn classify(id: &str, status: u16) -> ApiFailure {
    match id {
        "unauthorized" => ApiFailure::Unauthorized,
        "forbidden" => ApiFailure::Forbidden,
        "not_found" => ApiFailure::NotFound,
        "unprocessable_entity" | "bad_request" => ApiFailure::Validation,
        "too_many_requests" => ApiFailure::RateLimited,
        "conflict" => ApiFailure::Conflict,
        _ => ApiFailure::from_status(status),
    }
}

impl ProviderErrorMapper for DigitalOceanProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    fn extract_error(&self, status: u16, body: &str) -> RawApiError {
        match serde_json::from_str::<DigitalOceanErrorBody>(body) {
            Ok(DigitalOceanErrorBody { id, message }) => {
                let failure = id
                    .as_deref()
                    .map_or_else(|| ApiFailure::from_status(status), |id| classify(id, status));
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| format!("HTTP {status}"));
                let raw = RawApiError::new(failure, message).with_status(status);
                match id {
                    Some(id) => raw.with_code(id),
                    None => raw,
                }
            }
            Err(_) => {
                let message = if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.trim().to_string()
                };
                RawApiError::new(ApiFailure::from_status(status), message).with_status(status)
            }
        }
    }
}
