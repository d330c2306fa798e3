//! Generic HTTP client tools
//!
//! Shared request execution for every adapter: send, log, read the body.
//! Each adapter builds its own `RequestBuilder` (auth headers, body) and
//! interprets status codes and envelopes itself.
//!
//! Requests are sent exactly once. A timed-out or interrupted mutation is
//! never re-sent here; retrying is the caller's decision.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::DnsProviderError;
use crate::traits::ProviderErrorMapper;

/// HTTP tool function set
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and response text.
    ///
    /// Transport failures (DNS, TLS, connect, timeout, body read) become
    /// `ConnectionFailed` through `mapper`; any HTTP status is returned as-is.
    pub async fn execute_request<M>(
        request_builder: RequestBuilder,
        mapper: &M,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), DnsProviderError>
    where
        M: ProviderErrorMapper + Sync,
    {
        let provider_name = mapper.provider_name();
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                mapper.transport_error(format!("request timed out: {method_name} {url}"))
            } else {
                mapper.transport_error(format!("request failed: {e}"))
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                mapper.transport_error(format!("timed out reading response: {method_name} {url}"))
            } else {
                mapper.transport_error(format!("failed to read response body: {e}"))
            }
        })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            body_for_log(mapper, &response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parses a JSON response body.
    ///
    /// The error is the redacted serde message; callers turn it into the
    /// operation-specific error with `ProviderErrorMapper::parse_error`.
    pub fn parse_json<T, M>(response_text: &str, mapper: &M) -> Result<T, String>
    where
        T: DeserializeOwned,
        M: ProviderErrorMapper,
    {
        let provider_name = mapper.provider_name();
        serde_json::from_str(response_text).map_err(|e| {
            let message = mapper.redactor().redact(&e.to_string());
            log::error!("[{provider_name}] JSON parse failed: {message}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                body_for_log(mapper, response_text)
            );
            message
        })
    }
}

/// Vendor body as it may appear in logs: secrets masked, then truncated.
fn body_for_log<M: ProviderErrorMapper>(mapper: &M, body: &str) -> String {
    mapper.redactor().redact(body)
}

/// Whether `status` is a 2xx.
pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ApiFailure, RawApiError};
    use crate::utils::log_sanitizer::Redactor;

    const TOKEN: &str = "tok-secret-0123456789";

    struct TestMapper(Redactor);

    impl ProviderErrorMapper for TestMapper {
        fn provider_name(&self) -> &'static str {
            "test"
        }

        fn redactor(&self) -> &Redactor {
            &self.0
        }

        fn extract_error(&self, status: u16, body: &str) -> RawApiError {
            RawApiError::new(ApiFailure::from_status(status), body)
        }
    }

    fn mapper() -> TestMapper {
        TestMapper(Redactor::new([TOKEN]))
    }

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Foo {
        x: i32,
    }

    #[test]
    fn parse_json_valid() {
        let result: Result<Foo, String> = HttpUtils::parse_json(r#"{"x":42}"#, &mapper());
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        let result: Result<Foo, String> = HttpUtils::parse_json("not json", &mapper());
        assert!(result.is_err(), "unexpected parse result: {result:?}");
    }

    #[test]
    fn parse_error_message_is_redacted() {
        // serde quotes the offending string value in its message
        let body = format!("\"{TOKEN}\"");
        let result: Result<Foo, String> = HttpUtils::parse_json(&body, &mapper());
        assert!(
            matches!(&result, Err(message) if !message.contains(TOKEN) && message.contains("***")),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn logged_body_is_redacted_before_truncation() {
        let body = format!("{}{TOKEN}{}", "x".repeat(245), "y".repeat(100));
        let logged = body_for_log(&mapper(), &body);
        assert!(!logged.contains("tok-secret"), "{logged}");
        assert!(logged.contains("***"));
        assert!(logged.contains("[truncated"));
    }

    #[test]
    fn success_range() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(!is_success(301));
        assert!(!is_success(404));
    }
}
