//! Cloudflare HTTP 请求方法

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{HttpUtils, is_success};
use crate::providers::common::{build_url, require_token};
use crate::traits::{ApiFailure, Operation, ProviderErrorMapper, RawApiError};

use super::types::{CloudflareResponse, CloudflareZone};
use super::{CloudflareProvider, PROVIDER_NAME};

impl CloudflareProvider {
    /// Sends one request and returns the envelope of a successful response.
    ///
    /// Non-2xx statuses and `"success": false` envelopes both go through the
    /// error mapper.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        op: &Operation<'_>,
    ) -> Result<CloudflareResponse<T>> {
        let token = require_token(PROVIDER_NAME, self.api_token.as_deref())?;
        let url = build_url(&self.base_url, path, query);

        let mut request = self.client.request(method.clone(), &url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let (status, text) =
            HttpUtils::execute_request(request, self, method.as_str(), &url).await?;
        if !is_success(status) {
            return Err(self.map_error(self.extract_error(status, &text), op));
        }

        let envelope: CloudflareResponse<T> =
            HttpUtils::parse_json(&text, self).map_err(|e| self.parse_error(e, op))?;
        if !envelope.success {
            return Err(self.map_error(self.extract_error(status, &text), op));
        }
        Ok(envelope)
    }

    /// Like [`request`](Self::request) but requires a `result`.
    pub(crate) async fn request_result<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        op: &Operation<'_>,
    ) -> Result<T> {
        self.request(method, path, query, body, op)
            .await?
            .result
            .ok_or_else(|| self.parse_error("response has no result", op))
    }

    pub(crate) fn to_body<B: Serialize>(
        &self,
        body: &B,
        op: &Operation<'_>,
    ) -> Result<serde_json::Value> {
        serde_json::to_value(body).map_err(|e| self.parse_error(e, op))
    }

    /// `GET /zones?name=<domain>`; an unknown zone is a lookup failure.
    async fn lookup_zone_id(&self, domain: &str) -> Result<String> {
        log::debug!("[{PROVIDER_NAME}] Resolving zone id of {domain}");
        let zones: Vec<CloudflareZone> = self
            .request_result(
                Method::GET,
                "/zones",
                &[("name", domain.to_string())],
                None,
                &Operation::Probe,
            )
            .await?;

        zones
            .into_iter()
            .find(|z| z.name.eq_ignore_ascii_case(domain))
            .map(|z| z.id)
            .ok_or_else(|| {
                self.map_error(
                    RawApiError::new(
                        ApiFailure::NotFound,
                        format!("zone {domain} is not accessible with this token"),
                    ),
                    &Operation::Probe,
                )
            })
    }

    /// Zone id of `domain`, resolved once per instance.
    pub(crate) async fn zone_id(&self, domain: &str) -> Result<String> {
        self.zone_ids
            .get_or_resolve(domain, || self.lookup_zone_id(domain))
            .await
    }
}
