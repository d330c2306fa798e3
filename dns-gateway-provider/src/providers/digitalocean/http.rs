//! DigitalOcean HTTP 请求方法

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{HttpUtils, is_success};
use crate::providers::common::{build_url, require_token};
use crate::traits::{Operation, ProviderErrorMapper};

use super::{DigitalOceanProvider, PROVIDER_NAME};

impl DigitalOceanProvider {
    /// Sends one request and returns the body of a 2xx response.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        op: &Operation<'_>,
    ) -> Result<String> {
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
        Ok(text)
    }

    /// 执行请求并解析 JSON 响应
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        op: &Operation<'_>,
    ) -> Result<T> {
        let text = self.send(method, path, query, body, op).await?;
        HttpUtils::parse_json(&text, self).map_err(|e| self.parse_error(e, op))
    }

    pub(crate) fn to_body<B: Serialize>(
        &self,
        body: &B,
        op: &Operation<'_>,
    ) -> Result<serde_json::Value> {
        serde_json::to_value(body).map_err(|e| self.parse_error(e, op))
    }
}
