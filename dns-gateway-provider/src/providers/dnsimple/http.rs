//! DNSimple HTTP 请求方法

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::{HttpUtils, is_success};
use crate::providers::common::{build_url, require_token};
use crate::traits::{Operation, ProviderErrorMapper};

use super::types::{DnsimpleResponse, DnsimpleWhoami};
use super::{DnsimpleProvider, PROVIDER_NAME};

impl DnsimpleProvider {
    /// Sends one request and maps any non-2xx status through the error mapper.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        op: &Operation<'_>,
    ) -> Result<String> {
        let token = require_token(PROVIDER_NAME, self.api_token.as_deref())?;
        let url = build_url(&self.base_url, path, query);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(token)
            .header("Accept", "application/json");
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

    fn parse<T: DeserializeOwned>(&self, text: &str, op: &Operation<'_>) -> Result<T> {
        HttpUtils::parse_json(text, self).map_err(|e| self.parse_error(e, op))
    }

    fn to_body<B: Serialize>(&self, body: &B, op: &Operation<'_>) -> Result<serde_json::Value> {
        serde_json::to_value(body).map_err(|e| self.parse_error(e, op))
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        op: &Operation<'_>,
    ) -> Result<DnsimpleResponse<T>> {
        let text = self.send(Method::GET, path, query, None, op).await?;
        self.parse(&text, op)
    }

    /// 执行 POST 请求
    pub(crate) async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        op: &Operation<'_>,
    ) -> Result<DnsimpleResponse<T>> {
        let body = self.to_body(body, op)?;
        let text = self.send(Method::POST, path, &[], Some(body), op).await?;
        self.parse(&text, op)
    }

    /// 执行 PATCH 请求，响应体只校验不使用
    pub(crate) async fn patch<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        op: &Operation<'_>,
    ) -> Result<()> {
        let body = self.to_body(body, op)?;
        self.send(Method::PATCH, path, &[], Some(body), op)
            .await
            .map(|_| ())
    }

    /// 执行 DELETE 请求（成功时返回 204）
    pub(crate) async fn delete(&self, path: &str, op: &Operation<'_>) -> Result<()> {
        self.send(Method::DELETE, path, &[], None, op)
            .await
            .map(|_| ())
    }

    /// `GET /whoami`
    pub(crate) async fn whoami(&self) -> Result<DnsimpleWhoami> {
        self.get("/whoami", &[], &Operation::Probe)
            .await
            .map(|resp| resp.data)
    }

    /// Account id from `whoami`; a user-scoped token without account is a failure.
    pub(crate) async fn fetch_account_id(&self) -> Result<String> {
        log::debug!("[{PROVIDER_NAME}] Resolving account id via /whoami");
        let whoami = self.whoami().await?;
        whoami.account.map(|a| a.id).ok_or_else(|| {
            self.parse_error(
                "whoami response contains no account; set the account_id option",
                &Operation::Probe,
            )
        })
    }

    /// Account id for zone calls: configured, cached, or resolved once.
    pub(crate) async fn resolve_account_id(&self) -> Result<String> {
        self.account_id
            .get_or_resolve(|| self.fetch_account_id())
            .await
            .map(str::to_string)
    }
}
