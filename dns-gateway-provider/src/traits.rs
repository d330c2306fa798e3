use async_trait::async_trait;

use crate::config::{ConfigurationSchema, ProviderConfig};
use crate::error::{DnsProviderError, Result};
use crate::types::{
    BatchCreateFailure, BatchCreateResult, BatchDeleteFailure, BatchDeleteResult,
    CreateRecordRequest, DnsRecord, DnsRecordType, ProviderMetadata, RecordFilter,
    UpdateRecordRequest,
};
use crate::utils::log_sanitizer::Redactor;

/// Coarse classification of a vendor rejection (内部使用).
///
/// Each adapter maps its own status codes / error codes onto these; the
/// label only enriches the error detail; the error kind itself is chosen by
/// the [`Operation`] that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiFailure {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    RateLimited,
    QuotaExceeded,
    Server,
    Other,
}

impl ApiFailure {
    /// Classification from the HTTP status alone.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            400 | 422 => Self::Validation,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unauthorized => "authentication failed",
            Self::Forbidden => "permission denied",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::Validation => "validation failed",
            Self::RateLimited => "rate limited",
            Self::QuotaExceeded => "quota exceeded",
            Self::Server => "vendor server error",
            Self::Other => "vendor error",
        }
    }
}

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Vendor classification.
    pub failure: ApiFailure,
    /// HTTP status, when the failure came with one.
    pub status: Option<u16>,
    /// Vendor error code (format differs per provider).
    pub code: Option<String>,
    /// Vendor error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(failure: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            failure,
            status: None,
            code: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Human-readable one-liner, e.g. `not found (HTTP 404, code not_found): Record not found`.
    pub fn describe(&self) -> String {
        let mut tags = Vec::new();
        if let Some(status) = self.status {
            tags.push(format!("HTTP {status}"));
        }
        if let Some(code) = self.code.as_deref().filter(|c| !c.is_empty()) {
            tags.push(format!("code {code}"));
        }
        if tags.is_empty() {
            format!("{}: {}", self.failure.label(), self.message)
        } else {
            format!("{} ({}): {}", self.failure.label(), tags.join(", "), self.message)
        }
    }
}

/// The contract operation a vendor call belongs to (内部使用).
///
/// Decides which taxonomy kind a vendor rejection turns into.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Operation<'a> {
    /// Connection test or prerequisite lookup.
    Probe,
    /// `get_record` / `list_records`.
    Read,
    Create { domain: &'a str, name: &'a str },
    Update { domain: &'a str, record_id: &'a str },
    Delete { domain: &'a str, record_id: &'a str },
}

impl Operation<'_> {
    /// Builds the operation-specific error for a vendor-side failure.
    pub fn failure(&self, provider: &str, detail: String) -> DnsProviderError {
        let provider = provider.to_string();
        match *self {
            Self::Probe | Self::Read => DnsProviderError::ConnectionFailed { provider, detail },
            Self::Create { domain, name } => DnsProviderError::RecordCreationFailed {
                provider,
                domain: domain.to_string(),
                name: name.to_string(),
                detail,
            },
            Self::Update { domain, record_id } => DnsProviderError::RecordUpdateFailed {
                provider,
                domain: domain.to_string(),
                record_ids: vec![record_id.to_string()],
                detail,
            },
            Self::Delete { domain, record_id } => DnsProviderError::RecordDeletionFailed {
                provider,
                domain: domain.to_string(),
                record_ids: vec![record_id.to_string()],
                detail,
            },
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
///
/// Every failure an adapter produces goes through one of these methods, so
/// no transport or vendor error type crosses the contract boundary and no
/// detail string leaves without redaction.
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// Masks this adapter's secrets.
    fn redactor(&self) -> &Redactor;

    /// Extracts code and message from a non-success vendor response.
    fn extract_error(&self, status: u16, body: &str) -> RawApiError;

    /// Maps a vendor rejection onto the taxonomy kind of `op`.
    fn map_error(&self, raw: RawApiError, op: &Operation<'_>) -> DnsProviderError {
        let detail = self.redactor().redact(&raw.describe());
        let err = op.failure(self.provider_name(), detail);
        if err.is_expected() {
            log::warn!("{err}");
        } else {
            log::error!("{err}");
        }
        err
    }

    /// Transport-level failure: always `ConnectionFailed`, whatever the operation.
    fn transport_error(&self, detail: impl ToString) -> DnsProviderError {
        let err = DnsProviderError::ConnectionFailed {
            provider: self.provider_name().to_string(),
            detail: self.redactor().redact(&detail.to_string()),
        };
        log::error!("{err}");
        err
    }

    /// The vendor answered but the body was not what the API documents.
    fn parse_error(&self, detail: impl ToString, op: &Operation<'_>) -> DnsProviderError {
        let detail = format!("unexpected vendor response: {}", detail.to_string());
        let err = op.failure(self.provider_name(), self.redactor().redact(&detail));
        log::error!("{err}");
        err
    }
}

/// The DNS provider contract every vendor adapter satisfies.
///
/// Instances are `Send + Sync` and meant to be shared as `Arc<dyn DnsProvider>`.
/// Each call completes (successfully or with a normalized error) before it
/// returns; adapters never retry and never spawn background work.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Registry name of the adapter (e.g. `"dnsimple"`).
    fn id(&self) -> &'static str;

    /// 获取 Provider 元数据（类型级别）
    ///
    /// Does not need an instance, so it can be called before construction.
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Options this adapter accepts. Pure, no network access.
    fn configuration_schema(&self) -> ConfigurationSchema;

    /// Local validation of `config` against [`configuration_schema`](Self::configuration_schema).
    ///
    /// A missing required key is an error, never a `false`.
    fn validate_configuration(&self, config: &ProviderConfig) -> Result<()> {
        self.configuration_schema().validate(self.id(), config)
    }

    /// Record types this adapter can manage. Pure.
    fn supported_record_types(&self) -> &'static [DnsRecordType];

    /// Performs the minimal vendor call proving the configuration works.
    ///
    /// Fails with `InvalidConfiguration` before any network call when a
    /// required credential is missing, `ConnectionFailed` when the call errors.
    async fn test_connection(&self) -> Result<bool>;

    /// Creates a record and returns its vendor-assigned id.
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<String>;

    /// Partially updates a record: only the fields set in `req` are sent.
    async fn update_record(&self, req: &UpdateRecordRequest) -> Result<bool>;

    /// Deletes a record. Deleting an already-deleted record is an error.
    async fn delete_record(&self, domain: &str, record_id: &str) -> Result<()>;

    /// Fetches one record. Not-found and unreachable are both `ConnectionFailed`.
    async fn get_record(&self, domain: &str, record_id: &str) -> Result<DnsRecord>;

    /// Lists every record of `domain` matching `filter`, across all vendor pages.
    async fn list_records(&self, domain: &str, filter: &RecordFilter) -> Result<Vec<DnsRecord>>;

    /// 批量创建 DNS 记录
    ///
    /// 默认实现并发调用 `create_record()`，收集成功/失败结果。
    async fn batch_create_records(
        &self,
        requests: &[CreateRecordRequest],
    ) -> Result<BatchCreateResult> {
        let futures: Vec<_> = requests.iter().map(|req| self.create_record(req)).collect();
        let results = futures::future::join_all(futures).await;

        let mut created_ids = Vec::new();
        let mut failures = Vec::new();

        for (i, result) in results.into_iter().enumerate() {
            match result {
                Ok(id) => created_ids.push(id),
                Err(error) => failures.push(BatchCreateFailure {
                    request_index: i,
                    record_name: requests[i].name.clone(),
                    error,
                }),
            }
        }

        Ok(BatchCreateResult {
            success_count: created_ids.len(),
            failed_count: failures.len(),
            created_ids,
            failures,
        })
    }

    /// 批量删除 DNS 记录
    ///
    /// 默认实现并发调用 `delete_record()`，收集成功/失败结果。
    async fn batch_delete_records(
        &self,
        domain: &str,
        record_ids: &[String],
    ) -> Result<BatchDeleteResult> {
        let futures: Vec<_> = record_ids
            .iter()
            .map(|id| self.delete_record(domain, id))
            .collect();
        let results = futures::future::join_all(futures).await;

        let mut success_count = 0;
        let mut failures = Vec::new();

        for (i, result) in results.into_iter().enumerate() {
            match result {
                Ok(()) => success_count += 1,
                Err(error) => failures.push(BatchDeleteFailure {
                    record_id: record_ids[i].clone(),
                    error,
                }),
            }
        }

        Ok(BatchDeleteResult {
            success_count,
            failed_count: failures.len(),
            failures,
        })
    }
}
