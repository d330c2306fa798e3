use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for every DNS provider operation.
///
/// The taxonomy is closed: every vendor or transport failure is reclassified
/// into one of these variants before it leaves an adapter. Each variant names
/// the provider that produced it plus structured context; free-form `detail`
/// text has already been scrubbed of sensitive configuration values.
///
/// # Caller policy
///
/// | Variant | Suggested action |
/// |---|---|
/// | [`InvalidConfiguration`](Self::InvalidConfiguration) | fix config, do not retry |
/// | [`ConnectionFailed`](Self::ConnectionFailed) | retry with backoff |
/// | [`RecordCreationFailed`](Self::RecordCreationFailed) | inspect detail, retry with a corrected payload |
/// | [`RecordUpdateFailed`](Self::RecordUpdateFailed) | inspect detail, retry with a corrected payload |
/// | [`RecordDeletionFailed`](Self::RecordDeletionFailed) | record may already be gone, re-check with `get_record` |
/// | [`UnknownProvider`](Self::UnknownProvider) | configuration error, do not retry |
///
/// Adapters never retry on their own.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum DnsProviderError {
    /// A required configuration option is missing, blank or malformed.
    #[error("[{provider}] Invalid configuration '{key}': {reason}")]
    InvalidConfiguration {
        /// Provider that produced the error.
        provider: String,
        /// Offending configuration key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Transport failure, timeout, or an unusable vendor response on a read
    /// or probe path (including prerequisite resolution).
    #[error("[{provider}] Connection failed: {detail}")]
    ConnectionFailed {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The vendor rejected a record creation.
    #[error("[{provider}] Failed to create record '{name}' in {domain}: {detail}")]
    RecordCreationFailed {
        /// Provider that produced the error.
        provider: String,
        /// Zone the record was meant for.
        domain: String,
        /// Relative record name.
        name: String,
        /// Vendor message.
        detail: String,
    },

    /// The vendor rejected a record update.
    #[error(
        "[{provider}] Failed to update record(s) {} in {domain}: {detail}",
        .record_ids.join(", ")
    )]
    RecordUpdateFailed {
        /// Provider that produced the error.
        provider: String,
        /// Zone the records belong to.
        domain: String,
        /// Records the update targeted.
        record_ids: Vec<String>,
        /// Vendor message.
        detail: String,
    },

    /// The vendor rejected a record deletion. The record may already be gone.
    #[error(
        "[{provider}] Failed to delete record(s) {} in {domain}: {detail}",
        .record_ids.join(", ")
    )]
    RecordDeletionFailed {
        /// Provider that produced the error.
        provider: String,
        /// Zone the records belong to.
        domain: String,
        /// Records the deletion targeted.
        record_ids: Vec<String>,
        /// Vendor message.
        detail: String,
    },

    /// No adapter is registered under the requested name.
    #[error("Unknown DNS provider: {name}")]
    UnknownProvider {
        /// The name that was looked up.
        name: String,
    },
}

/// Discriminant of [`DnsProviderError`], convenient for matching and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidConfiguration,
    ConnectionFailed,
    RecordCreationFailed,
    RecordUpdateFailed,
    RecordDeletionFailed,
    UnknownProvider,
}

impl DnsProviderError {
    /// Returns the failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            Self::ConnectionFailed { .. } => ErrorKind::ConnectionFailed,
            Self::RecordCreationFailed { .. } => ErrorKind::RecordCreationFailed,
            Self::RecordUpdateFailed { .. } => ErrorKind::RecordUpdateFailed,
            Self::RecordDeletionFailed { .. } => ErrorKind::RecordDeletionFailed,
            Self::UnknownProvider { .. } => ErrorKind::UnknownProvider,
        }
    }

    /// Name of the provider that produced the error, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::InvalidConfiguration { provider, .. }
            | Self::ConnectionFailed { provider, .. }
            | Self::RecordCreationFailed { provider, .. }
            | Self::RecordUpdateFailed { provider, .. }
            | Self::RecordDeletionFailed { provider, .. } => Some(provider),
            Self::UnknownProvider { .. } => None,
        }
    }

    /// Whether a caller may reasonably retry the same call later.
    ///
    /// Advisory only: the adapters themselves never retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }

    /// 是否为预期行为（配置错误、厂商拒绝等），用于日志分级。
    ///
    /// `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. }
                | Self::RecordCreationFailed { .. }
                | Self::RecordUpdateFailed { .. }
                | Self::RecordDeletionFailed { .. }
                | Self::UnknownProvider { .. }
        )
    }
}

/// Convenience type alias for `Result<T, DnsProviderError>`.
pub type Result<T> = std::result::Result<T, DnsProviderError>;
