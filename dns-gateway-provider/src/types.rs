use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigurationSchema;

// ============ DNS Record Types ============

/// DNS record type identifier.
///
/// Parsed case-insensitively, serialized and transmitted upper-case
/// (`"A"`, `"AAAA"`, `"CNAME"`, ...). Each adapter supports a subset,
/// see [`DnsProvider::supported_record_types`](crate::DnsProvider::supported_record_types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Service locator record.
    Srv,
    /// Name server record.
    Ns,
    /// Certificate Authority Authorization record.
    Caa,
    /// Reverse pointer record.
    Ptr,
}

impl DnsRecordType {
    /// Every type known to the record model.
    pub const ALL: [Self; 9] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Srv,
        Self::Ns,
        Self::Caa,
        Self::Ptr,
    ];

    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::Ns => "NS",
            Self::Caa => "CAA",
            Self::Ptr => "PTR",
        }
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a record type of the model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported record type: {0}")]
pub struct UnknownRecordType(pub String);

impl FromStr for DnsRecordType {
    type Err = UnknownRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| UnknownRecordType(s.to_string()))
    }
}

impl TryFrom<String> for DnsRecordType {
    type Error = UnknownRecordType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DnsRecordType> for String {
    fn from(value: DnsRecordType) -> Self {
        value.as_str().to_string()
    }
}

// ============ Record Content ============

/// Sub-field payload for record types that carry more than one value.
///
/// Adapters serialize each variant explicitly into their vendor's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructuredContent {
    /// SRV: service locator.
    Srv {
        /// Priority (lower = preferred).
        priority: u16,
        /// Weight for load balancing among same-priority targets.
        weight: u16,
        /// TCP/UDP port number.
        port: u16,
        /// Target hostname providing the service.
        target: String,
    },

    /// MX: mail exchange server.
    Mx {
        /// Priority (lower = preferred).
        priority: u16,
        /// Mail server hostname.
        exchange: String,
    },

    /// CAA: Certificate Authority Authorization.
    Caa {
        /// Issuer critical flag (0 or 128).
        flags: u8,
        /// Property tag (`"issue"`, `"issuewild"` or `"iodef"`).
        tag: String,
        /// CA domain or reporting URI.
        value: String,
    },
}

impl StructuredContent {
    /// The record type this payload belongs to.
    pub fn record_type(&self) -> DnsRecordType {
        match self {
            Self::Srv { .. } => DnsRecordType::Srv,
            Self::Mx { .. } => DnsRecordType::Mx,
            Self::Caa { .. } => DnsRecordType::Caa,
        }
    }
}

/// Record content: either a pre-serialized vendor value or a structured payload.
///
/// Serialized as a plain JSON string for [`Scalar`](Self::Scalar) and as an
/// object carrying the variant's fields for [`Structured`](Self::Structured).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordContent {
    /// Passed through to the vendor verbatim.
    Scalar(String),
    /// Serialized per record type by the adapter.
    Structured(StructuredContent),
}

impl RecordContent {
    /// Checks that this content can be used for a record of `record_type`.
    ///
    /// Scalars fit any type; structured payloads only fit their own.
    pub fn check_type(&self, record_type: DnsRecordType) -> Result<(), String> {
        match self {
            Self::Scalar(_) => Ok(()),
            Self::Structured(s) if s.record_type() == record_type => Ok(()),
            Self::Structured(s) => Err(format!(
                "structured {} content cannot be used for a {record_type} record",
                s.record_type()
            )),
        }
    }
}

impl From<&str> for RecordContent {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for RecordContent {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<StructuredContent> for RecordContent {
    fn from(value: StructuredContent) -> Self {
        Self::Structured(value)
    }
}

/// A DNS record as returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Vendor-assigned opaque identifier.
    pub id: String,
    /// Fully-qualified zone name.
    pub domain: String,
    /// Relative record name, empty for the zone apex.
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record content.
    pub content: RecordContent,
    /// Time to live in seconds.
    pub ttl: u32,

    /// When the record was created, if the vendor reports it.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When the record was last updated, if the vendor reports it.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

// ============ Requests ============

/// Request to create a new DNS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// Fully-qualified zone name.
    pub domain: String,
    /// Relative record name (empty or `"@"` for the apex).
    pub name: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record content.
    pub content: RecordContent,
    /// Time to live in seconds; the vendor default applies when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl CreateRecordRequest {
    pub fn new(
        domain: impl Into<String>,
        name: impl Into<String>,
        record_type: DnsRecordType,
        content: impl Into<RecordContent>,
    ) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
            record_type,
            content: content.into(),
            ttl: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Partial update of an existing record. Only supplied fields are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    /// Fully-qualified zone name.
    pub domain: String,
    /// Vendor record id.
    pub record_id: String,
    /// New content, if it changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<RecordContent>,
    /// New TTL, if it changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl UpdateRecordRequest {
    pub fn new(domain: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            record_id: record_id.into(),
            content: None,
            ttl: None,
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<RecordContent>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Optional filters for record listing. All non-null filters apply together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    /// Exact relative record name (empty string selects the apex).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Exact record type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<DnsRecordType>,
}

impl RecordFilter {
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            record_type: None,
        }
    }

    #[must_use]
    pub fn by_type(record_type: DnsRecordType) -> Self {
        Self {
            name: None,
            record_type: Some(record_type),
        }
    }

    #[must_use]
    pub fn with_type(mut self, record_type: DnsRecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    /// Whether `record` passes every filter that is set.
    pub fn matches(&self, record: &DnsRecord) -> bool {
        self.name
            .as_deref()
            .is_none_or(|n| crate::providers::common::normalize_record_name(n) == record.name)
            && self.record_type.is_none_or(|t| t == record.record_type)
    }
}

// ============ Batch Operation Types ============

/// Result of a batch create operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResult {
    /// Number of records successfully created.
    pub success_count: usize,
    /// Number of records that failed to create.
    pub failed_count: usize,
    /// Ids of the created records, in request order.
    pub created_ids: Vec<String>,
    /// Details about each failed creation.
    pub failures: Vec<BatchCreateFailure>,
}

/// Information about a single failed record creation in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateFailure {
    /// Index of the failed request in the original request slice.
    pub request_index: usize,
    /// Name of the record that failed.
    pub record_name: String,
    /// The normalized error.
    pub error: crate::error::DnsProviderError,
}

/// Result of a batch delete operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteResult {
    /// Number of records successfully deleted.
    pub success_count: usize,
    /// Number of records that failed to delete.
    pub failed_count: usize,
    /// Details about each failed deletion.
    pub failures: Vec<BatchDeleteFailure>,
}

/// Information about a single failed record deletion in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteFailure {
    /// ID of the record that failed to delete.
    pub record_id: String,
    /// The normalized error.
    pub error: crate::error::DnsProviderError,
}

// ============ Provider Metadata Types ============

/// Static metadata describing a DNS provider.
///
/// Obtain via [`ProviderRegistry::metadata`](crate::ProviderRegistry::metadata) or
/// [`get_all_provider_metadata()`](crate::get_all_provider_metadata).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Registry name (e.g. `"dnsimple"`).
    pub id: &'static str,
    /// Human-readable provider name.
    pub name: &'static str,
    /// Short description of the provider.
    pub description: &'static str,
    /// Configuration options accepted by the adapter.
    pub schema: ConfigurationSchema,
    /// Record types the adapter can manage.
    pub supported_record_types: &'static [DnsRecordType],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parses_case_insensitively() {
        assert_eq!("a".parse::<DnsRecordType>(), Ok(DnsRecordType::A));
        assert_eq!("aaaa".parse::<DnsRecordType>(), Ok(DnsRecordType::Aaaa));
        assert_eq!(" Cname ".parse::<DnsRecordType>(), Ok(DnsRecordType::Cname));
        assert_eq!(
            "soa".parse::<DnsRecordType>(),
            Err(UnknownRecordType("soa".to_string()))
        );
    }

    #[test]
    fn record_type_serializes_upper_case() {
        let json = serde_json::to_string(&DnsRecordType::Aaaa).unwrap_or_default();
        assert_eq!(json, "\"AAAA\"");

        let back: Result<DnsRecordType, _> = serde_json::from_str("\"mx\"");
        assert!(matches!(back, Ok(DnsRecordType::Mx)), "unexpected: {back:?}");

        let bad: Result<DnsRecordType, _> = serde_json::from_str("\"ALIAS\"");
        assert!(bad.is_err());
    }

    #[test]
    fn scalar_content_from_json_string() {
        let content: Result<RecordContent, _> = serde_json::from_str("\"1.2.3.4\"");
        assert!(
            matches!(&content, Ok(RecordContent::Scalar(s)) if s == "1.2.3.4"),
            "unexpected: {content:?}"
        );
    }

    #[test]
    fn structured_content_from_json_object() {
        let mx: Result<RecordContent, _> =
            serde_json::from_str(r#"{"priority":10,"exchange":"mail.example.com"}"#);
        assert!(
            matches!(
                &mx,
                Ok(RecordContent::Structured(StructuredContent::Mx { priority: 10, exchange }))
                    if exchange == "mail.example.com"
            ),
            "unexpected: {mx:?}"
        );

        let srv: Result<RecordContent, _> = serde_json::from_str(
            r#"{"priority":0,"weight":5,"port":5060,"target":"sip.example.com"}"#,
        );
        assert!(
            matches!(
                &srv,
                Ok(RecordContent::Structured(StructuredContent::Srv { port: 5060, .. }))
            ),
            "unexpected: {srv:?}"
        );

        let caa: Result<RecordContent, _> =
            serde_json::from_str(r#"{"flags":0,"tag":"issue","value":"letsencrypt.org"}"#);
        assert!(
            matches!(&caa, Ok(RecordContent::Structured(StructuredContent::Caa { .. }))),
            "unexpected: {caa:?}"
        );
    }

    #[test]
    fn unknown_object_shape_is_rejected() {
        let content: Result<RecordContent, _> = serde_json::from_str(r#"{"content":"x"}"#);
        assert!(content.is_err());
    }

    #[test]
    fn check_type_rejects_mismatched_structured_content() {
        let mx = RecordContent::Structured(StructuredContent::Mx {
            priority: 10,
            exchange: "mail.example.com".into(),
        });
        assert!(mx.check_type(DnsRecordType::Mx).is_ok());
        let err = mx.check_type(DnsRecordType::A);
        assert_eq!(
            err,
            Err("structured MX content cannot be used for a A record".to_string())
        );
        assert!(RecordContent::from("anything").check_type(DnsRecordType::Srv).is_ok());
    }

    fn record(name: &str, record_type: DnsRecordType) -> DnsRecord {
        DnsRecord {
            id: "1".into(),
            domain: "example.com".into(),
            name: name.into(),
            record_type,
            content: "x".into(),
            ttl: 300,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn filter_matches_name_type_and_intersection() {
        let www_a = record("www", DnsRecordType::A);
        let www_txt = record("www", DnsRecordType::Txt);
        let api_a = record("api", DnsRecordType::A);

        let by_name = RecordFilter::by_name("www");
        assert!(by_name.matches(&www_a) && by_name.matches(&www_txt) && !by_name.matches(&api_a));

        let by_type = RecordFilter::by_type(DnsRecordType::A);
        assert!(by_type.matches(&www_a) && !by_type.matches(&www_txt) && by_type.matches(&api_a));

        let both = RecordFilter::by_name("www").with_type(DnsRecordType::A);
        assert!(both.matches(&www_a) && !both.matches(&www_txt) && !both.matches(&api_a));

        assert!(RecordFilter::default().matches(&api_a));
    }

    #[test]
    fn filter_apex_alias() {
        let apex = record("", DnsRecordType::Ns);
        assert!(RecordFilter::by_name("@").matches(&apex));
        assert!(RecordFilter::by_name("").matches(&apex));
        assert!(!RecordFilter::by_name("www").matches(&apex));
    }

    #[test]
    fn dns_record_serializes_type_key() {
        let json = serde_json::to_value(record("www", DnsRecordType::A)).unwrap_or_default();
        assert_eq!(json["type"], "A");
        assert_eq!(json["content"], "x");
        assert!(json.get("createdAt").is_none());
    }
}
