//! DNSimple API 类型定义

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::providers::common::deserialize_id;

/// `{"data": ...}` envelope around every successful response.
#[derive(Debug, Deserialize)]
pub struct DnsimpleResponse<T> {
    pub data: T,
    #[serde(default)]
    pub pagination: Option<DnsimplePagination>,
}

#[derive(Debug, Deserialize)]
pub struct DnsimplePagination {
    pub total_pages: u32,
}

/// `GET /whoami`
#[derive(Debug, Deserialize)]
pub struct DnsimpleWhoami {
    #[serde(default)]
    pub account: Option<DnsimpleAccount>,
}

#[derive(Debug, Deserialize)]
pub struct DnsimpleAccount {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

/// DNSimple zone record (response).
#[derive(Debug, Deserialize)]
pub struct DnsimpleRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of create (`POST`) and update (`PATCH`) calls. Unset fields are omitted.
#[derive(Debug, Default, Serialize)]
pub struct DnsimpleRecordPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

/// Error body: `{"message": "...", "errors": {"field": ["..."]}}`.
#[derive(Debug, Deserialize)]
pub struct DnsimpleErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}
