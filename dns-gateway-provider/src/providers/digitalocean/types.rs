//! DigitalOcean API 类型定义

use serde::{Deserialize, Serialize};

use crate::providers::common::deserialize_id;

/// `{"domain_record": {...}}`
#[derive(Debug, Deserialize)]
pub struct DomainRecordResponse {
    pub domain_record: DomainRecord,
}

/// `{"domain_records": [...], "links": {...}, "meta": {...}}`
#[derive(Debug, Deserialize)]
pub struct DomainRecordsResponse {
    #[serde(default)]
    pub domain_records: Vec<DomainRecord>,
    #[serde(default)]
    pub links: Option<Links>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub pages: Option<Pages>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Pages {
    #[serde(default)]
    pub next: Option<String>,
}

impl DomainRecordsResponse {
    pub fn has_next_page(&self) -> bool {
        self.links
            .as_ref()
            .and_then(|l| l.pages.as_ref())
            .and_then(|p| p.next.as_deref())
            .is_some_and(|next| !next.is_empty())
    }
}

/// `GET /account`
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub account: Account,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub status: String,
}

/// DigitalOcean domain record（响应）
#[derive(Debug, Deserialize)]
pub struct DomainRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub data: String,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub port: Option<u16>,
    pub ttl: u32,
    #[serde(default)]
    pub weight: Option<u16>,
    #[serde(default)]
    pub flags: Option<u8>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Body of create (`POST`) and update (`PATCH`) calls. Unset fields are omitted.
#[derive(Debug, Default, Serialize)]
pub struct DomainRecordPayload {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Error body: `{"id": "not_found", "message": "..."}`.
#[derive(Debug, Deserialize)]
pub struct DigitalOceanErrorBody {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
