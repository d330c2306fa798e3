//! Cloudflare API 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
    #[serde(default)]
    pub result_info: Option<CloudflareResultInfo>,
}

/// Envelope with the `result` left unparsed, used to read `errors` from any response.
#[derive(Debug, Deserialize)]
pub struct CloudflareErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareResultInfo {
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Cloudflare Zone 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
}

/// `GET /user/tokens/verify`
#[derive(Debug, Deserialize)]
pub struct CloudflareTokenStatus {
    pub status: String,
}

/// Cloudflare DNS Record 结构（响应）
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub content: Option<String>,
    pub ttl: u32,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default, with = "crate::utils::datetime")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::datetime")]
    pub modified_on: Option<DateTime<Utc>>,
    /// SRV/CAA 等复杂记录类型的结构化数据
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Body of create (`POST`) and update (`PATCH`) calls. Unset fields are omitted.
#[derive(Debug, Default, Serialize)]
pub struct CloudflareRecordPayload {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CloudflareRecordData>,
}

/// Structured `data` object of SRV and CAA records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CloudflareRecordData {
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Caa {
        flags: u8,
        tag: String,
        value: String,
    },
}
