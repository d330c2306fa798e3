//! Cloudflare DnsProvider trait 实现

use async_trait::async_trait;
use reqwest::Method;

use crate::config::ConfigurationSchema;
use crate::error::Result;
use crate::providers::common::{
    check_create_request, encode_segment, full_name_to_relative, normalize_domain_name,
    normalize_record_name, parse_caa_content, parse_srv_content, parse_vendor_record_type,
    relative_to_full_name, require_token,
};
use crate::traits::{DnsProvider, Operation, ProviderErrorMapper};
use crate::types::{
    CreateRecordRequest, DnsRecord, DnsRecordType, ProviderMetadata, RecordContent, RecordFilter,
    StructuredContent, UpdateRecordRequest,
};

use super::types::{
    CloudflareDnsRecord, CloudflareRecordData, CloudflareRecordPayload, CloudflareTokenStatus,
};
use super::{CloudflareProvider, MAX_PAGE_SIZE_RECORDS, PROVIDER_NAME, SUPPORTED_RECORD_TYPES};

/// Writes content fields into `payload`: MX uses `content` + `priority`,
/// SRV and CAA use the `data` object. Scalars go to `content` verbatim.
fn apply_content(payload: &mut CloudflareRecordPayload, content: &RecordContent) {
    match content {
        RecordContent::Scalar(text) => payload.content = Some(text.clone()),
        RecordContent::Structured(StructuredContent::Mx { priority, exchange }) => {
            payload.content = Some(exchange.clone());
            payload.priority = Some(*priority);
        }
        RecordContent::Structured(StructuredContent::Srv {
            priority,
            weight,
            port,
            target,
        }) => {
            payload.data = Some(CloudflareRecordData::Srv {
                priority: *priority,
                weight: *weight,
                port: *port,
                target: target.clone(),
            });
        }
        RecordContent::Structured(StructuredContent::Caa { flags, tag, value }) => {
            payload.data = Some(CloudflareRecordData::Caa {
                flags: *flags,
                tag: tag.clone(),
                value: value.clone(),
            });
        }
    }
}

fn record_from_wire(record: CloudflareDnsRecord, domain: &str) -> Option<DnsRecord> {
    let record_type = parse_vendor_record_type(PROVIDER_NAME, &record.record_type)?;
    let text = record.content.unwrap_or_default();
    let data = record
        .data
        .and_then(|d| serde_json::from_value::<CloudflareRecordData>(d).ok());

    let content = match (record_type, data) {
        (DnsRecordType::Mx, _) => RecordContent::Structured(StructuredContent::Mx {
            priority: record.priority.unwrap_or(0),
            exchange: text,
        }),
        (
            DnsRecordType::Srv,
            Some(CloudflareRecordData::Srv {
                priority,
                weight,
                port,
                target,
            }),
        ) => RecordContent::Structured(StructuredContent::Srv {
            priority,
            weight,
            port,
            target,
        }),
        (DnsRecordType::Caa, Some(CloudflareRecordData::Caa { flags, tag, value })) => {
            RecordContent::Structured(StructuredContent::Caa { flags, tag, value })
        }
        (DnsRecordType::Srv, _) => parse_srv_content(record.priority.unwrap_or(0), &text)
            .map_or(RecordContent::Scalar(text), RecordContent::Structured),
        (DnsRecordType::Caa, _) => parse_caa_content(&text)
            .map_or(RecordContent::Scalar(text), RecordContent::Structured),
        _ => RecordContent::Scalar(text),
    };

    Some(DnsRecord {
        id: record.id,
        domain: domain.to_string(),
        name: full_name_to_relative(&record.name, domain),
        record_type,
        content,
        ttl: record.ttl,
        created_at: record.created_on,
        updated_at: record.modified_on,
    })
}

impl CloudflareProvider {
    fn records_path(zone_id: &str) -> String {
        format!("/zones/{}/dns_records", encode_segment(zone_id))
    }

    fn record_path(zone_id: &str, record_id: &str) -> String {
        format!(
            "{}/{}",
            Self::records_path(zone_id),
            encode_segment(record_id)
        )
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: PROVIDER_NAME,
            name: "Cloudflare",
            description: "Cloudflare DNS API v4",
            schema: super::configuration_schema(),
            supported_record_types: SUPPORTED_RECORD_TYPES,
        }
    }

    fn configuration_schema(&self) -> ConfigurationSchema {
        super::configuration_schema()
    }

    fn supported_record_types(&self) -> &'static [DnsRecordType] {
        SUPPORTED_RECORD_TYPES
    }

    /// `true` when the token is active, `false` when it exists but is disabled or expired.
    async fn test_connection(&self) -> Result<bool> {
        let status: CloudflareTokenStatus = self
            .request_result(
                Method::GET,
                "/user/tokens/verify",
                &[],
                None,
                &Operation::Probe,
            )
            .await?;
        Ok(status.status == "active")
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<String> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;
        check_create_request(PROVIDER_NAME, req, SUPPORTED_RECORD_TYPES)?;

        let domain = normalize_domain_name(&req.domain);
        let name = normalize_record_name(&req.name);
        let op = Operation::Create {
            domain: &domain,
            name: &name,
        };

        let zone_id = self.zone_id(&domain).await?;
        let mut payload = CloudflareRecordPayload {
            record_type: Some(req.record_type.as_str()),
            name: Some(relative_to_full_name(&name, &domain)),
            ttl: req.ttl,
            ..Default::default()
        };
        apply_content(&mut payload, &req.content);

        let body = self.to_body(&payload, &op)?;
        let created: CloudflareDnsRecord = self
            .request_result(
                Method::POST,
                &Self::records_path(&zone_id),
                &[],
                Some(body),
                &op,
            )
            .await?;
        log::info!(
            "[{PROVIDER_NAME}] Created {} record '{name}' in {domain} (id {})",
            req.record_type,
            created.id
        );
        Ok(created.id)
    }

    async fn update_record(&self, req: &UpdateRecordRequest) -> Result<bool> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(&req.domain);
        let op = Operation::Update {
            domain: &domain,
            record_id: &req.record_id,
        };

        let zone_id = self.zone_id(&domain).await?;
        let mut payload = CloudflareRecordPayload {
            ttl: req.ttl,
            ..Default::default()
        };
        if let Some(content) = &req.content {
            apply_content(&mut payload, content);
        }

        let body = self.to_body(&payload, &op)?;
        self.request::<serde_json::Value>(
            Method::PATCH,
            &Self::record_path(&zone_id, &req.record_id),
            &[],
            Some(body),
            &op,
        )
        .await?;
        Ok(true)
    }

    async fn delete_record(&self, domain: &str, record_id: &str) -> Result<()> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(domain);
        let op = Operation::Delete {
            domain: &domain,
            record_id,
        };

        let zone_id = self.zone_id(&domain).await?;
        self.request::<serde_json::Value>(
            Method::DELETE,
            &Self::record_path(&zone_id, record_id),
            &[],
            None,
            &op,
        )
        .await?;
        Ok(())
    }

    async fn get_record(&self, domain: &str, record_id: &str) -> Result<DnsRecord> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(domain);
        let zone_id = self.zone_id(&domain).await?;
        let record: CloudflareDnsRecord = self
            .request_result(
                Method::GET,
                &Self::record_path(&zone_id, record_id),
                &[],
                None,
                &Operation::Read,
            )
            .await?;

        let record_type = record.record_type.clone();
        record_from_wire(record, &domain).ok_or_else(|| {
            self.parse_error(
                format!("record {record_id} has type {record_type}, which is not supported"),
                &Operation::Read,
            )
        })
    }

    async fn list_records(&self, domain: &str, filter: &RecordFilter) -> Result<Vec<DnsRecord>> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(domain);
        let zone_id = self.zone_id(&domain).await?;
        let path = Self::records_path(&zone_id);

        let mut base_query: Vec<(&str, String)> =
            vec![("per_page", MAX_PAGE_SIZE_RECORDS.to_string())];
        if let Some(name) = filter.name.as_deref() {
            base_query.push(("name", relative_to_full_name(name, &domain)));
        }
        if let Some(record_type) = filter.record_type {
            base_query.push(("type", record_type.as_str().to_string()));
        }

        let mut records = Vec::new();
        let mut page: u32 = 1;
        loop {
            let mut query = base_query.clone();
            query.push(("page", page.to_string()));

            let resp = self
                .request::<Vec<CloudflareDnsRecord>>(
                    Method::GET,
                    &path,
                    &query,
                    None,
                    &Operation::Read,
                )
                .await?;
            let batch = resp.result.unwrap_or_default();
            let fetched = batch.len();
            records.extend(
                batch
                    .into_iter()
                    .filter_map(|r| record_from_wire(r, &domain))
                    .filter(|r| filter.matches(r)),
            );

            let total_pages = resp
                .result_info
                .and_then(|info| info.total_pages)
                .unwrap_or(1);
            if fetched == 0 || page >= total_pages {
                break;
            }
            page += 1;
        }

        log::debug!(
            "[{PROVIDER_NAME}] Listed {} record(s) in {domain} over {page} page(s)",
            records.len()
        );
        Ok(records)
    }
}
