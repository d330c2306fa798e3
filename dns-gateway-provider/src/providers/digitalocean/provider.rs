//! DigitalOcean DnsProvider trait 实现

use async_trait::async_trait;
use reqwest::Method;

use crate::config::ConfigurationSchema;
use crate::error::Result;
use crate::providers::common::{
    check_create_request, encode_segment, normalize_domain_name, normalize_record_name,
    parse_vendor_record_type, relative_to_full_name, require_token,
};
use crate::traits::{DnsProvider, Operation, ProviderErrorMapper};
use crate::types::{
    CreateRecordRequest, DnsRecord, DnsRecordType, ProviderMetadata, RecordContent, RecordFilter,
    StructuredContent, UpdateRecordRequest,
};

use super::types::{
    AccountResponse, DomainRecord, DomainRecordPayload, DomainRecordResponse,
    DomainRecordsResponse,
};
use super::{DigitalOceanProvider, MAX_PAGE_SIZE, PROVIDER_NAME, SUPPORTED_RECORD_TYPES};

/// Apex is `@` on the DigitalOcean wire.
fn wire_name(name: &str) -> String {
    let name = normalize_record_name(name);
    if name.is_empty() { "@".to_string() } else { name }
}

/// Writes content fields into `payload`. The target, exchange or CAA value
/// always travels in `data`; the other sub-fields have their own keys.
/// Scalars go to `data` verbatim.
fn apply_content(payload: &mut DomainRecordPayload, content: &RecordContent) {
    match content {
        RecordContent::Scalar(text) => payload.data = Some(text.clone()),
        RecordContent::Structured(StructuredContent::Mx { priority, exchange }) => {
            payload.data = Some(exchange.clone());
            payload.priority = Some(*priority);
        }
        RecordContent::Structured(StructuredContent::Srv {
            priority,
            weight,
            port,
            target,
        }) => {
            payload.data = Some(target.clone());
            payload.priority = Some(*priority);
            payload.weight = Some(*weight);
            payload.port = Some(*port);
        }
        RecordContent::Structured(StructuredContent::Caa { flags, tag, value }) => {
            payload.data = Some(value.clone());
            payload.flags = Some(*flags);
            payload.tag = Some(tag.clone());
        }
    }
}

fn record_from_wire(record: DomainRecord, domain: &str) -> Option<DnsRecord> {
    let record_type = parse_vendor_record_type(PROVIDER_NAME, &record.record_type)?;

    let content = match (record_type, record.priority, record.weight, record.port) {
        (DnsRecordType::Mx, priority, _, _) => RecordContent::Structured(StructuredContent::Mx {
            priority: priority.unwrap_or(0),
            exchange: record.data,
        }),
        (DnsRecordType::Srv, Some(priority), Some(weight), Some(port)) => {
            RecordContent::Structured(StructuredContent::Srv {
                priority,
                weight,
                port,
                target: record.data,
            })
        }
        (DnsRecordType::Caa, _, _, _) => match record.tag {
            Some(tag) => RecordContent::Structured(StructuredContent::Caa {
                flags: record.flags.unwrap_or(0),
                tag,
                value: record.data,
            }),
            None => RecordContent::Scalar(record.data),
        },
        _ => RecordContent::Scalar(record.data),
    };

    Some(DnsRecord {
        id: record.id,
        domain: domain.to_string(),
        name: normalize_record_name(&record.name),
        record_type,
        content,
        ttl: record.ttl,
        created_at: None,
        updated_at: None,
    })
}

impl DigitalOceanProvider {
    fn records_path(domain: &str) -> String {
        format!("/domains/{}/records", encode_segment(domain))
    }

    fn record_path(domain: &str, record_id: &str) -> String {
        format!("{}/{}", Self::records_path(domain), encode_segment(record_id))
    }
}

#[async_trait]
impl DnsProvider for DigitalOceanProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: PROVIDER_NAME,
            name: "DigitalOcean",
            description: "DigitalOcean Domains API v2",
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

    /// `false` when the account is locked.
    async fn test_connection(&self) -> Result<bool> {
        let resp: AccountResponse = self
            .send_json(Method::GET, "/account", &[], None, &Operation::Probe)
            .await?;
        Ok(resp.account.status != "locked")
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

        let mut payload = DomainRecordPayload {
            record_type: Some(req.record_type.as_str()),
            name: Some(wire_name(&name)),
            ttl: req.ttl,
            ..Default::default()
        };
        apply_content(&mut payload, &req.content);

        let body = self.to_body(&payload, &op)?;
        let created: DomainRecordResponse = self
            .send_json(
                Method::POST,
                &Self::records_path(&domain),
                &[],
                Some(body),
                &op,
            )
            .await?;
        log::info!(
            "[{PROVIDER_NAME}] Created {} record '{name}' in {domain} (id {})",
            req.record_type,
            created.domain_record.id
        );
        Ok(created.domain_record.id)
    }

    async fn update_record(&self, req: &UpdateRecordRequest) -> Result<bool> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(&req.domain);
        let op = Operation::Update {
            domain: &domain,
            record_id: &req.record_id,
        };

        let mut payload = DomainRecordPayload {
            ttl: req.ttl,
            ..Default::default()
        };
        if let Some(content) = &req.content {
            apply_content(&mut payload, content);
        }

        let body = self.to_body(&payload, &op)?;
        self.send(
            Method::PATCH,
            &Self::record_path(&domain, &req.record_id),
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
        self.send(
            Method::DELETE,
            &Self::record_path(&domain, record_id),
            &[],
            None,
            &op,
        )
        .await
        .map(|_| ())
    }

    async fn get_record(&self, domain: &str, record_id: &str) -> Result<DnsRecord> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(domain);
        let resp: DomainRecordResponse = self
            .send_json(
                Method::GET,
                &Self::record_path(&domain, record_id),
                &[],
                None,
                &Operation::Read,
            )
            .await?;

        let record_type = resp.domain_record.record_type.clone();
        record_from_wire(resp.domain_record, &domain).ok_or_else(|| {
            self.parse_error(
                format!("record {record_id} has type {record_type}, which is not supported"),
                &Operation::Read,
            )
        })
    }

    async fn list_records(&self, domain: &str, filter: &RecordFilter) -> Result<Vec<DnsRecord>> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(domain);
        let path = Self::records_path(&domain);

        let mut base_query: Vec<(&str, String)> = vec![("per_page", MAX_PAGE_SIZE.to_string())];
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

            let resp: DomainRecordsResponse = self
                .send_json(Method::GET, &path, &query, None, &Operation::Read)
                .await?;
            let has_next = resp.has_next_page();
            let fetched = resp.domain_records.len();
            records.extend(
                resp.domain_records
                    .into_iter()
                    .filter_map(|r| record_from_wire(r, &domain))
                    .filter(|r| filter.matches(r)),
            );

            if fetched == 0 || !has_next {
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
