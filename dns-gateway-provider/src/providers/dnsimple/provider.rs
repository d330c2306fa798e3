//! DNSimple DnsProvider trait 实现

use async_trait::async_trait;

use crate::config::ConfigurationSchema;
use crate::error::Result;
use crate::providers::common::{
    check_create_request, encode_segment, format_caa_content, format_srv_content,
    normalize_domain_name, normalize_record_name, parse_caa_content, parse_srv_content,
    parse_vendor_record_type, require_token,
};
use crate::traits::{DnsProvider, Operation, ProviderErrorMapper};
use crate::types::{
    CreateRecordRequest, DnsRecord, DnsRecordType, ProviderMetadata, RecordContent, RecordFilter,
    StructuredContent, UpdateRecordRequest,
};

use super::types::{DnsimpleRecord, DnsimpleRecordPayload};
use super::{DnsimpleProvider, MAX_PAGE_SIZE, PROVIDER_NAME, SUPPORTED_RECORD_TYPES};

/// `(content, priority)` as DNSimple stores them.
///
/// MX and SRV carry their priority in a separate field; SRV content is
/// `"weight port target"`, CAA content `flags tag "value"`.
fn structured_to_wire(content: StructuredContent) -> (String, Option<u16>) {
    match content {
        StructuredContent::Mx { priority, exchange } => (exchange, Some(priority)),
        StructuredContent::Srv {
            priority,
            weight,
            port,
            target,
        } => (format_srv_content(weight, port, &target), Some(priority)),
        StructuredContent::Caa { flags, tag, value } => {
            (format_caa_content(flags, &tag, &value), None)
        }
    }
}

/// Scalar content is sent verbatim, without a priority.
fn content_to_wire(content: &RecordContent) -> (String, Option<u16>) {
    match content {
        RecordContent::Structured(s) => structured_to_wire(s.clone()),
        RecordContent::Scalar(text) => (text.clone(), None),
    }
}

/// Converts a DNSimple record; `None` for types outside the record model.
fn record_from_wire(record: DnsimpleRecord, domain: &str) -> Option<DnsRecord> {
    let record_type = parse_vendor_record_type(PROVIDER_NAME, &record.record_type)?;
    let priority = record.priority.unwrap_or(0);

    let content = match record_type {
        DnsRecordType::Mx => RecordContent::Structured(StructuredContent::Mx {
            priority,
            exchange: record.content,
        }),
        DnsRecordType::Srv => parse_srv_content(priority, &record.content)
            .map_or(RecordContent::Scalar(record.content), RecordContent::Structured),
        DnsRecordType::Caa => parse_caa_content(&record.content)
            .map_or(RecordContent::Scalar(record.content), RecordContent::Structured),
        _ => RecordContent::Scalar(record.content),
    };

    Some(DnsRecord {
        id: record.id,
        domain: domain.to_string(),
        name: normalize_record_name(&record.name),
        record_type,
        content,
        ttl: record.ttl,
        created_at: record.created_at,
        updated_at: record.updated_at,
    })
}

impl DnsimpleProvider {
    fn records_path(account: &str, domain: &str) -> String {
        format!(
            "/{}/zones/{}/records",
            encode_segment(account),
            encode_segment(domain)
        )
    }

    fn record_path(account: &str, domain: &str, record_id: &str) -> String {
        format!(
            "{}/{}",
            Self::records_path(account, domain),
            encode_segment(record_id)
        )
    }
}

#[async_trait]
impl DnsProvider for DnsimpleProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: PROVIDER_NAME,
            name: "DNSimple",
            description: "DNSimple domain management API v2",
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

    async fn test_connection(&self) -> Result<bool> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;
        let whoami = self.whoami().await?;
        match whoami.account {
            Some(account) => {
                // A configured account id keeps precedence.
                self.account_id.seed(account.id);
            }
            None if self.account_id.get().is_some() => {}
            None => {
                return Err(self.parse_error(
                    "whoami response contains no account; set the account_id option",
                    &Operation::Probe,
                ));
            }
        }
        Ok(true)
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

        let account = self.resolve_account_id().await?;
        let (content, priority) = content_to_wire(&req.content);
        let payload = DnsimpleRecordPayload {
            name: Some(name.clone()),
            record_type: Some(req.record_type.as_str()),
            content: Some(content),
            ttl: req.ttl,
            priority,
        };

        let created = self
            .post::<_, DnsimpleRecord>(&Self::records_path(&account, &domain), &payload, &op)
            .await?;
        log::info!(
            "[{PROVIDER_NAME}] Created {} record '{name}' in {domain} (id {})",
            req.record_type,
            created.data.id
        );
        Ok(created.data.id)
    }

    async fn update_record(&self, req: &UpdateRecordRequest) -> Result<bool> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(&req.domain);
        let op = Operation::Update {
            domain: &domain,
            record_id: &req.record_id,
        };

        let account = self.resolve_account_id().await?;
        let (content, priority) = match &req.content {
            Some(content) => {
                let (content, priority) = content_to_wire(content);
                (Some(content), priority)
            }
            None => (None, None),
        };
        let payload = DnsimpleRecordPayload {
            content,
            ttl: req.ttl,
            priority,
            ..Default::default()
        };

        self.patch(
            &Self::record_path(&account, &domain, &req.record_id),
            &payload,
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

        let account = self.resolve_account_id().await?;
        self.delete(&Self::record_path(&account, &domain, record_id), &op)
            .await
    }

    async fn get_record(&self, domain: &str, record_id: &str) -> Result<DnsRecord> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(domain);
        let account = self.resolve_account_id().await?;
        let resp = self
            .get::<DnsimpleRecord>(
                &Self::record_path(&account, &domain, record_id),
                &[],
                &Operation::Read,
            )
            .await?;

        let record_type = resp.data.record_type.clone();
        record_from_wire(resp.data, &domain).ok_or_else(|| {
            self.parse_error(
                format!("record {record_id} has type {record_type}, which is not supported"),
                &Operation::Read,
            )
        })
    }

    async fn list_records(&self, domain: &str, filter: &RecordFilter) -> Result<Vec<DnsRecord>> {
        require_token(PROVIDER_NAME, self.api_token.as_deref())?;

        let domain = normalize_domain_name(domain);
        let account = self.resolve_account_id().await?;
        let path = Self::records_path(&account, &domain);

        let mut base_query: Vec<(&str, String)> = Vec::new();
        if let Some(name) = filter.name.as_deref().map(normalize_record_name) {
            // The apex ("") cannot be expressed as a query filter; it is matched locally.
            if !name.is_empty() {
                base_query.push(("name", name));
            }
        }
        if let Some(record_type) = filter.record_type {
            base_query.push(("type", record_type.as_str().to_string()));
        }
        base_query.push(("per_page", MAX_PAGE_SIZE.to_string()));

        let mut records = Vec::new();
        let mut page: u32 = 1;
        loop {
            let mut query = base_query.clone();
            query.push(("page", page.to_string()));

            let resp = self
                .get::<Vec<DnsimpleRecord>>(&path, &query, &Operation::Read)
                .await?;
            let fetched = resp.data.len();
            records.extend(
                resp.data
                    .into_iter()
                    .filter_map(|r| record_from_wire(r, &domain))
                    .filter(|r| filter.matches(r)),
            );

            let total_pages = resp.pagination.map_or(1, |p| p.total_pages);
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
