//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use dns_gateway_provider::{
    CreateRecordRequest, DnsProvider, DnsRecordType, ProviderConfig, RecordFilter,
    create_provider,
};
use serde_json::{Value, json};
use wiremock::MockServer;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Err`，并解包返回错误（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
}

pub const TEST_TOKEN: &str = "tok-secret-0123456789";
pub const TEST_ZONE: &str = "example.com";

/// Mock 服务器对应的 Provider 配置
pub fn mock_config(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new()
        .with("api_token", TEST_TOKEN)
        .with("base_url", server.uri())
}

/// 通过注册表创建指向 Mock 服务器的 Provider
pub fn mock_provider(name: &str, config: ProviderConfig) -> Option<Arc<dyn DnsProvider>> {
    create_provider(name, config).ok()
}

/// Mock 服务器收到的全部请求体（JSON）
pub async fn received_bodies(server: &MockServer, http_method: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == http_method)
        .filter_map(|r| serde_json::from_slice(&r.body).ok())
        .collect()
}

/// Mock 服务器收到的请求数（按路径）
pub async fn request_count(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == request_path)
        .count()
}

// ============ DNSimple 响应 ============

pub fn dnsimple_whoami(account_id: u64) -> Value {
    json!({ "data": { "user": null, "account": { "id": account_id, "email": "ops@example.com" } } })
}

pub fn dnsimple_record(id: u64, name: &str, record_type: &str, content: &str) -> Value {
    json!({
        "id": id,
        "zone_id": TEST_ZONE,
        "parent_id": null,
        "name": name,
        "content": content,
        "ttl": 300,
        "priority": null,
        "type": record_type,
        "system_record": false,
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-02T10:00:00Z"
    })
}

pub fn dnsimple_page(records: Vec<Value>, page: u32, total_pages: u32) -> Value {
    json!({
        "data": records,
        "pagination": {
            "current_page": page,
            "per_page": 100,
            "total_entries": records.len(),
            "total_pages": total_pages
        }
    })
}

// ============ Cloudflare 响应 ============

pub fn cloudflare_ok(result: Value) -> Value {
    json!({ "success": true, "errors": [], "messages": [], "result": result })
}

pub fn cloudflare_page(result: Vec<Value>, page: u32, total_pages: u32) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
        "result_info": { "page": page, "per_page": 100, "total_pages": total_pages }
    })
}

pub fn cloudflare_failure(code: i64, message: &str) -> Value {
    json!({ "success": false, "errors": [{ "code": code, "message": message }], "messages": [], "result": null })
}

pub fn cloudflare_zone(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "status": "active" })
}

pub fn cloudflare_record(id: &str, name: &str, record_type: &str, content: &str) -> Value {
    json!({
        "id": id,
        "type": record_type,
        "name": name,
        "content": content,
        "ttl": 1,
        "proxied": false,
        "created_on": "2024-03-01T10:00:00Z",
        "modified_on": "2024-03-02T10:00:00Z"
    })
}

// ============ DigitalOcean 响应 ============

pub fn digitalocean_record(id: u64, name: &str, record_type: &str, data: &str) -> Value {
    json!({
        "id": id,
        "type": record_type,
        "name": name,
        "data": data,
        "priority": null,
        "port": null,
        "ttl": 1800,
        "weight": null,
        "flags": null,
        "tag": null
    })
}

// ============ 真实环境 ============

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub domain: String,
}

impl TestContext {
    fn from_env(name: &str, token_var: &str) -> Option<Self> {
        let api_token = env::var(token_var).ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let provider = create_provider(name, ProviderConfig::new().with("api_token", api_token)).ok()?;
        Some(Self { provider, domain })
    }

    /// 创建 DNSimple 测试上下文
    pub fn dnsimple() -> Option<Self> {
        Self::from_env("dnsimple", "DNSIMPLE_API_TOKEN")
    }

    /// 创建 Cloudflare 测试上下文
    pub fn cloudflare() -> Option<Self> {
        Self::from_env("cloudflare", "CLOUDFLARE_API_TOKEN")
    }

    /// 创建 DigitalOcean 测试上下文
    pub fn digitalocean() -> Option<Self> {
        Self::from_env("digitalocean", "DIGITALOCEAN_API_TOKEN")
    }

    /// 创建 TXT 测试记录，返回 (记录名, 记录 ID)
    pub async fn create_test_record(&self) -> Option<(String, String)> {
        let name = generate_test_record_name();
        let request = CreateRecordRequest::new(
            self.domain.clone(),
            name.clone(),
            DnsRecordType::Txt,
            "integration-test",
        )
        .with_ttl(600);

        let id = self.provider.create_record(&request).await.ok()?;
        Some((name, id))
    }

    /// 清理测试记录
    pub async fn cleanup_record(&self, record_id: &str) {
        let _ = self.provider.delete_record(&self.domain, record_id).await;
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_all_test_records(&self) {
        let filter = RecordFilter::by_type(DnsRecordType::Txt);
        if let Ok(records) = self.provider.list_records(&self.domain, &filter).await {
            for record in records {
                if record.name.starts_with("_test-") {
                    let _ = self.provider.delete_record(&self.domain, &record.id).await;
                }
            }
        }
    }
}
