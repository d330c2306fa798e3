//! 真实环境集成测试（默认忽略）
//!
//! 运行方式:
//! ```bash
//! DNSIMPLE_API_TOKEN=xxx TEST_DOMAIN=example.com \
//!     cargo test -p dns-gateway-provider --test live_test -- --ignored --nocapture --test-threads=1
//! ```
//!
//! `CLOUDFLARE_API_TOKEN` / `DIGITALOCEAN_API_TOKEN` 同理。

mod common;

use common::TestContext;
use dns_gateway_provider::{DnsRecordType, RecordContent, RecordFilter, UpdateRecordRequest};

async fn crud_round(ctx: TestContext) {
    assert!(require_ok!(ctx.provider.test_connection().await), "凭证应该有效");

    let (name, id) = require_some!(ctx.create_test_record().await, "创建测试记录失败");

    let record = require_ok!(ctx.provider.get_record(&ctx.domain, &id).await);
    assert_eq!(record.name, name);
    assert_eq!(record.record_type, DnsRecordType::Txt);

    let update = UpdateRecordRequest::new(ctx.domain.clone(), id.clone())
        .with_content("integration-test-updated")
        .with_ttl(900);
    let updated = ctx.provider.update_record(&update).await;
    if updated.is_err() {
        ctx.cleanup_record(&id).await;
    }
    require_ok!(updated);

    let filter = RecordFilter::by_name(name.clone()).with_type(DnsRecordType::Txt);
    let listed = require_ok!(ctx.provider.list_records(&ctx.domain, &filter).await);
    assert!(
        listed.iter().any(|r| r.id == id
            && matches!(&r.content, RecordContent::Scalar(s) if s.contains("integration-test-updated"))),
        "更新后的记录未出现在列表中: {listed:?}"
    );

    require_ok!(ctx.provider.delete_record(&ctx.domain, &id).await);
    assert!(ctx.provider.delete_record(&ctx.domain, &id).await.is_err());

    println!("✓ {} CRUD 测试通过", ctx.provider.id());
}

#[tokio::test]
#[ignore]
async fn test_dnsimple_crud() {
    skip_if_no_credentials!("DNSIMPLE_API_TOKEN", "TEST_DOMAIN");
    let ctx = require_some!(TestContext::dnsimple(), "创建测试上下文失败");
    crud_round(ctx).await;
}

#[tokio::test]
#[ignore]
async fn test_cloudflare_crud() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "TEST_DOMAIN");
    let ctx = require_some!(TestContext::cloudflare(), "创建测试上下文失败");
    crud_round(ctx).await;
}

#[tokio::test]
#[ignore]
async fn test_digitalocean_crud() {
    skip_if_no_credentials!("DIGITALOCEAN_API_TOKEN", "TEST_DOMAIN");
    let ctx = require_some!(TestContext::digitalocean(), "创建测试上下文失败");
    crud_round(ctx).await;
}

/// 清理所有残留的测试记录（手动运行）
#[tokio::test]
#[ignore]
async fn test_cleanup_test_records() {
    skip_if_no_credentials!("TEST_DOMAIN");
    for ctx in [TestContext::dnsimple(), TestContext::cloudflare(), TestContext::digitalocean()]
        .into_iter()
        .flatten()
    {
        ctx.cleanup_all_test_records().await;
    }
    println!("✓ 清理完成");
}
