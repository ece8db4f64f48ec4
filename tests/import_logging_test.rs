// ==========================================
// 导入日志测试
// ==========================================
// 覆盖: 每个跳过行恰好一条 warn 及以上日志；跳过行不改动商品数据
// 说明: 独立测试二进制，不安装全局 subscriber
// ==========================================


use marketplace_bridge::domain::{ImportRequest, MarketplaceTarget, SkipReason};
use marketplace_bridge::repository::{ProductQuery, ProductRepository};
use marketplace_bridge::sheet::CellValue;
use marketplace_bridge::{MarketplaceImporter, RowOutcome};
use std::sync::{Arc, Mutex};
use test_helpers::{sample_product, upload_bytes, TestEnv};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// 记录本 crate 发出的 warn / error 事件
#[derive(Clone, Default)]
struct WarnCapture {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl<S: Subscriber> Layer<S> for WarnCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() <= Level::WARN && meta.target().starts_with("marketplace_bridge") {
            self.events
                .lock()
                .unwrap()
                .push((*meta.level(), meta.target().to_string()));
        }
    }
}

#[test]
fn test_each_skipped_row_logs_once_and_catalog_unchanged() {
    let env = TestEnv::new();
    let repo = env.repo();
    repo.upsert_product(&sample_product(1, "GUCCI", "Bag", "G1", 1_000_000.0))
        .unwrap();
    repo.upsert_product(&sample_product(2, "PRADA", "Wallet", "P1", 800_000.0))
        .unwrap();
    let before = repo.query_products(&ProductQuery::default()).unwrap();

    let cells = vec![
        // 第 4 行: SKU 为空
        (3, 4, CellValue::from("Name only")),
        (6, 4, CellValue::from("9")),
        // 第 5 行: SKU 不存在
        (3, 5, CellValue::from("Name G404")),
        (6, 5, CellValue::from("9")),
        (11, 5, CellValue::from("G404")),
    ];

    let capture = WarnCapture::default();
    let subscriber = Registry::default().with(capture.clone());
    let outcome = tracing::subscriber::with_default(subscriber, || {
        MarketplaceImporter::new(env.repo())
            .import(&ImportRequest::from_bytes(
                MarketplaceTarget::TokopediaImport,
                upload_bytes(&cells),
            ))
            .unwrap()
    });

    assert!(outcome.status.is_success());
    let rows: Vec<_> = outcome.report.rows.iter().map(|r| r.outcome.clone()).collect();
    assert_eq!(
        rows,
        vec![
            RowOutcome::Skipped(SkipReason::SkuEmpty),
            RowOutcome::Skipped(SkipReason::SkuNotFound("G404".to_string())),
        ]
    );

    let events = capture.events.lock().unwrap();
    assert_eq!(events.len(), 2, "unexpected log events: {:?}", events);
    assert!(events.iter().all(|(level, _)| *level == Level::WARN));

    let after = repo.query_products(&ProductQuery::default()).unwrap();
    assert_eq!(before, after);
}
