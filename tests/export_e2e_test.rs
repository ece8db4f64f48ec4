// ==========================================
// 导出端到端测试
// ==========================================
// 覆盖: 价格/品牌编码/促销判定、跳过已上架、输出行连续、空选品、文件命名
// ==========================================


use marketplace_bridge::domain::{
    ExportOutcome, ExportRequest, MarketplaceTarget, SelectionRequest,
};
use marketplace_bridge::logging;
use marketplace_bridge::sheet::{TemplateWorkbook, Worksheet};
use marketplace_bridge::{ExportArtifact, MarketplaceExporter};
use test_helpers::{
    sample_product, TestEnv, TEMPLATE_DATA_SHEET, TEMPLATE_INTRO_SHEET, TEMPLATE_INTRO_TEXT,
};

fn run_export(env: &TestEnv, target: MarketplaceTarget, selection: SelectionRequest) -> ExportOutcome {
    let exporter = MarketplaceExporter::new(env.repo(), env.config());
    exporter
        .export(&ExportRequest::new(target, selection))
        .expect("export should succeed")
}

fn generated(outcome: ExportOutcome) -> ExportArtifact {
    match outcome {
        ExportOutcome::Generated(artifact) => artifact,
        ExportOutcome::NoProductsMatched => panic!("expected a generated file"),
    }
}

#[test]
fn test_tokopedia_export_scenario() {
    logging::init_test();
    let env = TestEnv::new();
    env.repo()
        .upsert_product(&sample_product(1, "GUCCI", "Bag", "G1", 1_000_000.0))
        .unwrap();

    let artifact = generated(run_export(
        &env,
        MarketplaceTarget::TokopediaExport,
        SelectionRequest::all(),
    ));

    assert_eq!(artifact.rows_written, 1);
    assert!(artifact.file_name.starts_with("tokopedia_export_"));
    assert!(artifact.file_name.ends_with(".xlsx"));
    assert!(artifact.file_path.starts_with(env.output_dir()));
    assert!(artifact.file_path.exists());

    let sheet = Worksheet::load_bytes(&artifact.bytes).unwrap();
    // 表头保留
    assert_eq!(sheet.cell_text(1, 3), "header 3");
    // 数据从第 4 行开始
    assert_eq!(sheet.cell_text(2, 4), "GUCCI Bag G1");
    assert_eq!(sheet.cell_text(7, 4), "17388635");
    assert_eq!(sheet.cell_text(15, 4), "G1");
    assert_eq!(sheet.cell_text(18, 4), "1100000");
    assert_eq!(sheet.cell_text(9, 4), "Bekas");
    assert!(sheet.cell_text(3, 4).contains("Kondisi mulus\nLengkap"));
    assert_eq!(sheet.highest_row(), 4);
}

#[test]
fn test_blibli_export_indefinite_sale_scenario() {
    logging::init_test();
    let env = TestEnv::new();
    let mut product = sample_product(1, "GUCCI", "Bag", "G1", 1_000_000.0);
    product.sale_price = Some(900_000.0);
    env.repo().upsert_product(&product).unwrap();

    let artifact = generated(run_export(
        &env,
        MarketplaceTarget::BlibliExport,
        SelectionRequest::all(),
    ));

    let sheet = Worksheet::load_bytes(&artifact.bytes).unwrap();
    assert_eq!(sheet.cell_text(1, 5), "GUCCI Bag G1");
    assert_eq!(sheet.cell_text(3, 5), "G1");
    assert_eq!(sheet.cell_text(26, 5), "1100000");
    assert_eq!(sheet.cell_text(27, 5), "1000000");
    assert!(sheet
        .cell_text(4, 5)
        .contains("Kondisi mulus<br /> Lengkap"));
}

#[test]
fn test_blibli_export_time_boxed_sale_uses_regular_price() {
    logging::init_test();
    let env = TestEnv::new();
    let mut product = sample_product(1, "GUCCI", "Bag", "G1", 1_000_000.0);
    product.sale_price = Some(900_000.0);
    product.sale_from = Some("2026-02-01".to_string());
    env.repo().upsert_product(&product).unwrap();

    let artifact = generated(run_export(
        &env,
        MarketplaceTarget::BlibliExport,
        SelectionRequest::all(),
    ));

    let sheet = Worksheet::load_bytes(&artifact.bytes).unwrap();
    assert_eq!(sheet.cell_text(26, 5), "1100000");
    assert_eq!(sheet.cell_text(27, 5), "1100000");
}

#[test]
fn test_blibli_sale_only_export() {
    logging::init_test();
    let env = TestEnv::new();
    let mut product = sample_product(1, "PRADA", "Wallet", "P1", 1_000_000.0);
    product.sale_price = Some(900_000.0);
    env.repo().upsert_product(&product).unwrap();

    let artifact = generated(run_export(
        &env,
        MarketplaceTarget::BlibliExportSaleOnly,
        SelectionRequest::all(),
    ));

    assert!(artifact.file_name.starts_with("blibli_export_sale_"));
    let sheet = Worksheet::load_bytes(&artifact.bytes).unwrap();
    assert_eq!(sheet.cell_text(1, 12), "P1");
    assert_eq!(sheet.cell_text(3, 12), "PRADA Wallet P1");
    assert_eq!(sheet.cell_text(4, 12), "1100000");
    // round(900,000 / 0.97) = 927,835 → 1,000,000
    assert_eq!(sheet.cell_text(5, 12), "1000000");
    assert_eq!(sheet.cell_text(6, 12), "1");
}

#[test]
fn test_listed_products_skipped_and_rows_contiguous() {
    logging::init_test();
    let env = TestEnv::new();
    let repo = env.repo();
    let mut listed = sample_product(2, "GUCCI", "Listed", "G2", 500_000.0);
    listed.tokopedia_marker = Some("https://tokopedia.com/store/g2".to_string());
    repo.upsert_product(&sample_product(1, "GUCCI", "Old", "G1", 500_000.0))
        .unwrap();
    repo.upsert_product(&listed).unwrap();
    repo.upsert_product(&sample_product(3, "GUCCI", "New", "G3", 500_000.0))
        .unwrap();

    let artifact = generated(run_export(
        &env,
        MarketplaceTarget::TokopediaExport,
        SelectionRequest::all(),
    ));

    assert_eq!(artifact.rows_written, 2);
    assert_eq!(artifact.skipped_listed, 1);

    // 创建时间倒序：G3 在前
    let sheet = Worksheet::load_bytes(&artifact.bytes).unwrap();
    assert_eq!(sheet.cell_text(15, 4), "G3");
    assert_eq!(sheet.cell_text(15, 5), "G1");
    assert_eq!(sheet.highest_row(), 5);

    // Tokopedia 标记不影响 Blibli 导出
    let blibli = generated(run_export(
        &env,
        MarketplaceTarget::BlibliExport,
        SelectionRequest::all(),
    ));
    assert_eq!(blibli.rows_written, 3);
}

#[test]
fn test_no_products_matched() {
    logging::init_test();
    let env = TestEnv::new();
    env.repo()
        .upsert_product(&sample_product(1, "GUCCI", "Bag", "G1", 1_000_000.0))
        .unwrap();

    let outcome = run_export(
        &env,
        MarketplaceTarget::TokopediaExport,
        SelectionRequest::all().with_products([999]),
    );

    assert!(matches!(outcome, ExportOutcome::NoProductsMatched));
    assert!(!env.output_dir().exists());
}

#[test]
fn test_selection_narrowing() {
    logging::init_test();
    let env = TestEnv::new();
    let repo = env.repo();

    let mut a = sample_product(1, "GUCCI", "A", "A1", 100_000.0);
    a.category_ids = vec![10];
    let mut b = sample_product(2, "GUCCI", "B", "B1", 100_000.0);
    b.category_ids = vec![20];
    let mut c = sample_product(3, "GUCCI", "C", "C1", 100_000.0);
    c.category_ids = vec![10];
    c.status = marketplace_bridge::ProductStatus::Draft;
    for p in [&a, &b, &c] {
        repo.upsert_product(p).unwrap();
    }

    let by_category = generated(run_export(
        &env,
        MarketplaceTarget::BlibliExportSaleOnly,
        SelectionRequest::all().with_categories([10]),
    ));
    assert_eq!(by_category.rows_written, 2);

    let published = generated(run_export(
        &env,
        MarketplaceTarget::BlibliExportSaleOnly,
        SelectionRequest::all()
            .with_categories([10])
            .published_only(true),
    ));
    assert_eq!(published.rows_written, 1);
    let sheet = Worksheet::load_bytes(&published.bytes).unwrap();
    assert_eq!(sheet.cell_text(1, 12), "A1");
}

#[test]
fn test_import_target_rejected() {
    logging::init_test();
    let env = TestEnv::new();
    let exporter = MarketplaceExporter::new(env.repo(), env.config());
    let result = exporter.export(&ExportRequest::new(
        MarketplaceTarget::TokopediaImport,
        SelectionRequest::all(),
    ));
    assert!(result.is_err());
}

#[test]
fn test_export_keeps_template_sheets_and_header_style() {
    logging::init_test();
    let env = TestEnv::new();
    env.repo()
        .upsert_product(&sample_product(1, "GUCCI", "Bag", "G1", 1_000_000.0))
        .unwrap();

    let artifact = generated(run_export(
        &env,
        MarketplaceTarget::BlibliExport,
        SelectionRequest::all(),
    ));
    let workbook = TemplateWorkbook::load_bytes(&artifact.bytes).unwrap();

    // 说明页保留，数据写入模板的活动工作表
    assert_eq!(
        workbook.sheet_names(),
        vec![TEMPLATE_INTRO_SHEET, TEMPLATE_DATA_SHEET]
    );
    assert_eq!(workbook.active_sheet_name(), TEMPLATE_DATA_SHEET);
    assert_eq!(workbook.cell_text(1, 4), "header 4");
    assert_eq!(workbook.cell_text(1, 5), "GUCCI Bag G1");

    let book = workbook.book();
    let intro = book.get_sheet_by_name(TEMPLATE_INTRO_SHEET).unwrap();
    assert_eq!(intro.get_value("A1"), TEMPLATE_INTRO_TEXT);
    assert!(intro.get_cell((1, 5)).is_none());
    assert_eq!(intro.get_highest_row(), 1);

    let data = book.get_sheet_by_name(TEMPLATE_DATA_SHEET).unwrap();
    let header_bold = data
        .get_style("A1")
        .get_font()
        .map(|font| font.get_bold().to_owned())
        .unwrap_or(false);
    assert!(header_bold);
    assert_eq!(data.get_merge_cells().len(), 1);
}
