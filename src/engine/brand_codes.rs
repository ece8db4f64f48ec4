// ==========================================
// 品牌 → Tokopedia 品牌编码表
// ==========================================
// 静态只读表；键为大写品牌名
// 未知品牌返回空字符串，不报错
// ==========================================

const BRAND_CODES: &[(&str, &str)] = &[
    ("BALENCIAGA", "17388550"),
    ("BOTTEGA VENETA", "17388579"),
    ("CHANEL", "17388526"),
    ("CHLOÉ", "17388556"),
    ("CELINE", "17388628"),
    ("DELVAUX", "17388590"),
    ("FAURÉ LE PAGE", "17388529"),
    ("FENDI", "17388562"),
    ("GIVENCHY", "17388596"),
    ("GUCCI", "17388635"),
    ("HERMÈS", "17513205"),
    ("LOUIS VUITTON", "17388565"),
    ("MIU MIU", "17388532"),
    ("MARC JACOB", "17388606"),
    ("MCM", "17388637"),
    ("PHILIP LIM", "17388570"),
    ("PROENZA SCHOULER", "17388645"),
    ("PRADA", "17388613"),
    ("SAINT LAURENT", "17388547"),
    ("SALVATORE FERRAGAMO", "17388574"),
    ("TOD'S", "17388618"),
    ("VALENTINO", "17388652"),
    ("BVLGARI", "18416049"),
    ("CHOPARD", "19406932"),
    ("GOYARD", "17388630"),
    ("TOD", "20650613"),
    ("ROLEX", "22705985"),
    ("DIOR", "25220080"),
    ("LOEWE", "27366907"),
    ("SECOND CHANCE LIVE", "29839735"),
    ("ALAÏA", "29890594"),
    ("DE LA COUR", "30446513"),
    ("BAO BAO", "30950622"),
];

/// 品牌名规范化: trim + 大写（Unicode 大写，“Chloé” → “CHLOÉ”）
pub fn normalize_brand(brand: &str) -> String {
    brand.trim().to_uppercase()
}

/// 查询品牌编码；未知或空品牌返回 ""
pub fn brand_code(brand: Option<&str>) -> &'static str {
    let Some(brand) = brand else {
        return "";
    };
    let key = normalize_brand(brand);
    BRAND_CODES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, code)| *code)
        .unwrap_or("")
}
