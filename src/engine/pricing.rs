// ==========================================
// 价格规则引擎
// ==========================================
// 红线: 纯函数，无副作用；缺失/非数值价格按 0 处理，永不中断整行
// 规则: 中间 round() 为“四舍五入远离零”，最终一律向上取整到 100,000 档
// ==========================================

use crate::domain::Product;

/// 价格档位（向上取整单位）
pub const PRICE_BUCKET: f64 = 100_000.0;

/// Tokopedia 加价除数
pub const TOKOPEDIA_DIVISOR: f64 = 0.92;

/// Blibli 加价除数（原价 / 促销价变体 B）
pub const BLIBLI_DIVISOR: f64 = 0.97;

/// Blibli 主表促销价乘数（变体 A）
pub const BLIBLI_SALE_MULTIPLIER: f64 = 1.03;

/// Blibli 促销价计算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlibliSaleRule {
    /// 主表: round(sale * 1.03)
    MainSheet,
    /// 促销专表: round(sale / 0.97)
    SaleOnlySheet,
}

/// 向上取整到 100,000 档；非有限值视为 0
fn ceil_to_bucket(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    ((value / PRICE_BUCKET).ceil() * PRICE_BUCKET) as i64
}

fn base(price: Option<f64>) -> f64 {
    price.filter(|p| p.is_finite()).unwrap_or(0.0)
}

/// Tokopedia 价格: `ceil((regular / 0.92) / 100000) * 100000`
pub fn tokopedia_price(regular: Option<f64>) -> i64 {
    ceil_to_bucket(base(regular) / TOKOPEDIA_DIVISOR)
}

/// Blibli 原价: `ceil(round(regular / 0.97) / 100000) * 100000`
pub fn blibli_regular_price(regular: Option<f64>) -> i64 {
    ceil_to_bucket((base(regular) / BLIBLI_DIVISOR).round())
}

/// Blibli 促销价（按变体）
pub fn blibli_sale_price(sale: Option<f64>, rule: BlibliSaleRule) -> i64 {
    let marked_up = match rule {
        BlibliSaleRule::MainSheet => base(sale) * BLIBLI_SALE_MULTIPLIER,
        BlibliSaleRule::SaleOnlySheet => base(sale) / BLIBLI_DIVISOR,
    };
    ceil_to_bucket(marked_up.round())
}

/// Blibli 实际挂牌价
///
/// 不定期促销（有促销价、无开始/结束日期）用促销价，否则用原价。
pub fn blibli_effective_price(product: &Product, rule: BlibliSaleRule) -> i64 {
    if product.has_indefinite_sale() {
        blibli_sale_price(product.sale_price, rule)
    } else {
        blibli_regular_price(product.regular_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(regular: Option<f64>, sale: Option<f64>) -> Product {
        let mut p = Product::new(1, "Bag", Utc::now());
        p.regular_price = regular;
        p.sale_price = sale;
        p
    }

    #[test]
    fn test_tokopedia_price_scenario() {
        // 1,000,000 / 0.92 = 1,086,956.52 → 1,100,000
        assert_eq!(tokopedia_price(Some(1_000_000.0)), 1_100_000);
    }

    #[test]
    fn test_tokopedia_price_is_bucket_multiple_and_covers_markup() {
        let mut price = 0.0;
        while price < 25_000_000.0 {
            let rounded = tokopedia_price(Some(price));
            assert_eq!(rounded % 100_000, 0, "price={}", price);
            assert!(rounded as f64 >= price / TOKOPEDIA_DIVISOR, "price={}", price);
            price += 37_337.0;
        }
    }

    #[test]
    fn test_missing_price_is_zero() {
        assert_eq!(tokopedia_price(None), 0);
        assert_eq!(blibli_regular_price(None), 0);
        assert_eq!(blibli_sale_price(None, BlibliSaleRule::MainSheet), 0);
        assert_eq!(tokopedia_price(Some(f64::NAN)), 0);
    }

    #[test]
    fn test_blibli_regular_price() {
        // round(1,000,000 / 0.97) = 1,030,928 → 1,100,000
        assert_eq!(blibli_regular_price(Some(1_000_000.0)), 1_100_000);
        // 97,000 / 0.97 = 100,000 → 恰好一档
        assert_eq!(blibli_regular_price(Some(97_000.0)), 100_000);
    }

    #[test]
    fn test_blibli_sale_variants() {
        // round(900,000 * 1.03) = 927,000 → 1,000,000
        assert_eq!(
            blibli_sale_price(Some(900_000.0), BlibliSaleRule::MainSheet),
            1_000_000
        );
        // round(900,000 / 0.97) = 927,835 → 1,000,000
        assert_eq!(
            blibli_sale_price(Some(900_000.0), BlibliSaleRule::SaleOnlySheet),
            1_000_000
        );
        // round(980,000 / 0.97) = 1,010,309 → 1,100,000，而 980,000 * 1.03 = 1,009,400 → 1,100,000
        assert_eq!(
            blibli_sale_price(Some(980_000.0), BlibliSaleRule::SaleOnlySheet),
            1_100_000
        );
    }

    #[test]
    fn test_effective_price_indefinite_sale() {
        let p = product(Some(1_000_000.0), Some(900_000.0));
        assert_eq!(blibli_effective_price(&p, BlibliSaleRule::MainSheet), 1_000_000);
    }

    #[test]
    fn test_effective_price_time_boxed_sale_falls_back() {
        let mut p = product(Some(1_000_000.0), Some(900_000.0));
        p.sale_from = Some("2026-01-01".to_string());
        assert_eq!(blibli_effective_price(&p, BlibliSaleRule::MainSheet), 1_100_000);

        p.sale_from = None;
        p.sale_to = Some("2026-02-01".to_string());
        assert_eq!(
            blibli_effective_price(&p, BlibliSaleRule::SaleOnlySheet),
            1_100_000
        );
    }

    #[test]
    fn test_effective_price_without_sale() {
        let p = product(Some(1_000_000.0), None);
        assert_eq!(blibli_effective_price(&p, BlibliSaleRule::MainSheet), 1_100_000);
    }
}
