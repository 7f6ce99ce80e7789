use std::io::Cursor;

use csv::ReaderBuilder;

use crate::error::CoreError;
use crate::model::shop::ShopDish;

// Fixed header labels of the published sheet.
const COL_CATEGORY: &str = "カテゴリ";
const COL_SHOP_NAME: &str = "店名";
const COL_DISH_ZH: &str = "料理名(台)";
const COL_DISH_JA: &str = "料理名(日)";
const COL_KANA: &str = "読み(カナ)";
const COL_PINYIN: &str = "ピンイン";
const COL_PRICE_NT: &str = "値段(NT$)";

/// Parses the published sheet body into catalog rows.
///
/// Structural CSV problems (bad quoting, ragged records) fail the whole
/// parse. A row missing any required field, or whose price is not a
/// positive finite number, is dropped silently; the rest of the catalog
/// stays available. Input row order is preserved.
pub fn parse(csv_text: &str) -> Result<Vec<ShopDish>, CoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(Cursor::new(csv_text));

    let headers = reader
        .headers()
        .map_err(|e| CoreError::Parse {
            detail: e.to_string(),
        })?
        .clone();

    let col = |name: &str| headers.iter().position(|h| h.trim() == name);

    let idx_category = col(COL_CATEGORY);
    let idx_shop_name = col(COL_SHOP_NAME);
    let idx_dish_zh = col(COL_DISH_ZH);
    let idx_dish_ja = col(COL_DISH_JA);
    let idx_kana = col(COL_KANA);
    let idx_pinyin = col(COL_PINYIN);
    let idx_price_nt = col(COL_PRICE_NT);

    let mut rows: Vec<ShopDish> = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| CoreError::Parse {
            detail: e.to_string(),
        })?;

        let category = field(&record, idx_category);
        let shop_name = field(&record, idx_shop_name);
        let dish_name_zh = field(&record, idx_dish_zh);
        let dish_name_ja = field(&record, idx_dish_ja);
        let kana = field(&record, idx_kana);
        let pinyin = field(&record, idx_pinyin);
        let price_nt = match to_positive_number(field(&record, idx_price_nt)) {
            Some(v) => v,
            None => continue,
        };

        if category.is_empty()
            || shop_name.is_empty()
            || dish_name_zh.is_empty()
            || dish_name_ja.is_empty()
            || kana.is_empty()
            || pinyin.is_empty()
        {
            continue;
        }

        rows.push(ShopDish {
            category: category.to_string(),
            shop_name: shop_name.to_string(),
            dish_name_zh: dish_name_zh.to_string(),
            dish_name_ja: dish_name_ja.to_string(),
            kana: kana.to_string(),
            pinyin: pinyin.to_string(),
            price_nt,
        });
    }

    Ok(rows)
}

fn field<'r>(record: &'r csv::StringRecord, idx: Option<usize>) -> &'r str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

fn to_positive_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Some(n),
        _ => None,
    }
}
