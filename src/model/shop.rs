use serde::{Deserialize, Serialize};

/// One resolved catalog row: a dish offered by a shop, with its bilingual
/// names, pronunciation aids, and price in New Taiwan dollars.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShopDish {
    pub category: String,

    pub shop_name: String,

    /// Dish name in the source script (台湾).
    pub dish_name_zh: String,

    /// Dish name in the user's language (日本語).
    pub dish_name_ja: String,

    /// Kana reading of the native name.
    pub kana: String,

    /// Romanized transcription (pinyin).
    pub pinyin: String,

    pub price_nt: f64,
}

/// One deduplicated menu entry as shown on the dish-selection screen.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Dish {
    pub key: String,
    pub dish_name_zh: String,
    pub dish_name_ja: String,
    pub kana: String,
    pub pinyin: String,
    pub price_nt: f64,
}

/// Dedup identity of a dish within a shop: native name + gloss name.
pub fn dish_key(dish_name_zh: &str, dish_name_ja: &str) -> String {
    format!("{dish_name_zh}||{dish_name_ja}")
}

impl Dish {
    pub fn from_row(row: &ShopDish) -> Self {
        Dish {
            key: dish_key(&row.dish_name_zh, &row.dish_name_ja),
            dish_name_zh: row.dish_name_zh.clone(),
            dish_name_ja: row.dish_name_ja.clone(),
            kana: row.kana.clone(),
            pinyin: row.pinyin.clone(),
            price_nt: row.price_nt,
        }
    }
}
