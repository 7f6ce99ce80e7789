use serde::{Deserialize, Serialize};

/// A dish the user picked, with its quantity. `count` of 0 means
/// "not selected" and is dropped when a snapshot is saved.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderItem {
    pub dish_key: String,

    pub dish_name_zh: String,

    pub dish_name_ja: String,

    #[serde(default)]
    pub kana: String,

    #[serde(default)]
    pub pinyin: String,

    pub price_nt: f64,

    pub count: u32,
}

/// A finalized selection for one shop visit. Overwritten on every save,
/// read back on the confirmation screen, gone with the session.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderSnapshot {
    pub category: String,
    pub shop_name: String,
    pub items: Vec<OrderItem>,

    /// Epoch milliseconds at save time.
    pub saved_at: i64,
}
