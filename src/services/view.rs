use std::collections::HashSet;

use crate::model::order::OrderItem;
use crate::model::shop::{dish_key, Dish, ShopDish};
use crate::services::collate;

/// Upper bound of the quantity selector.
pub const MAX_COUNT: u32 = 10;

/// Shop rows of one category: sorted by shop name, first row per shop kept.
pub fn shops_in_category<'a>(rows: &'a [ShopDish], category: &str) -> Vec<&'a ShopDish> {
    let mut filtered: Vec<&ShopDish> = rows.iter().filter(|r| r.category == category).collect();
    filtered.sort_by(|a, b| collate::compare_ja(&a.shop_name, &b.shop_name));

    let mut seen: HashSet<&str> = HashSet::new();
    filtered
        .into_iter()
        .filter(|r| seen.insert(r.shop_name.as_str()))
        .collect()
}

/// Menu of one shop: sorted by the Japanese name, first row per dish kept
/// (so a duplicated dish keeps the first row's price).
pub fn dishes_for_shop(rows: &[ShopDish], category: &str, shop_name: &str) -> Vec<Dish> {
    let mut filtered: Vec<&ShopDish> = rows
        .iter()
        .filter(|r| r.category == category && r.shop_name == shop_name)
        .collect();
    filtered.sort_by(|a, b| collate::compare_ja(&a.dish_name_ja, &b.dish_name_ja));

    let mut seen: HashSet<String> = HashSet::new();
    filtered
        .into_iter()
        .filter(|r| seen.insert(dish_key(&r.dish_name_zh, &r.dish_name_ja)))
        .map(Dish::from_row)
        .collect()
}

/// Normalizes a user selection: quantity 0 means unselected and is
/// dropped; anything above the selector maximum is clamped down to it.
pub fn selected_items(items: &[OrderItem]) -> Vec<OrderItem> {
    items
        .iter()
        .filter(|i| i.count > 0)
        .map(|i| {
            let mut item = i.clone();
            item.count = item.count.min(MAX_COUNT);
            item
        })
        .collect()
}

pub fn line_total_twd(item: &OrderItem) -> f64 {
    item.price_nt * f64::from(item.count)
}

/// Sum over selected items only; quantity 0 never contributes.
pub fn total_twd(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .filter(|i| i.count > 0)
        .map(line_total_twd)
        .sum()
}

/// TWD→JPY conversion. Callers keep the rate optional so "no rate yet"
/// stays distinguishable from "converts to zero".
pub fn to_jpy(amount_twd: f64, rate: f64) -> i64 {
    (amount_twd * rate).round() as i64
}
