use chrono::Utc;
use serde_json::{json, Value};

use crate::error::CoreError;
use crate::model::category::CATEGORIES;
use crate::model::order::{OrderItem, OrderSnapshot};
use crate::services::{phrase, view};
use crate::state::CoreState;

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn get_str<'a>(payload: &'a Value, key: &str) -> &'a str {
    payload.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn parse_items_from_payload(payload: &Value) -> Result<Vec<OrderItem>, String> {
    let arr = payload
        .get("items")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "payload.items must be an array".to_string())?;

    let mut items: Vec<OrderItem> = Vec::with_capacity(arr.len());

    for (i, v) in arr.iter().cloned().enumerate() {
        match serde_json::from_value::<OrderItem>(v) {
            Ok(item) => items.push(item),
            Err(e) => return Err(format!("invalid item at index {}: {}", i, e)),
        }
    }

    Ok(items)
}

pub fn handle(state: &mut CoreState, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd = Command::from(get_cmd(&req));
    let payload = get_payload(&req);

    match cmd {
        Command::Ping => ok(id, json!({ "message": "tabewan-core alive" })),

        Command::CatalogCategories => ok(id, json!({ "categories": CATEGORIES })),

        Command::CatalogShops => {
            let category = get_str(payload, "category");
            if category.is_empty() {
                return err(id, "payload.category is required");
            }

            let rows = match state.catalog.get() {
                Ok(rows) => rows,
                Err(e) => return err(id, e.to_string()),
            };

            let shops: Vec<&str> = view::shops_in_category(rows, category)
                .iter()
                .map(|r| r.shop_name.as_str())
                .collect();

            ok(id, json!({ "shops": shops }))
        }

        Command::CatalogDishes => {
            let category = get_str(payload, "category");
            let shop_name = get_str(payload, "shop_name");
            if category.is_empty() {
                return err(id, "payload.category is required");
            }
            if shop_name.is_empty() {
                return err(id, "payload.shop_name is required");
            }

            let rows = match state.catalog.get() {
                Ok(rows) => rows,
                Err(e) => return err(id, e.to_string()),
            };

            let dishes = view::dishes_for_shop(rows, category, shop_name);

            ok(id, json!({ "dishes": dishes }))
        }

        Command::RateGet => match state.rate.get() {
            Ok(rate) => ok(id, json!({ "rate": rate })),
            Err(e) => err(id, e.to_string()),
        },

        Command::OrderSave => {
            let category = get_str(payload, "category").to_string();
            let shop_name = get_str(payload, "shop_name").to_string();
            if category.is_empty() || shop_name.is_empty() {
                return err(id, CoreError::InvalidRoute.to_string());
            }

            let items = match parse_items_from_payload(payload) {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let saved_at = Utc::now().timestamp_millis();
            let snapshot = OrderSnapshot {
                category,
                shop_name,
                items: view::selected_items(&items),
                saved_at,
            };

            let key = state.orders.save(snapshot);
            ok(id, json!({ "key": key, "saved_at": saved_at }))
        }

        Command::OrderLoad => {
            let category = get_str(payload, "category");
            let shop_name = get_str(payload, "shop_name");
            if category.is_empty() || shop_name.is_empty() {
                return err(id, CoreError::InvalidRoute.to_string());
            }

            match state.orders.load(category, shop_name) {
                Ok(order) => ok(id, json!({ "order": order })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::OrderSummary => {
            let category = get_str(payload, "category");
            let shop_name = get_str(payload, "shop_name");
            if category.is_empty() || shop_name.is_empty() {
                return err(id, CoreError::InvalidRoute.to_string());
            }

            let order = match state.orders.load(category, shop_name) {
                Ok(order) => order.clone(),
                Err(e) => return err(id, e.to_string()),
            };

            summary(state, id, order)
        }

        Command::Unknown => err(id, "unknown command"),
    }
}

/// Everything the confirmation screen shows: totals in both currencies,
/// per-item phrases with pronunciation aids, and the speech descriptors.
/// A rate failure is reported inline and never fails the summary.
fn summary(state: &mut CoreState, id: Value, order: OrderSnapshot) -> String {
    let selected: Vec<OrderItem> = order.items.iter().filter(|i| i.count > 0).cloned().collect();

    let total_twd = view::total_twd(&selected);

    let (rate, rate_error) = match state.rate.get() {
        Ok(rate) => (Some(rate), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let total_jpy = rate.map(|r| view::to_jpy(total_twd, r));

    let items: Vec<Value> = selected
        .iter()
        .map(|item| {
            let line_total_twd = view::line_total_twd(item);
            let spoken = phrase::order_phrase(item);
            let utterance = phrase::utterance(spoken.zh.clone());

            json!({
                "item": item,
                "line_total_twd": line_total_twd,
                "line_total_jpy": rate.map(|r| view::to_jpy(line_total_twd, r)),
                "phrase": spoken,
                "japanese": phrase::japanese_gloss(item),
                "utterance": utterance,
            })
        })
        .collect();

    let speak_all = phrase::speak_all(&selected);

    ok(
        id,
        json!({
            "order": order,
            "items": items,
            "total_twd": total_twd,
            "total_jpy": total_jpy,
            "rate_error": rate_error,
            "speak_all": speak_all,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::shop::ShopDish;
    use crate::services::catalog::CatalogService;
    use crate::services::order_store::OrderStore;
    use crate::services::rate::RateService;

    fn row(category: &str, shop: &str, zh: &str, ja: &str, price: f64) -> ShopDish {
        ShopDish {
            category: category.to_string(),
            shop_name: shop.to_string(),
            dish_name_zh: zh.to_string(),
            dish_name_ja: ja.to_string(),
            kana: "ルーローファン".to_string(),
            pinyin: "lǔ ròu fàn".to_string(),
            price_nt: price,
        }
    }

    fn test_state() -> CoreState {
        let mut catalog = CatalogService::new("https://example.com/menu.csv");
        catalog.prime(vec![
            row("屋台・夜市", "寧夏夜市", "蚵仔煎", "牡蠣オムレツ", 80.0),
            row("屋台・夜市", "阿宗麵線", "滷肉飯", "ルーロー飯", 50.0),
            row("屋台・夜市", "阿宗麵線", "滷肉飯", "ルーロー飯", 75.0),
        ]);

        let mut rate = RateService::new();
        rate.prime(3.5);

        CoreState {
            catalog,
            rate,
            orders: OrderStore::new(),
        }
    }

    fn request(cmd: &str, payload: Value) -> String {
        json!({ "id": 1, "cmd": cmd, "payload": payload }).to_string()
    }

    fn response(state: &mut CoreState, cmd: &str, payload: Value) -> Value {
        serde_json::from_str(&handle(state, &request(cmd, payload))).unwrap()
    }

    #[test]
    fn ping_answers_alive() {
        let mut state = test_state();

        let resp = response(&mut state, "ping", json!({}));

        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["message"], "tabewan-core alive");
    }

    #[test]
    fn invalid_json_is_reported() {
        let mut state = test_state();

        let resp: Value = serde_json::from_str(&handle(&mut state, "not json")).unwrap();

        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "invalid json");
    }

    #[test]
    fn unknown_command_is_an_error() {
        let mut state = test_state();

        let resp = response(&mut state, "nope", json!({}));

        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "unknown command");
    }

    #[test]
    fn categories_lists_the_fixed_set() {
        let mut state = test_state();

        let resp = response(&mut state, "catalog.categories", json!({}));

        let categories = resp["payload"]["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 4);
        assert_eq!(categories[0]["key"], "レストラン");
    }

    #[test]
    fn shops_are_deduplicated_and_sorted() {
        let mut state = test_state();

        let resp = response(&mut state, "catalog.shops", json!({ "category": "屋台・夜市" }));

        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["shops"], json!(["寧夏夜市", "阿宗麵線"]));
    }

    #[test]
    fn shops_require_a_category() {
        let mut state = test_state();

        let resp = response(&mut state, "catalog.shops", json!({}));

        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "payload.category is required");
    }

    #[test]
    fn dishes_keep_the_first_duplicate() {
        let mut state = test_state();

        let resp = response(
            &mut state,
            "catalog.dishes",
            json!({ "category": "屋台・夜市", "shop_name": "阿宗麵線" }),
        );

        let dishes = resp["payload"]["dishes"].as_array().unwrap();
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0]["price_nt"], 50.0);
    }

    #[test]
    fn rate_get_returns_the_cached_rate() {
        let mut state = test_state();

        let resp = response(&mut state, "rate.get", json!({}));

        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["rate"], 3.5);
    }

    #[test]
    fn order_save_then_load_round_trips() {
        let mut state = test_state();

        let items = json!([
            {
                "dish_key": "滷肉飯||ルーロー飯",
                "dish_name_zh": "滷肉飯",
                "dish_name_ja": "ルーロー飯",
                "kana": "ルーローファン",
                "pinyin": "lǔ ròu fàn",
                "price_nt": 50.0,
                "count": 2
            },
            {
                "dish_key": "蚵仔煎||牡蠣オムレツ",
                "dish_name_zh": "蚵仔煎",
                "dish_name_ja": "牡蠣オムレツ",
                "kana": "オアジェン",
                "pinyin": "ô á chian",
                "price_nt": 80.0,
                "count": 0
            }
        ]);

        let saved = response(
            &mut state,
            "order.save",
            json!({ "category": "屋台・夜市", "shop_name": "阿宗麵線", "items": items }),
        );
        assert_eq!(saved["status"], "ok");
        assert_eq!(saved["payload"]["key"], "tabewan:order:屋台・夜市:阿宗麵線");

        let loaded = response(
            &mut state,
            "order.load",
            json!({ "category": "屋台・夜市", "shop_name": "阿宗麵線" }),
        );

        // The zero-count item was dropped at save time.
        let saved_items = loaded["payload"]["order"]["items"].as_array().unwrap();
        assert_eq!(saved_items.len(), 1);
        assert_eq!(saved_items[0]["count"], 2);
    }

    #[test]
    fn order_save_requires_route_params() {
        let mut state = test_state();

        let resp = response(
            &mut state,
            "order.save",
            json!({ "category": "", "shop_name": "阿宗麵線", "items": [] }),
        );

        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "URLが不正です。");
    }

    #[test]
    fn order_save_rejects_malformed_items() {
        let mut state = test_state();

        let resp = response(
            &mut state,
            "order.save",
            json!({ "category": "屋台・夜市", "shop_name": "阿宗麵線", "items": [{ "count": 1 }] }),
        );

        assert_eq!(resp["status"], "error");
        assert!(resp["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid item at index 0"));
    }

    #[test]
    fn missing_order_is_reported() {
        let mut state = test_state();

        let resp = response(
            &mut state,
            "order.load",
            json!({ "category": "屋台・夜市", "shop_name": "どこにもない店" }),
        );

        assert_eq!(resp["status"], "error");
        assert_eq!(
            resp["message"],
            "注文データが見つかりませんでした。もう一度メニューを選択してください。"
        );
    }

    #[test]
    fn summary_totals_phrases_and_utterances() {
        let mut state = test_state();

        let items = json!([
            {
                "dish_key": "滷肉飯||ルーロー飯",
                "dish_name_zh": "滷肉飯",
                "dish_name_ja": "ルーロー飯",
                "kana": "ルーローファン",
                "pinyin": "lǔ ròu fàn",
                "price_nt": 50.0,
                "count": 2
            }
        ]);

        response(
            &mut state,
            "order.save",
            json!({ "category": "屋台・夜市", "shop_name": "阿宗麵線", "items": items }),
        );

        let resp = response(
            &mut state,
            "order.summary",
            json!({ "category": "屋台・夜市", "shop_name": "阿宗麵線" }),
        );

        assert_eq!(resp["status"], "ok");
        let payload = &resp["payload"];

        assert_eq!(payload["total_twd"], 100.0);
        assert_eq!(payload["total_jpy"], 350);
        assert_eq!(payload["rate_error"], Value::Null);

        let first = &payload["items"][0];
        assert_eq!(first["line_total_twd"], 100.0);
        assert_eq!(first["line_total_jpy"], 350);
        assert_eq!(first["phrase"]["zh"], "我要兩份滷肉飯");
        assert_eq!(first["japanese"], "ルーロー飯を2人前ください");
        assert_eq!(first["utterance"]["lang"], "zh-TW");

        assert_eq!(payload["speak_all"]["text"], "我要兩份滷肉飯");
    }
}
