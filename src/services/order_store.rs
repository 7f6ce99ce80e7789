use std::collections::HashMap;

use crate::error::CoreError;
use crate::model::order::OrderSnapshot;

/// Session-scoped snapshot store. One entry per category+shop pair,
/// overwritten on every save, gone when the process exits.
pub struct OrderStore {
    entries: HashMap<String, OrderSnapshot>,
}

pub fn storage_key(category: &str, shop_name: &str) -> String {
    format!("tabewan:order:{category}:{shop_name}")
}

impl OrderStore {
    pub fn new() -> Self {
        OrderStore {
            entries: HashMap::new(),
        }
    }

    /// Stores the snapshot under its category+shop key and returns the key.
    pub fn save(&mut self, snapshot: OrderSnapshot) -> String {
        let key = storage_key(&snapshot.category, &snapshot.shop_name);
        self.entries.insert(key.clone(), snapshot);
        key
    }

    pub fn load(&self, category: &str, shop_name: &str) -> Result<&OrderSnapshot, CoreError> {
        self.entries
            .get(&storage_key(category, shop_name))
            .ok_or(CoreError::MissingOrder)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        OrderStore::new()
    }
}
