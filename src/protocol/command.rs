#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    CatalogCategories,
    CatalogShops,
    CatalogDishes,
    RateGet,
    OrderSave,
    OrderLoad,
    OrderSummary,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "catalog.categories" => Command::CatalogCategories,
            "catalog.shops" => Command::CatalogShops,
            "catalog.dishes" => Command::CatalogDishes,
            "rate.get" => Command::RateGet,
            "order.save" => Command::OrderSave,
            "order.load" => Command::OrderLoad,
            "order.summary" => Command::OrderSummary,
            _ => Command::Unknown,
        }
    }
}
