use serde::Serialize;

/// One entry of the fixed landing-screen category list. Catalog rows carry
/// the category as a free string; this list only drives the first screen.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryInfo {
    pub key: &'static str,
    pub emoji: &'static str,
}

pub const CATEGORIES: [CategoryInfo; 4] = [
    CategoryInfo { key: "レストラン", emoji: "🍚" },
    CategoryInfo { key: "屋台・夜市", emoji: "🍢" },
    CategoryInfo { key: "スイーツ・カフェ", emoji: "🍧" },
    CategoryInfo { key: "その他", emoji: "✨" },
];
