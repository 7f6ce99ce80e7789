use thiserror::Error;

/// Every failure the core reports to the UI. Display strings are the
/// user-facing Japanese messages; the protocol layer forwards them as-is.
#[derive(Debug, Error)]
pub enum CoreError {
    /// All candidate CSV URLs failed; carries one "url -> reason" line each.
    #[error("CSVの取得に失敗しました。\n{reasons}")]
    Fetch { reasons: String },

    /// Structurally malformed CSV (bad quoting, ragged records).
    #[error("CSVの解析に失敗しました。\n{detail}")]
    Parse { detail: String },

    /// Rate endpoint unreachable or non-success status.
    #[error("為替レートの取得に失敗しました ({detail})")]
    RateFetch { detail: String },

    /// Rate response body did not contain a usable rates.JPY number.
    #[error("為替レートの形式が不正です（{detail}）")]
    RateFormat { detail: String },

    /// No saved order snapshot for the requested category/shop.
    #[error("注文データが見つかりませんでした。もう一度メニューを選択してください。")]
    MissingOrder,

    /// Blank or malformed navigation parameters.
    #[error("URLが不正です。")]
    InvalidRoute,
}
