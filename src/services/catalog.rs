use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;

use crate::error::CoreError;
use crate::model::shop::ShopDish;
use crate::parsers::shops_csv;

const DEFAULT_SHEET_SHARE_URL: &str =
    "https://docs.google.com/spreadsheets/d/1X0oZ_Kpjgo9OQfjjUsz4WWMqXj9Uvgd4x7tVo40MtGo/edit?usp=sharing";

const SOURCE_URL_ENV: &str = "TABEWAN_SHOPS_CSV_URL";

const TIMEOUT_SECS: u64 = 15;

/// Owns the catalog cache. The first successful fetch lives for the rest
/// of the process; there is no refresh path besides `reset`.
pub struct CatalogService {
    source_url: String,
    cache: Option<Vec<ShopDish>>,
}

impl CatalogService {
    pub fn new(source_url: impl Into<String>) -> Self {
        CatalogService {
            source_url: source_url.into(),
            cache: None,
        }
    }

    /// Source URL from the environment, else the built-in published sheet.
    pub fn from_env() -> Self {
        let source_url = std::env::var(SOURCE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SHEET_SHARE_URL.to_string());

        CatalogService::new(source_url)
    }

    pub fn get(&mut self) -> Result<&[ShopDish], CoreError> {
        if self.cache.is_some() {
            return Ok(self.cache.as_deref().unwrap());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| CoreError::Fetch {
                reasons: e.to_string(),
            })?;

        self.get_with(|url| http_attempt(&client, url))
    }

    /// Same as `get`, with the per-URL attempt injected. The attempt
    /// returns the response body, or a short reason ("HTTP 404", transport
    /// error text) on failure.
    fn get_with<F>(&mut self, attempt: F) -> Result<&[ShopDish], CoreError>
    where
        F: FnMut(&str) -> Result<String, String>,
    {
        if self.cache.is_none() {
            let urls = csv_candidate_urls(&self.source_url);
            let body = fetch_first_ok(&urls, attempt)?;
            let rows = shops_csv::parse(&body)?;
            eprintln!("[catalog] loaded {} rows", rows.len());
            self.cache = Some(rows);
        }

        Ok(self.cache.as_deref().unwrap())
    }

    pub fn reset(&mut self) {
        self.cache = None;
    }
}

/// Resolves the configured share URL into the ordered CSV candidates:
/// the gviz tabular export first, then the direct CSV export. A URL that
/// is not a spreadsheet link is tried as-is.
pub fn csv_candidate_urls(source_url: &str) -> Vec<String> {
    let re = Regex::new(r"/spreadsheets/d/([^/]+)").unwrap();

    let id = match re.captures(source_url).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => return vec![source_url.to_string()],
    };

    vec![
        format!("https://docs.google.com/spreadsheets/d/{id}/gviz/tq?tqx=out:csv"),
        format!("https://docs.google.com/spreadsheets/d/{id}/export?format=csv"),
    ]
}

/// Tries each candidate in order and returns the first body. When every
/// candidate fails, the error carries one "url -> reason" line per attempt.
fn fetch_first_ok<F>(urls: &[String], mut attempt: F) -> Result<String, CoreError>
where
    F: FnMut(&str) -> Result<String, String>,
{
    let mut errors: Vec<String> = Vec::new();

    for url in urls {
        match attempt(url) {
            Ok(body) => return Ok(body),
            Err(reason) => {
                eprintln!("[catalog] {url} -> {reason}");
                errors.push(format!("{url} -> {reason}"));
            }
        }
    }

    Err(CoreError::Fetch {
        reasons: errors.join("\n"),
    })
}

fn http_attempt(client: &Client, url: &str) -> Result<String, String> {
    let resp = client.get(url).send().map_err(|e| e.to_string())?;

    let status = resp.status();
    if !status.is_success() {
        return Err(format!("HTTP {}", status.as_u16()));
    }

    resp.text().map_err(|e| e.to_string())
}

#[cfg(test)]
impl CatalogService {
    pub(crate) fn prime(&mut self, rows: Vec<ShopDish>) {
        self.cache = Some(rows);
    }
}
