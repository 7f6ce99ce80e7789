use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::CoreError;

const ENDPOINT: &str = "https://open.er-api.com/v6/latest/TWD";

const TTL: Duration = Duration::from_secs(5 * 60);

const TIMEOUT_SECS: u64 = 15;

struct CachedRate {
    rate: f64,
    fetched_at: Instant,
}

/// Owns the TWD→JPY rate cache. A fetched rate is reused for the TTL
/// window, then replaced by exactly one new request.
pub struct RateService {
    ttl: Duration,
    cache: Option<CachedRate>,
}

impl RateService {
    pub fn new() -> Self {
        RateService::with_ttl(TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        RateService { ttl, cache: None }
    }

    pub fn get(&mut self) -> Result<f64, CoreError> {
        self.get_with(fetch_rate)
    }

    /// Same as `get`, with the network fetch injected.
    fn get_with<F>(&mut self, fetch: F) -> Result<f64, CoreError>
    where
        F: FnOnce() -> Result<f64, CoreError>,
    {
        if let Some(cached) = &self.cache {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(cached.rate);
            }
        }

        let rate = fetch()?;
        eprintln!("[rate] TWD->JPY = {rate}");

        self.cache = Some(CachedRate {
            rate,
            fetched_at: Instant::now(),
        });

        Ok(rate)
    }

    pub fn reset(&mut self) {
        self.cache = None;
    }
}

impl Default for RateService {
    fn default() -> Self {
        RateService::new()
    }
}

fn fetch_rate() -> Result<f64, CoreError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|e| CoreError::RateFetch {
            detail: e.to_string(),
        })?;

    let resp = client.get(ENDPOINT).send().map_err(|e| CoreError::RateFetch {
        detail: e.to_string(),
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(CoreError::RateFetch {
            detail: format!("HTTP {}", status.as_u16()),
        });
    }

    let text = resp.text().map_err(|e| CoreError::RateFetch {
        detail: e.to_string(),
    })?;

    parse_rate_body(&text)
}

/// Extracts rates.JPY from the endpoint's JSON body.
fn parse_rate_body(text: &str) -> Result<f64, CoreError> {
    let json: Value = serde_json::from_str(text).map_err(|_| CoreError::RateFormat {
        detail: "JSON を解析できません".to_string(),
    })?;

    let rate = json
        .get("rates")
        .and_then(|r| r.get("JPY"))
        .and_then(|r| r.as_f64());

    match rate {
        Some(r) if r.is_finite() && r > 0.0 => Ok(r),
        _ => Err(CoreError::RateFormat {
            detail: "rates.JPY が見つかりません".to_string(),
        }),
    }
}

#[cfg(test)]
impl RateService {
    pub(crate) fn prime(&mut self, rate: f64) {
        self.cache = Some(CachedRate {
            rate,
            fetched_at: Instant::now(),
        });
    }
}
