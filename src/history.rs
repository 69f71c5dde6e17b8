use crate::config::{
    DEFAULT_LEAGUE, DEFAULT_LOG_COUNT, DEFAULT_REFERENCE_CURRENCY, HISTORY_FRESHNESS,
};
use anyhow::{Context, Result};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLog {
    pub price: f64,
    pub time: String,
    #[serde(default)]
    pub quantity: u64,
}

/// Price history as returned by the market API. Both the snake_case and the
/// camelCase field spellings are accepted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(rename(deserialize = "price_history"), alias = "priceLogs", default)]
    pub price_logs: Vec<PriceLog>,
    #[serde(rename(deserialize = "has_more"), alias = "hasMore", default)]
    pub has_more: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub item_id: u32,
    pub league: String,
    pub log_count: u32,
    pub reference_currency: String,
}

impl HistoryRequest {
    pub fn new(item_id: u32) -> Self {
        Self {
            item_id,
            league: DEFAULT_LEAGUE.to_string(),
            log_count: DEFAULT_LOG_COUNT,
            reference_currency: DEFAULT_REFERENCE_CURRENCY.to_string(),
        }
    }

    pub fn league(mut self, league: &str) -> Self {
        self.league = league.to_string();
        self
    }

    pub fn log_count(mut self, log_count: u32) -> Self {
        self.log_count = log_count;
        self
    }

    pub fn reference_currency(mut self, currency: &str) -> Self {
        self.reference_currency = currency.to_string();
        self
    }
}

/// Anything that can produce a price history for an item, typically an HTTP
/// client for the market API.
pub trait HistorySource: Send + Sync {
    fn fetch_history(&self, request: &HistoryRequest) -> Result<HistoryResponse>;
}

struct CachedHistory {
    response: HistoryResponse,
    fetched_at: Instant,
}

impl CachedHistory {
    fn is_fresh(&self, freshness: Duration) -> bool {
        self.fetched_at.elapsed() <= freshness
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub response: HistoryResponse,
    pub cached: bool,
}

/// Time-boxed cache in front of a [`HistorySource`], keyed by `(item id, league)`.
pub struct HistoryCache<S> {
    source: S,
    entries: DashMap<(u32, String), CachedHistory>,
    freshness: Duration,
}

impl<S: HistorySource> HistoryCache<S> {
    pub fn new(source: S) -> Self {
        Self::with_freshness(source, HISTORY_FRESHNESS)
    }

    pub fn with_freshness(source: S, freshness: Duration) -> Self {
        Self {
            source,
            entries: DashMap::new(),
            freshness,
        }
    }

    /// Serves a fresh cached history or fetches and stores a new one.
    /// Failed fetches are not cached.
    pub fn get(&self, request: &HistoryRequest) -> Result<Fetched> {
        let key = (request.item_id, request.league.clone());

        let hit = self.entries.get(&key).and_then(|entry| {
            entry
                .is_fresh(self.freshness)
                .then(|| entry.response.clone())
        });
        if let Some(response) = hit {
            debug!(item_id = request.item_id, league = %request.league, "Using cached history");
            return Ok(Fetched {
                response,
                cached: true,
            });
        }

        let freshness = self.freshness;
        if self
            .entries
            .remove_if(&key, |_, entry| !entry.is_fresh(freshness))
            .is_some()
        {
            debug!(item_id = request.item_id, league = %request.league, "Evicted stale history");
        }

        info!(item_id = request.item_id, league = %request.league, "Fetching history");
        let response = self.source.fetch_history(request).with_context(|| {
            format!(
                "Failed to fetch history for item {} in {}",
                request.item_id, request.league
            )
        })?;

        self.entries.insert(
            key,
            CachedHistory {
                response: response.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(Fetched {
            response,
            cached: false,
        })
    }

    /// Drops every entry older than the freshness window.
    pub fn purge_expired(&self) {
        let freshness = self.freshness;
        self.entries.retain(|_, entry| entry.is_fresh(freshness));
    }

    pub fn clear(&self) {
        self.entries.clear();
        info!("History cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
