//! Quote Fetcher: live quotes with per-symbol fallback.
//!
//! For every requested symbol two daily-aggregate requests are issued
//! concurrently, a single-day "today" window and a trailing seven-day window.
//! Symbols are fanned out onto a [`JoinSet`], one task each, so a failure in
//! one symbol never touches another. Whatever a task reports (transport error,
//! non-2xx status, malformed payload, or the task itself dying) resolves to a
//! fallback quote for that symbol. Request text that does not parse as a
//! ticker skips the network and is answered with a synthetic quote. The caller
//! always receives exactly one quote per requested symbol, in request order.

use std::sync::Arc;

use serde::Serialize;
use time::{Date, Duration};
use tokio::task::JoinSet;

use crate::adapters::PolygonAggregates;
use crate::config::Settings;
use crate::data_source::SourceError;
use crate::fallback::FallbackQuotes;
use crate::http_client::HttpClient;
use crate::{today_utc, Quote, Symbol};

/// Length of the trailing window behind the sparkline.
pub const TRAILING_DAYS: i64 = 7;

/// Quotes plus a human-readable note for every substituted symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteBatch {
    pub quotes: Vec<Quote>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Fetches dashboard quotes, substituting fallback data symbol by symbol.
pub struct QuoteFetcher {
    aggregates: PolygonAggregates,
    fallback: FallbackQuotes,
}

impl QuoteFetcher {
    pub fn new(http_client: Arc<dyn HttpClient>, settings: &Settings) -> Self {
        Self::with_fallback(http_client, settings, FallbackQuotes::new())
    }

    pub fn with_fallback(
        http_client: Arc<dyn HttpClient>,
        settings: &Settings,
        fallback: FallbackQuotes,
    ) -> Self {
        Self {
            aggregates: PolygonAggregates::new(http_client, settings),
            fallback,
        }
    }

    /// One quote per requested ticker, same order, never an error.
    pub async fn fetch<S: AsRef<str>>(&self, requested: &[S]) -> Vec<Quote> {
        self.fetch_as_of(requested, today_utc()).await.quotes
    }

    /// Same as [`fetch`](Self::fetch) with the request windows anchored on `today`.
    ///
    /// Text that is not a valid ticker is never sent upstream; its slot gets a
    /// synthetic quote labelled with the trimmed request text.
    pub async fn fetch_as_of<S: AsRef<str>>(&self, requested: &[S], today: Date) -> QuoteBatch {
        let parsed = requested
            .iter()
            .map(|raw| Symbol::parse(raw.as_ref()))
            .collect::<Vec<_>>();

        let mut tasks = JoinSet::new();
        for (index, symbol) in parsed.iter().enumerate() {
            let Ok(symbol) = symbol else {
                continue;
            };
            let aggregates = self.aggregates.clone();
            let symbol = symbol.clone();
            tasks.spawn(async move { (index, resolve_live(&aggregates, symbol, today).await) });
        }

        let mut slots: Vec<Option<Result<Quote, SourceError>>> =
            (0..requested.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(error) => log::error!("quote task did not complete: {error}"),
            }
        }

        let mut warnings = Vec::new();
        let quotes = requested
            .iter()
            .zip(parsed)
            .zip(slots)
            .map(|((raw, symbol), slot)| match (symbol, slot) {
                (Err(error), _) => {
                    let label = raw.as_ref().trim();
                    log::warn!("falling back for '{label}': {error}");
                    warnings.push(format!("{label}: not a valid ticker ({error}); serving fallback"));
                    self.fallback.synthetic_for(label)
                }
                (Ok(_), Some(Ok(quote))) => quote,
                (Ok(symbol), Some(Err(error))) => {
                    log::warn!("falling back for {symbol}: {error}");
                    warnings.push(format!("{symbol}: live data unavailable ({error}); serving fallback"));
                    self.fallback.quote_for(&symbol)
                }
                (Ok(symbol), None) => {
                    log::warn!("falling back for {symbol}: fetch task aborted");
                    warnings.push(format!("{symbol}: fetch aborted; serving fallback"));
                    self.fallback.quote_for(&symbol)
                }
            })
            .collect();

        QuoteBatch { quotes, warnings }
    }
}

async fn resolve_live(
    aggregates: &PolygonAggregates,
    symbol: Symbol,
    today: Date,
) -> Result<Quote, SourceError> {
    let from = today.saturating_sub(Duration::days(TRAILING_DAYS));
    let (current, trailing) = tokio::join!(
        aggregates.daily(&symbol, today, today),
        aggregates.daily(&symbol, from, today),
    );
    let current = current?;
    let trailing = trailing?;

    let candle = current
        .first()
        .ok_or_else(|| SourceError::malformed("today's window has no candle"))?;

    Quote::from_candles(symbol, candle, &trailing)
        .map_err(|e| SourceError::malformed(e.to_string()))
}
