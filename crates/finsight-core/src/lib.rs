//! Core library for finsight.
//!
//! This crate contains:
//! - Domain models and validation (symbols, quotes, candles, chat turns)
//! - The HTTP seam and the market-data / text-generation adapters
//! - Quote fetching with per-symbol fallback
//! - The advisor responder, forecasting and static insight content
//! - View state machines driving the dashboard, forecast and chat panels
//! - The response envelope used by machine-readable output

pub mod adapters;
pub mod advisor;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod forecast;
pub mod http_client;
pub mod insights;
pub mod quotes;
pub mod views;

pub use adapters::{PolygonAggregates, TextGeneration};
pub use advisor::{Advisor, CannedAdvisor, InferenceAdvisor, APOLOGY};
pub use config::Settings;
pub use data_source::{SourceError, SourceErrorKind};
pub use domain::{format_date, today_utc, Candle, ChatTurn, Quote, QuoteOrigin, Symbol, UtcDateTime};
pub use envelope::{Envelope, EnvelopeMeta};
pub use error::ValidationError;
pub use fallback::FallbackQuotes;
pub use forecast::{
    DataMode, Forecast, ForecastModel, ForecastOutcome, ForecastPoint, ForecastService,
    ForecastSummary, ModelAccuracy,
};
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, OfflineHttpClient,
    ReqwestHttpClient,
};
pub use insights::{TrendCard, TrendKind};
pub use quotes::{QuoteBatch, QuoteFetcher};
pub use views::{Notice, NoticeLevel};
