use std::sync::Arc;

use serde::Deserialize;
use time::Date;

use crate::config::Settings;
use crate::data_source::{require_success, SourceError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{format_date, Candle, Symbol, UtcDateTime, ValidationError};

/// Client for the daily aggregates endpoint of the market-data provider.
#[derive(Clone)]
pub struct PolygonAggregates {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
    timeout_ms: u64,
}

impl PolygonAggregates {
    pub fn new(http_client: Arc<dyn HttpClient>, settings: &Settings) -> Self {
        Self {
            http_client,
            base_url: settings.polygon_base_url.trim_end_matches('/').to_owned(),
            api_key: settings.polygon_api_key.clone(),
            timeout_ms: settings.timeout_ms,
        }
    }

    /// `GET /v2/aggs/ticker/{symbol}/range/1/day/{from}/{to}?adjusted=true&apiKey={key}`
    pub fn daily_url(&self, symbol: &Symbol, from: Date, to: Date) -> String {
        format!(
            "{}/v2/aggs/ticker/{}/range/1/day/{}/{}?adjusted=true&apiKey={}",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            format_date(from),
            format_date(to),
            urlencoding::encode(&self.api_key),
        )
    }

    /// Fetch the daily candles between `from` and `to`, inclusive.
    ///
    /// A payload without `results` is malformed; an empty `results` list is a
    /// window with no trading days.
    pub async fn daily(
        &self,
        symbol: &Symbol,
        from: Date,
        to: Date,
    ) -> Result<Vec<Candle>, SourceError> {
        let request = HttpRequest::get(self.daily_url(symbol, from, to))
            .with_timeout_ms(self.timeout_ms);
        let response = require_success(self.http_client.execute(request).await?)?;
        parse_aggregates(&response.body)
    }
}

#[derive(Debug, Deserialize)]
struct AggregatesResponse {
    #[serde(default)]
    results: Option<Vec<AggregateBar>>,
}

#[derive(Debug, Deserialize)]
struct AggregateBar {
    o: f64,
    c: f64,
    t: i64,
}

fn parse_aggregates(body: &str) -> Result<Vec<Candle>, SourceError> {
    let payload: AggregatesResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse aggregates: {e}")))?;

    let bars = payload
        .results
        .ok_or_else(|| SourceError::malformed("aggregates response has no results"))?;

    bars.into_iter()
        .map(|bar| {
            let timestamp = UtcDateTime::from_unix_millis(bar.t)?;
            Candle::new(bar.o, bar.c, timestamp)
        })
        .collect::<Result<Vec<_>, ValidationError>>()
        .map_err(|e| SourceError::malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::{HttpError, HttpResponse};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use time::macros::date;

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, HttpError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn answering(response: Result<HttpResponse, HttpError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }
    }

    fn settings() -> Settings {
        Settings {
            polygon_api_key: String::from("key-123"),
            polygon_base_url: String::from("https://md.test/"),
            timeout_ms: 1_500,
            ..Settings::default()
        }
    }

    #[test]
    fn builds_daily_aggregate_url() {
        let client = PolygonAggregates::new(
            Arc::new(RecordingHttpClient::answering(Ok(HttpResponse::ok_json("{}")))),
            &settings(),
        );
        let symbol = Symbol::parse("aapl").expect("valid");

        assert_eq!(
            client.daily_url(&symbol, date!(2024 - 03 - 01), date!(2024 - 03 - 08)),
            "https://md.test/v2/aggs/ticker/AAPL/range/1/day/2024-03-01/2024-03-08?adjusted=true&apiKey=key-123"
        );
    }

    #[tokio::test]
    async fn decodes_results_into_candles() {
        let http = Arc::new(RecordingHttpClient::answering(Ok(HttpResponse::ok_json(
            r#"{"ticker":"AAPL","status":"OK","results":[{"o":100.0,"c":105.0,"t":1704153600000,"v":10}]}"#,
        ))));
        let client = PolygonAggregates::new(http.clone(), &settings());
        let day = date!(2024 - 01 - 02);

        let candles = client
            .daily(&Symbol::parse("AAPL").expect("valid"), day, day)
            .await
            .expect("decodes");

        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].open, 100.0);
        assert_eq!(candles[0].close, 105.0);
        assert_eq!(http.recorded_requests()[0].timeout_ms, 1_500);
    }

    #[tokio::test]
    async fn missing_results_is_malformed() {
        let client = PolygonAggregates::new(
            Arc::new(RecordingHttpClient::answering(Ok(HttpResponse::ok_json(
                r#"{"status":"OK","resultsCount":0}"#,
            )))),
            &settings(),
        );
        let day = date!(2024 - 01 - 06);

        let err = client
            .daily(&Symbol::parse("AAPL").expect("valid"), day, day)
            .await
            .expect_err("no results");
        assert_eq!(err.kind(), SourceErrorKind::Malformed);
    }

    #[tokio::test]
    async fn empty_results_is_an_empty_window() {
        let client = PolygonAggregates::new(
            Arc::new(RecordingHttpClient::answering(Ok(HttpResponse::ok_json(
                r#"{"status":"OK","resultsCount":0,"results":[]}"#,
            )))),
            &settings(),
        );
        let day = date!(2024 - 01 - 06);

        let candles = client
            .daily(&Symbol::parse("AAPL").expect("valid"), day, day)
            .await
            .expect("empty window is not an error");
        assert!(candles.is_empty());
    }

    #[tokio::test]
    async fn bar_without_close_is_malformed() {
        let client = PolygonAggregates::new(
            Arc::new(RecordingHttpClient::answering(Ok(HttpResponse::ok_json(
                r#"{"results":[{"o":1.0,"t":0}]}"#,
            )))),
            &settings(),
        );
        let day = date!(2024 - 01 - 02);

        let err = client
            .daily(&Symbol::parse("AAPL").expect("valid"), day, day)
            .await
            .expect_err("missing c");
        assert_eq!(err.kind(), SourceErrorKind::Malformed);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let client = PolygonAggregates::new(
            Arc::new(RecordingHttpClient::answering(Ok(HttpResponse::new(429, "")))),
            &settings(),
        );
        let day = date!(2024 - 01 - 02);

        let err = client
            .daily(&Symbol::parse("AAPL").expect("valid"), day, day)
            .await
            .expect_err("rate limited");
        assert_eq!(err.kind(), SourceErrorKind::Status);
    }
}
