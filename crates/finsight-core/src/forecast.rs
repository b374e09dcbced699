//! Price-prediction series for the chart view.
//!
//! There is no trained model behind these numbers. A live series projects the
//! recent average daily change forward with a little noise; a simulated series
//! is a random walk from a per-ticker base price. Two "models" are reported:
//! LSTM follows 0.8 of the trend, Bi-LSTM follows 1.2 of it with a slight
//! upward bias in its noise.

use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::adapters::PolygonAggregates;
use crate::config::Settings;
use crate::data_source::SourceError;
use crate::http_client::HttpClient;
use crate::{format_date, today_utc, Candle, Symbol, ValidationError};

pub const HISTORY_DAYS: i64 = 30;
pub const HORIZON_DAYS: i64 = 7;

const TREND_WINDOW: usize = 5;
const PROJECTION_VOLATILITY: f64 = 0.01;

/// Where a forecast's history came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataMode {
    Live,
    Simulated,
}

impl DataMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Live => Self::Simulated,
            Self::Simulated => Self::Live,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "API",
            Self::Simulated => "simulated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastModel {
    Lstm,
    Bilstm,
}

impl ForecastModel {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "lstm" => Ok(Self::Lstm),
            "bilstm" | "bi-lstm" => Ok(Self::Bilstm),
            _ => Err(ValidationError::InvalidModel {
                value: input.to_owned(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lstm => "LSTM",
            Self::Bilstm => "BILSTM",
        }
    }
}

impl Display for ForecastModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reported accuracy per model, shown next to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelAccuracy {
    pub lstm: f64,
    pub bilstm: f64,
}

impl Default for ModelAccuracy {
    fn default() -> Self {
        Self {
            lstm: 0.87,
            bilstm: 0.92,
        }
    }
}

impl ModelAccuracy {
    pub const fn for_model(self, model: ForecastModel) -> f64 {
        match model {
            ForecastModel::Lstm => self.lstm,
            ForecastModel::Bilstm => self.bilstm,
        }
    }
}

/// One chart point. History points carry `actual`, future points carry predictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: String,
    pub actual: Option<f64>,
    /// Set only on the first future day, for the headline figure.
    pub predicted: Option<f64>,
    pub predicted_lstm: Option<f64>,
    pub predicted_bilstm: Option<f64>,
}

impl ForecastPoint {
    fn history(date: Date, actual: f64) -> Self {
        Self {
            date: format_date(date),
            actual: Some(actual),
            predicted: None,
            predicted_lstm: None,
            predicted_bilstm: None,
        }
    }

    fn anchor(date: Date, price: f64) -> Self {
        Self {
            date: format_date(date),
            actual: Some(price),
            predicted: None,
            predicted_lstm: Some(price),
            predicted_bilstm: Some(price),
        }
    }

    fn future(date: Date, day: i64, lstm: f64, bilstm: f64) -> Self {
        Self {
            date: format_date(date),
            actual: None,
            predicted: (day == 1).then_some(lstm),
            predicted_lstm: Some(lstm),
            predicted_bilstm: Some(bilstm),
        }
    }

    pub const fn prediction(&self, model: ForecastModel) -> Option<f64> {
        match model {
            ForecastModel::Lstm => self.predicted_lstm,
            ForecastModel::Bilstm => self.predicted_bilstm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub symbol: Symbol,
    pub data_source: DataMode,
    pub accuracy: ModelAccuracy,
    pub points: Vec<ForecastPoint>,
}

/// Headline figures under the chart for the selected model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub current_price: Option<f64>,
    pub predicted_price: Option<f64>,
    pub model: ForecastModel,
    pub accuracy: f64,
}

impl Forecast {
    pub fn summary(&self, model: ForecastModel) -> ForecastSummary {
        ForecastSummary {
            current_price: self.points.iter().rev().find_map(|point| point.actual),
            predicted_price: self.points.last().and_then(|point| point.prediction(model)),
            model,
            accuracy: self.accuracy.for_model(model),
        }
    }
}

/// A forecast and, when the live request degraded, why.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOutcome {
    pub forecast: Forecast,
    pub warning: Option<String>,
}

impl ForecastOutcome {
    pub const fn degraded(&self) -> bool {
        self.warning.is_some()
    }
}

/// Project `history` forward [`HORIZON_DAYS`] past `today`.
///
/// Returns an empty series for empty history.
pub fn project(history: &[Candle], today: Date, rng: &mut fastrand::Rng) -> Vec<ForecastPoint> {
    let Some(last) = history.last() else {
        return Vec::new();
    };
    let last_price = last.close;

    let mut points = history
        .iter()
        .map(|candle| ForecastPoint::history(candle.timestamp.date(), candle.close))
        .collect::<Vec<_>>();
    points.push(ForecastPoint::anchor(today, last_price));

    let window = &history[history.len().saturating_sub(TREND_WINDOW)..];
    let trend = window
        .windows(2)
        .map(|pair| pair[1].close - pair[0].close)
        .sum::<f64>()
        / (TREND_WINDOW - 1) as f64;

    let mut lstm = last_price;
    let mut bilstm = last_price;
    for day in 1..=HORIZON_DAYS {
        lstm += trend * 0.8;
        bilstm += trend * 1.2;
        lstm += (rng.f64() - 0.5) * PROJECTION_VOLATILITY * lstm;
        bilstm += (rng.f64() - 0.48) * PROJECTION_VOLATILITY * bilstm;

        points.push(ForecastPoint::future(
            today.saturating_add(Duration::days(day)),
            day,
            lstm,
            bilstm,
        ));
    }

    points
}

fn simulated_base(symbol: &Symbol) -> (f64, f64) {
    let base = match symbol.as_str() {
        "AAPL" => 170.0,
        "MSFT" => 400.0,
        "GOOGL" => 165.0,
        "AMZN" => 180.0,
        "TSLA" => 250.0,
        _ => 100.0,
    };
    let volatility = if symbol.as_str() == "TSLA" { 0.03 } else { 0.01 };
    (base, volatility)
}

/// Random-walk series of `days` history points, today, and the horizon.
pub fn simulate(symbol: &Symbol, days: i64, today: Date, rng: &mut fastrand::Rng) -> Vec<ForecastPoint> {
    let (base, volatility) = simulated_base(symbol);
    let mut points = Vec::with_capacity(days.max(0) as usize + 1 + HORIZON_DAYS as usize);

    let mut price = base;
    for index in 0..days {
        price += (rng.f64() - 0.48) * volatility * price;
        points.push(ForecastPoint::history(
            today.saturating_sub(Duration::days(days - index)),
            price,
        ));
    }
    points.push(ForecastPoint::anchor(today, price));

    let mut lstm = price;
    let mut bilstm = price;
    for day in 1..=HORIZON_DAYS {
        lstm += (rng.f64() - 0.4) * volatility * lstm;
        bilstm += (rng.f64() - 0.42) * volatility * bilstm;
        points.push(ForecastPoint::future(
            today.saturating_add(Duration::days(day)),
            day,
            lstm,
            bilstm,
        ));
    }

    points
}

pub struct ForecastService {
    aggregates: PolygonAggregates,
    accuracy: ModelAccuracy,
    rng: Mutex<fastrand::Rng>,
}

impl ForecastService {
    pub fn new(http_client: Arc<dyn HttpClient>, settings: &Settings) -> Self {
        Self::with_rng(http_client, settings, fastrand::Rng::new())
    }

    pub fn with_rng(http_client: Arc<dyn HttpClient>, settings: &Settings, rng: fastrand::Rng) -> Self {
        Self {
            aggregates: PolygonAggregates::new(http_client, settings),
            accuracy: ModelAccuracy::default(),
            rng: Mutex::new(rng),
        }
    }

    pub async fn forecast(&self, symbol: &Symbol, mode: DataMode) -> ForecastOutcome {
        self.forecast_as_of(symbol, mode, today_utc()).await
    }

    /// Live mode degrades to a simulated series on any upstream failure.
    pub async fn forecast_as_of(&self, symbol: &Symbol, mode: DataMode, today: Date) -> ForecastOutcome {
        let live = match mode {
            DataMode::Live => {
                let from = today.saturating_sub(Duration::days(HISTORY_DAYS));
                let history = self.aggregates.daily(symbol, from, today).await;
                Some(history.and_then(|candles| {
                    if candles.is_empty() {
                        Err(SourceError::malformed("no trading days in the history window"))
                    } else {
                        Ok(candles)
                    }
                }))
            }
            DataMode::Simulated => None,
        };

        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let (data_source, points, warning) = match live {
            Some(Ok(history)) => (DataMode::Live, project(&history, today, &mut rng), None),
            Some(Err(error)) => {
                log::warn!("forecast for {symbol} degraded to simulated data: {error}");
                (
                    DataMode::Simulated,
                    simulate(symbol, HISTORY_DAYS, today, &mut rng),
                    Some(format!("Using simulated data for {symbol}")),
                )
            }
            None => (DataMode::Simulated, simulate(symbol, HISTORY_DAYS, today, &mut rng), None),
        };

        ForecastOutcome {
            forecast: Forecast {
                symbol: symbol.clone(),
                data_source,
                accuracy: self.accuracy,
                points,
            },
            warning,
        }
    }
}
