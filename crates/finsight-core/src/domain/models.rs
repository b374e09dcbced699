use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime, ValidationError};

/// Which branch of the fetch pipeline produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteOrigin {
    /// Built from the market-data endpoint's candles.
    Live,
    /// Copied from the static mock table.
    MockTable,
    /// Randomly generated for a ticker absent from the mock table.
    Synthetic,
}

impl QuoteOrigin {
    pub const fn is_fallback(self) -> bool {
        !matches!(self, Self::Live)
    }
}

/// Price, daily percent change and a short trailing series for one ticker.
///
/// Serialized field names (`change`, `data`) match what the dashboard widgets consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Normalized ticker, or the trimmed request text when it was not a valid ticker.
    pub symbol: String,
    pub price: f64,
    #[serde(rename = "change")]
    pub percent_change: f64,
    #[serde(rename = "data")]
    pub sparkline: Vec<f64>,
    pub origin: QuoteOrigin,
}

impl Quote {
    /// Build a quote from today's candle and the trailing candles.
    ///
    /// The trailing candles are ordered by timestamp before their closes become the sparkline.
    pub fn from_candles(
        symbol: Symbol,
        today: &Candle,
        trailing: &[Candle],
    ) -> Result<Self, ValidationError> {
        let mut ordered = trailing.to_vec();
        ordered.sort_by_key(|candle| candle.timestamp);

        Ok(Self {
            symbol: symbol.into(),
            price: today.close,
            percent_change: today.percent_change()?,
            sparkline: ordered.iter().map(|candle| candle.close).collect(),
            origin: QuoteOrigin::Live,
        })
    }
}

/// One daily aggregate bar: open, close and window start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub close: f64,
    pub timestamp: UtcDateTime,
}

impl Candle {
    pub fn new(open: f64, close: f64, timestamp: UtcDateTime) -> Result<Self, ValidationError> {
        validate_finite("open", open)?;
        validate_finite("close", close)?;

        Ok(Self {
            open,
            close,
            timestamp,
        })
    }

    /// `(close - open) / open * 100`; undefined for a non-positive open.
    pub fn percent_change(&self) -> Result<f64, ValidationError> {
        if self.open <= 0.0 {
            return Err(ValidationError::NonPositiveValue { field: "open" });
        }
        Ok((self.close - self.open) / self.open * 100.0)
    }
}

/// One message in the advisor conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub text: String,
    pub is_from_user: bool,
    pub sent_at: UtcDateTime,
}

impl ChatTurn {
    pub fn user(id: impl Into<String>, text: impl Into<String>, sent_at: UtcDateTime) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_from_user: true,
            sent_at,
        }
    }

    pub fn advisor(id: impl Into<String>, text: impl Into<String>, sent_at: UtcDateTime) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_from_user: false,
            sent_at,
        }
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}
