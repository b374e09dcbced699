//! Substitute quotes served when the market-data endpoint fails.
//!
//! Resolution order: the static mock table when it knows the ticker,
//! otherwise a synthetic quote with a base price in `[100, 1000)`, a percent
//! change in `[-2, 2)` and seven points within 5 of the base.

use std::sync::Mutex;

use crate::{Quote, QuoteOrigin, Symbol};

pub const SPARKLINE_POINTS: usize = 7;

const MOCK_TABLE: [(&str, f64, f64, [f64; SPARKLINE_POINTS]); 20] = [
    ("AAPL", 173.58, 0.89, [170.0, 168.0, 166.0, 169.0, 170.0, 173.0, 174.0]),
    ("MSFT", 410.34, 1.24, [400.0, 404.0, 405.0, 402.0, 406.0, 408.0, 410.0]),
    ("AMZN", 179.22, -0.47, [182.0, 180.0, 178.0, 177.0, 179.0, 178.0, 179.0]),
    ("GOOGL", 154.82, 0.62, [150.0, 151.0, 153.0, 154.0, 153.0, 155.0, 155.0]),
    ("GOOG", 156.01, 0.58, [151.0, 152.0, 154.0, 155.0, 154.0, 156.0, 156.0]),
    ("META", 512.28, 1.78, [500.0, 505.0, 507.0, 510.0, 508.0, 510.0, 512.0]),
    ("NVDA", 875.28, 2.13, [860.0, 855.0, 865.0, 870.0, 868.0, 872.0, 875.0]),
    ("TSLA", 172.63, -1.25, [180.0, 178.0, 176.0, 174.0, 173.0, 172.0, 173.0]),
    ("JPM", 182.56, 0.45, [180.0, 181.0, 180.0, 182.0, 181.0, 183.0, 183.0]),
    ("V", 267.35, 0.92, [260.0, 262.0, 265.0, 264.0, 266.0, 267.0, 267.0]),
    ("JNJ", 154.51, -0.22, [155.0, 156.0, 155.0, 154.0, 155.0, 154.0, 155.0]),
    ("UNH", 520.46, 1.35, [510.0, 512.0, 516.0, 518.0, 515.0, 519.0, 520.0]),
    ("MA", 448.79, 0.68, [440.0, 442.0, 445.0, 446.0, 447.0, 449.0, 449.0]),
    ("PG", 165.32, 0.14, [164.0, 165.0, 164.0, 165.0, 165.0, 165.0, 165.0]),
    ("HD", 342.78, -0.85, [350.0, 348.0, 346.0, 345.0, 343.0, 342.0, 343.0]),
    ("DIS", 114.25, 1.25, [110.0, 111.0, 112.0, 113.0, 112.0, 114.0, 114.0]),
    ("NFLX", 613.72, 2.34, [600.0, 602.0, 608.0, 610.0, 612.0, 611.0, 614.0]),
    ("INTC", 30.98, -1.45, [32.0, 31.5, 31.2, 31.0, 30.8, 30.7, 31.0]),
    ("AMD", 158.76, 1.87, [154.0, 155.0, 156.0, 157.0, 156.0, 158.0, 159.0]),
    ("ORCL", 122.87, 0.52, [120.0, 121.0, 122.0, 121.0, 123.0, 122.0, 123.0]),
];

/// Mock-table quote for `symbol`, if the table has one.
pub fn mock_quote(symbol: &Symbol) -> Option<Quote> {
    MOCK_TABLE
        .iter()
        .find(|(ticker, ..)| *ticker == symbol.as_str())
        .map(|(_, price, change, data)| Quote {
            symbol: symbol.to_string(),
            price: *price,
            percent_change: *change,
            sparkline: data.to_vec(),
            origin: QuoteOrigin::MockTable,
        })
}

/// Random quote for a ticker the mock table does not know.
pub fn synthesize(symbol: &str, rng: &mut fastrand::Rng) -> Quote {
    let base_price = 100.0 + rng.f64() * 900.0;
    let percent_change = rng.f64() * 4.0 - 2.0;
    let sparkline = (0..SPARKLINE_POINTS)
        .map(|_| base_price + rng.f64() * 10.0 - 5.0)
        .collect();

    Quote {
        symbol: symbol.to_owned(),
        price: base_price,
        percent_change,
        sparkline,
        origin: QuoteOrigin::Synthetic,
    }
}

/// Fallback source owning the generator used for synthetic quotes.
#[derive(Debug)]
pub struct FallbackQuotes {
    rng: Mutex<fastrand::Rng>,
}

impl Default for FallbackQuotes {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackQuotes {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    pub fn quote_for(&self, symbol: &Symbol) -> Quote {
        if let Some(quote) = mock_quote(symbol) {
            return quote;
        }

        self.synthetic_for(symbol.as_str())
    }

    /// Synthetic quote labelled with `label`; used for request text that is not a valid ticker.
    pub fn synthetic_for(&self, label: &str) -> Quote {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        synthesize(label, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    #[test]
    fn mock_table_entry_is_served_verbatim() {
        let quote = FallbackQuotes::with_seed(1).quote_for(&symbol("AAPL"));

        assert_eq!(quote.price, 173.58);
        assert_eq!(quote.percent_change, 0.89);
        assert_eq!(
            quote.sparkline,
            vec![170.0, 168.0, 166.0, 169.0, 170.0, 173.0, 174.0]
        );
        assert_eq!(quote.origin, QuoteOrigin::MockTable);
    }

    #[test]
    fn unknown_symbol_is_synthesized_within_bounds() {
        let fallback = FallbackQuotes::with_seed(42);
        for _ in 0..200 {
            let quote = fallback.quote_for(&symbol("ZZZZ"));
            assert!((100.0..1000.0).contains(&quote.price), "price {}", quote.price);
            assert!((-2.0..2.0).contains(&quote.percent_change));
            assert_eq!(quote.sparkline.len(), SPARKLINE_POINTS);
            for point in &quote.sparkline {
                assert!((point - quote.price).abs() <= 5.0);
            }
            assert_eq!(quote.origin, QuoteOrigin::Synthetic);
        }
    }

    #[test]
    fn same_seed_gives_same_synthetic_quote() {
        let a = FallbackQuotes::with_seed(7).quote_for(&symbol("QQQQ"));
        let b = FallbackQuotes::with_seed(7).quote_for(&symbol("QQQQ"));
        assert_eq!(a, b);
    }

    #[test]
    fn rejected_input_keeps_its_label() {
        let quote = FallbackQuotes::with_seed(3).synthetic_for("^GSPC");
        assert_eq!(quote.symbol, "^GSPC");
        assert_eq!(quote.origin, QuoteOrigin::Synthetic);
        assert_eq!(quote.sparkline.len(), SPARKLINE_POINTS);
    }

    #[test]
    fn mock_table_covers_twenty_tickers_with_seven_points() {
        assert_eq!(MOCK_TABLE.len(), 20);
        for (ticker, ..) in MOCK_TABLE {
            let quote = mock_quote(&symbol(ticker)).expect("listed");
            assert_eq!(quote.sparkline.len(), SPARKLINE_POINTS);
        }
    }
}
