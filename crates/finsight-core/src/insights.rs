//! Static insight cards, popular tickers and suggested prompts.

use serde::Serialize;

use crate::Symbol;

pub const POPULAR_TICKERS: [&str; 5] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];

pub const DASHBOARD_TICKERS: [&str; 6] = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "META"];

pub const RECOMMENDED_PROMPTS: [&str; 5] = [
    "What's the outlook for tech stocks this quarter?",
    "Explain recent market volatility and how to adjust my portfolio",
    "Compare AAPL and MSFT as long-term investments",
    "What sectors should I consider for dividend income?",
    "How will interest rates affect growth stocks this year?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendKind {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendCard {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: TrendKind,
    pub value: Option<&'static str>,
}

const fn card(
    title: &'static str,
    description: &'static str,
    kind: TrendKind,
    value: &'static str,
) -> TrendCard {
    TrendCard {
        title,
        description,
        kind,
        value: Some(value),
    }
}

/// Sector-level cards for the landing view.
pub fn market_trends() -> Vec<TrendCard> {
    vec![
        card(
            "Tech Sector Outlook",
            "Technology stocks showing strong momentum with AI advancements.",
            TrendKind::Positive,
            "+2.4% MTD",
        ),
        card(
            "Consumer Staples",
            "Defensive stocks under pressure as consumers reduce spending.",
            TrendKind::Negative,
            "-1.1% MTD",
        ),
        card(
            "Market Volatility",
            "VIX index indicates increased market uncertainty ahead.",
            TrendKind::Neutral,
            "19.32",
        ),
    ]
}

/// Analysis cards for one ticker.
pub fn stock_insights(symbol: &Symbol) -> Vec<TrendCard> {
    match symbol.as_str() {
        "AAPL" => vec![
            card(
                "Strong Buy Signal",
                "Technical indicators suggest bullish momentum.",
                TrendKind::Positive,
                "87% Confidence",
            ),
            card(
                "Recent Performance",
                "Outperforming sector by 3.2% in the last quarter.",
                TrendKind::Positive,
                "+12.4% QTD",
            ),
            card(
                "Volatility",
                "Stock shows lower volatility than market average.",
                TrendKind::Neutral,
                "0.89 Beta",
            ),
        ],
        "TSLA" => vec![
            card(
                "Hold Recommendation",
                "Mixed signals with recent price volatility.",
                TrendKind::Neutral,
                "52% Confidence",
            ),
            card(
                "Technical Resistance",
                "Approaching key resistance level at $260.",
                TrendKind::Negative,
                "Caution",
            ),
            card(
                "Volume Analysis",
                "Trading volume increasing on down days.",
                TrendKind::Negative,
                "+32% Volume",
            ),
        ],
        _ => vec![
            card(
                "Moderate Buy",
                "Positive outlook with some caution advised.",
                TrendKind::Positive,
                "68% Confidence",
            ),
            card(
                "Price Momentum",
                "Positive price action in recent trading sessions.",
                TrendKind::Positive,
                "Bullish",
            ),
            card(
                "Market Correlation",
                "Stock following broader market trends.",
                TrendKind::Neutral,
                "0.95 Correlation",
            ),
        ],
    }
}
