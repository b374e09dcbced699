use finsight_core::insights::{self, POPULAR_TICKERS, RECOMMENDED_PROMPTS};
use finsight_core::{Symbol, TrendCard};
use serde::Serialize;

use crate::cli::InsightsArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct InsightsResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol: Option<Symbol>,
    cards: Vec<TrendCard>,
    popular_tickers: &'static [&'static str],
    recommended_prompts: &'static [&'static str],
}

pub fn run(args: &InsightsArgs) -> Result<CommandResult, CliError> {
    let symbol = args.symbol.as_deref().map(Symbol::parse).transpose()?;
    let cards = match &symbol {
        Some(symbol) => insights::stock_insights(symbol),
        None => insights::market_trends(),
    };

    let data = serde_json::to_value(InsightsResponseData {
        symbol,
        cards,
        popular_tickers: &POPULAR_TICKERS,
        recommended_prompts: &RECOMMENDED_PROMPTS,
    })?;
    Ok(CommandResult::ok(data))
}
