use finsight_core::insights::DASHBOARD_TICKERS;
use finsight_core::views::DashboardController;
use finsight_core::{Quote, QuoteFetcher};
use serde::Serialize;

use crate::cli::QuotesArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
struct QuotesResponseData<'a> {
    quotes: &'a [Quote],
}

pub async fn run(args: &QuotesArgs, context: &Context) -> Result<CommandResult, CliError> {
    let symbols: Vec<String> = if args.symbols.is_empty() {
        DASHBOARD_TICKERS.iter().map(|ticker| ticker.to_string()).collect()
    } else {
        args.symbols.clone()
    };

    let fetcher = QuoteFetcher::new(context.http_client.clone(), &context.settings);
    let mut dashboard = DashboardController::new(fetcher);
    let quotes = dashboard.refresh(symbols).await;
    let data = serde_json::to_value(QuotesResponseData { quotes })?;

    for notice in dashboard.drain_notices() {
        log::info!("{}", notice.message);
    }

    Ok(CommandResult::ok(data).with_warnings(dashboard.state().warnings.clone()))
}
