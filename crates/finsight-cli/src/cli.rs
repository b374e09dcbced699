//! CLI argument definitions for finsight.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quotes` | Dashboard quotes with sparklines |
//! | `predict` | Seven-day price forecast for one ticker |
//! | `insights` | Market trend or per-ticker insight cards |
//! | `chat` | Ask the financial advisor |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--offline` | `false` | Never touch the network |
//! | `--timeout-ms` | from env or `10000` | Per-request timeout in ms |

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Market dashboard, forecasts and a financial advisor in the terminal.
#[derive(Debug, Parser)]
#[command(name = "finsight", author, version, about = "Market quotes, forecasts and advice")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve fallback data and canned advice without any network access.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Request timeout in milliseconds; overrides FINSIGHT_TIMEOUT_MS.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch quotes for the dashboard tickers or the given symbols.
    Quotes(QuotesArgs),
    /// Forecast the next seven days for one ticker.
    Predict(PredictArgs),
    /// Show market trends, or insight cards for one ticker.
    Insights(InsightsArgs),
    /// Ask the advisor a question, or start an interactive session.
    Chat(ChatArgs),
}

#[derive(Debug, Args)]
pub struct QuotesArgs {
    /// Ticker symbols; defaults to the dashboard list.
    pub symbols: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    pub symbol: String,

    /// Skip the market-data request and simulate the history.
    #[arg(long, default_value_t = false)]
    pub simulated: bool,

    /// Model whose projection the summary reports.
    #[arg(long, default_value = "lstm")]
    pub model: String,
}

#[derive(Debug, Args)]
pub struct InsightsArgs {
    pub symbol: Option<String>,
}

#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Message to send; reads lines from stdin when omitted.
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "finsight", "predict", "tsla", "--model", "bilstm", "--offline", "--format", "table",
        ])
        .expect("valid arguments");

        assert!(cli.offline);
        assert_eq!(cli.format, OutputFormat::Table);
        match cli.command {
            Command::Predict(args) => {
                assert_eq!(args.symbol, "tsla");
                assert_eq!(args.model, "bilstm");
                assert!(!args.simulated);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["finsight", "--timeout-ms", "0", "quotes"]).is_err());
    }

    #[test]
    fn quotes_accepts_no_symbols() {
        let cli = Cli::try_parse_from(["finsight", "quotes"]).expect("valid arguments");
        match cli.command {
            Command::Quotes(args) => assert!(args.symbols.is_empty()),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
