use crate::quotes::{QuoteBatch, QuoteFetcher};
use crate::Quote;

use super::Notice;

/// Market overview: the watched tickers and their latest quotes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Tickers as entered; invalid ones still get a fallback row.
    pub symbols: Vec<String>,
    pub quotes: Vec<Quote>,
    pub loading: bool,
    /// One line per symbol that was served from fallback data.
    pub warnings: Vec<String>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Refreshing(Vec<String>),
    Loaded(QuoteBatch),
}

pub fn reduce(mut state: DashboardState, event: DashboardEvent) -> DashboardState {
    match event {
        DashboardEvent::Refreshing(symbols) => {
            state.symbols = symbols;
            state.loading = true;
        }
        DashboardEvent::Loaded(batch) => {
            let substituted = batch.quotes.iter().filter(|quote| quote.origin.is_fallback()).count();
            if substituted > 0 {
                state.notices.push(Notice::warning(format!(
                    "Showing fallback data for {substituted} of {} symbols",
                    batch.quotes.len()
                )));
            }
            state.quotes = batch.quotes;
            state.warnings = batch.warnings;
            state.loading = false;
        }
    }
    state
}

pub struct DashboardController {
    state: DashboardState,
    fetcher: QuoteFetcher,
}

impl DashboardController {
    pub fn new(fetcher: QuoteFetcher) -> Self {
        Self {
            state: DashboardState::default(),
            fetcher,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.state.notices)
    }

    fn apply(&mut self, event: DashboardEvent) {
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    /// Fetch quotes for `symbols` and replace the board with them.
    pub async fn refresh(&mut self, symbols: Vec<String>) -> &[Quote] {
        self.apply(DashboardEvent::Refreshing(symbols));
        let batch = self
            .fetcher
            .fetch_as_of(&self.state.symbols, crate::today_utc())
            .await;
        self.apply(DashboardEvent::Loaded(batch));
        &self.state.quotes
    }
}
