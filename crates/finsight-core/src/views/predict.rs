use crate::forecast::{
    DataMode, Forecast, ForecastModel, ForecastOutcome, ForecastService, ForecastSummary,
};
use crate::{Symbol, ValidationError};

use super::Notice;

/// Forecast page: selected ticker, data mode, model and the loaded series.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictState {
    pub symbol: Option<Symbol>,
    pub mode: DataMode,
    pub model: ForecastModel,
    pub loading: bool,
    pub forecast: Option<Forecast>,
    pub notices: Vec<Notice>,
}

impl Default for PredictState {
    fn default() -> Self {
        Self {
            symbol: None,
            mode: DataMode::Live,
            model: ForecastModel::Lstm,
            loading: false,
            forecast: None,
            notices: Vec::new(),
        }
    }
}

impl PredictState {
    pub fn summary(&self) -> Option<ForecastSummary> {
        self.forecast.as_ref().map(|forecast| forecast.summary(self.model))
    }

    /// True when the state asks for a (re)load of the selected symbol.
    pub const fn needs_load(&self) -> bool {
        self.loading && self.symbol.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictEvent {
    Searched(Symbol),
    ModeToggled,
    ModelSelected(ForecastModel),
    Loaded(ForecastOutcome),
}

pub fn reduce(mut state: PredictState, event: PredictEvent) -> PredictState {
    match event {
        PredictEvent::Searched(symbol) => {
            state.symbol = Some(symbol);
            state.loading = true;
        }
        PredictEvent::ModeToggled => {
            state.mode = state.mode.toggled();
            state
                .notices
                .push(Notice::info(format!("Switched to {} data", state.mode.as_str())));
            state.loading = state.symbol.is_some();
        }
        PredictEvent::ModelSelected(model) => state.model = model,
        PredictEvent::Loaded(outcome) => {
            let symbol = outcome.forecast.symbol.clone();
            let notice = match (&outcome.warning, outcome.forecast.data_source) {
                (Some(warning), _) => {
                    state.mode = DataMode::Simulated;
                    Notice::warning(warning.clone())
                }
                (None, DataMode::Live) => Notice::success(format!("{symbol} data loaded successfully")),
                (None, DataMode::Simulated) => Notice::info(format!("{symbol} simulated data loaded")),
            };
            state.notices.push(notice);
            state.symbol = Some(symbol);
            state.forecast = Some(outcome.forecast);
            state.loading = false;
        }
    }
    state
}

pub struct PredictController {
    state: PredictState,
    service: ForecastService,
}

impl PredictController {
    pub fn new(service: ForecastService) -> Self {
        Self::with_state(service, PredictState::default())
    }

    pub fn with_state(service: ForecastService, state: PredictState) -> Self {
        Self { state, service }
    }

    pub fn state(&self) -> &PredictState {
        &self.state
    }

    /// Notices raised since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.state.notices)
    }

    fn apply(&mut self, event: PredictEvent) {
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    pub async fn search(&mut self, input: &str) -> Result<(), ValidationError> {
        let symbol = Symbol::parse(input)?;
        self.apply(PredictEvent::Searched(symbol));
        self.load().await;
        Ok(())
    }

    pub async fn toggle_mode(&mut self) {
        self.apply(PredictEvent::ModeToggled);
        self.load().await;
    }

    pub fn select_model(&mut self, model: ForecastModel) {
        self.apply(PredictEvent::ModelSelected(model));
    }

    async fn load(&mut self) {
        if !self.state.needs_load() {
            return;
        }
        let Some(symbol) = self.state.symbol.clone() else {
            return;
        };
        let outcome = self.service.forecast(&symbol, self.state.mode).await;
        self.apply(PredictEvent::Loaded(outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{ForecastPoint, ModelAccuracy};

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    fn point(date: &str, actual: Option<f64>, predicted: Option<(f64, f64)>) -> ForecastPoint {
        ForecastPoint {
            date: date.to_owned(),
            actual,
            predicted: predicted.map(|(lstm, _)| lstm),
            predicted_lstm: predicted.map(|(lstm, _)| lstm),
            predicted_bilstm: predicted.map(|(_, bilstm)| bilstm),
        }
    }

    fn outcome(source: DataMode, warning: Option<&str>) -> ForecastOutcome {
        ForecastOutcome {
            forecast: Forecast {
                symbol: symbol("AAPL"),
                data_source: source,
                accuracy: ModelAccuracy::default(),
                points: vec![
                    point("2024-01-01", Some(100.0), None),
                    point("2024-01-02", None, Some((101.0, 102.0))),
                ],
            },
            warning: warning.map(str::to_owned),
        }
    }

    #[test]
    fn search_marks_loading() {
        let state = reduce(PredictState::default(), PredictEvent::Searched(symbol("msft")));
        assert_eq!(state.symbol.as_ref().map(Symbol::as_str), Some("MSFT"));
        assert!(state.needs_load());
    }

    #[test]
    fn toggling_without_symbol_does_not_load() {
        let state = reduce(PredictState::default(), PredictEvent::ModeToggled);
        assert_eq!(state.mode, DataMode::Simulated);
        assert!(!state.needs_load());
        assert_eq!(state.notices, vec![Notice::info("Switched to simulated data")]);
    }

    #[test]
    fn degraded_load_flips_to_simulated() {
        let state = reduce(PredictState::default(), PredictEvent::Searched(symbol("AAPL")));
        let state = reduce(
            state,
            PredictEvent::Loaded(outcome(DataMode::Simulated, Some("Using simulated data for AAPL"))),
        );

        assert_eq!(state.mode, DataMode::Simulated);
        assert!(!state.loading);
        assert_eq!(state.notices, vec![Notice::warning("Using simulated data for AAPL")]);
    }

    #[test]
    fn model_selection_changes_summary_only() {
        let state = reduce(PredictState::default(), PredictEvent::Loaded(outcome(DataMode::Live, None)));
        let lstm = state.summary().expect("summary");
        let state = reduce(state, PredictEvent::ModelSelected(ForecastModel::Bilstm));
        let bilstm = state.summary().expect("summary");

        assert_eq!(lstm.predicted_price, Some(101.0));
        assert_eq!(bilstm.predicted_price, Some(102.0));
        assert_eq!(bilstm.accuracy, 0.92);
        assert_eq!(state.notices, vec![Notice::success("AAPL data loaded successfully")]);
    }
}
