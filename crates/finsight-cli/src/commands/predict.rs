use finsight_core::views::{PredictController, PredictState};
use finsight_core::{
    DataMode, ForecastModel, ForecastPoint, ForecastService, ForecastSummary, Notice, Symbol,
};
use serde::Serialize;

use crate::cli::PredictArgs;
use crate::error::CliError;

use super::{partition_notices, CommandResult, Context};

#[derive(Debug, Serialize)]
struct PredictResponseData<'a> {
    symbol: &'a Symbol,
    data_source: DataMode,
    summary: ForecastSummary,
    points: &'a [ForecastPoint],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notices: Vec<Notice>,
}

pub async fn run(args: &PredictArgs, context: &Context) -> Result<CommandResult, CliError> {
    let model = ForecastModel::parse(&args.model)?;
    let mode = if args.simulated || context.offline {
        DataMode::Simulated
    } else {
        DataMode::Live
    };

    let service = ForecastService::new(context.http_client.clone(), &context.settings);
    let mut controller = PredictController::with_state(
        service,
        PredictState {
            mode,
            ..PredictState::default()
        },
    );
    controller.select_model(model);
    controller.search(&args.symbol).await?;

    let (warnings, notices) = partition_notices(controller.drain_notices());
    let state = controller.state();
    let (Some(forecast), Some(summary)) = (state.forecast.as_ref(), state.summary()) else {
        return Ok(CommandResult::ok(serde_json::Value::Null).with_warnings(warnings));
    };

    let data = serde_json::to_value(PredictResponseData {
        symbol: &forecast.symbol,
        data_source: forecast.data_source,
        summary,
        points: &forecast.points,
        notices,
    })?;

    Ok(CommandResult::ok(data).with_warnings(warnings))
}
