mod chat;
mod insights;
mod predict;
mod quotes;

use std::sync::Arc;
use std::time::Instant;

use finsight_core::{
    Envelope, EnvelopeMeta, HttpClient, Notice, NoticeLevel, OfflineHttpClient, ReqwestHttpClient,
    Settings,
};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

/// Settings and transport shared by every command.
pub struct Context {
    pub settings: Settings,
    pub http_client: Arc<dyn HttpClient>,
    pub offline: bool,
}

impl Context {
    fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut settings = Settings::from_env()?;
        if let Some(timeout_ms) = cli.timeout_ms {
            settings = settings.with_timeout_ms(timeout_ms);
        }
        log::debug!("settings: {settings:?}");

        let http_client: Arc<dyn HttpClient> = if cli.offline {
            Arc::new(OfflineHttpClient)
        } else {
            Arc::new(ReqwestHttpClient::new())
        };

        Ok(Self {
            settings,
            http_client,
            offline: cli.offline,
        })
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();
    let context = Context::from_cli(cli)?;

    let CommandResult { data, warnings } = match &cli.command {
        Command::Quotes(args) => quotes::run(args, &context).await?,
        Command::Predict(args) => predict::run(args, &context).await?,
        Command::Insights(args) => insights::run(args)?,
        Command::Chat(args) => chat::run(args, &context, cli.format).await?,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(Uuid::new_v4().hyphenated().to_string(), latency_ms)?;
    meta.extend_warnings(warnings);

    Ok(Envelope::new(meta, data))
}

/// Split notices into envelope warnings and the rest.
pub fn partition_notices(notices: Vec<Notice>) -> (Vec<String>, Vec<Notice>) {
    let (warnings, rest): (Vec<_>, Vec<_>) = notices
        .into_iter()
        .partition(|notice| matches!(notice.level, NoticeLevel::Warning | NoticeLevel::Error));
    (warnings.into_iter().map(|notice| notice.message).collect(), rest)
}
