use std::io::Write;

use finsight_core::views::ChatController;
use finsight_core::{Advisor, CannedAdvisor, ChatTurn, InferenceAdvisor, Notice};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{ChatArgs, OutputFormat};
use crate::error::CliError;

use super::{partition_notices, CommandResult, Context};

#[derive(Debug, Serialize)]
struct ChatResponseData<'a> {
    turns: &'a [ChatTurn],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notices: Vec<Notice>,
}

pub async fn run(
    args: &ChatArgs,
    context: &Context,
    format: OutputFormat,
) -> Result<CommandResult, CliError> {
    let advisor: Box<dyn Advisor> = if context.offline {
        Box::new(CannedAdvisor)
    } else {
        Box::new(InferenceAdvisor::new(
            context.http_client.clone(),
            &context.settings,
        ))
    };
    let mut controller = ChatController::new(advisor);

    let mut notices = Vec::new();
    match &args.message {
        Some(message) => {
            if controller.send(message).await.is_none() {
                notices.push(Notice::warning("empty message ignored"));
            }
        }
        None => notices.extend(interactive(&mut controller, format).await?),
    }

    let (warnings, notices) = partition_notices(notices);
    let data = serde_json::to_value(ChatResponseData {
        turns: controller.state().turns(),
        notices,
    })?;
    Ok(CommandResult::ok(data).with_warnings(warnings))
}

/// Read messages from stdin until EOF or `/quit`. `/clear` resets the conversation.
async fn interactive(
    controller: &mut ChatController,
    format: OutputFormat,
) -> Result<Vec<Notice>, CliError> {
    let echo = format == OutputFormat::Table;
    let mut notices = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if echo {
        if let Some(greeting) = controller.state().turns().first() {
            println!("advisor> {}", greeting.text);
        }
    }

    loop {
        eprint!("you> ");
        std::io::stderr().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "/quit" => break,
            "/clear" => {
                let notice = controller.clear();
                if echo {
                    if let Some(turn) = controller.state().turns().last() {
                        println!("advisor> {}", turn.text);
                    }
                }
                notices.push(notice);
            }
            _ => {
                if let Some(reply) = controller.send(&line).await {
                    if echo {
                        println!("advisor> {}", reply.text);
                    }
                }
            }
        }
    }

    Ok(notices)
}
