//! View controllers.
//!
//! Each view owns one explicit state value. Every change goes through a pure
//! `reduce(state, event) -> state` function; the controllers only perform the
//! async work (fetching, asking the advisor) and feed the results back in as
//! events.

mod chat;
mod dashboard;
mod predict;

pub use chat::{reduce as reduce_chat, ChatController, ChatEvent, ChatState, CLEARED_GREETING, GREETING};
pub use dashboard::{reduce as reduce_dashboard, DashboardController, DashboardEvent, DashboardState};
pub use predict::{reduce as reduce_predict, PredictController, PredictEvent, PredictState};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }
}
