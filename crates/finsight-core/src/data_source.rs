//! Failure taxonomy shared by the upstream adapters.
//!
//! Every upstream call fails in one of three ways, and every caller in this
//! crate treats them the same: substitute a fallback value and move on. The
//! kind is kept for logging and for the warnings surfaced to the user.

use std::fmt::{Display, Formatter};

use crate::http_client::{HttpError, HttpResponse};

/// Upstream failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The request never produced a response (network, DNS, timeout).
    Transport,
    /// The endpoint answered with a non-2xx status.
    Status,
    /// The body was not the expected JSON or lacked required fields.
    Malformed,
}

/// Structured upstream error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            kind: SourceErrorKind::Status,
            message: format!("upstream returned status {status}"),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Malformed,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Transport => "source.transport",
            SourceErrorKind::Status => "source.status",
            SourceErrorKind::Malformed => "source.malformed",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<HttpError> for SourceError {
    fn from(error: HttpError) -> Self {
        Self::transport(error.message())
    }
}

/// Accept a 2xx response, classify anything else as a status failure.
pub fn require_success(response: HttpResponse) -> Result<HttpResponse, SourceError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(SourceError::status(response.status))
    }
}
