use crate::advisor::Advisor;
use crate::{ChatTurn, UtcDateTime};

use super::Notice;

pub const GREETING: &str = "👋 Hello! I'm your financial advisor. Ask me anything about stocks, market trends, or investment strategies.";

pub const CLEARED_GREETING: &str =
    "Chat cleared. How can I help you with your financial questions today?";

/// Conversation shown in the advisor panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    turns: Vec<ChatTurn>,
    pending: bool,
    next_id: u64,
}

impl ChatState {
    pub fn new(at: UtcDateTime) -> Self {
        Self {
            turns: vec![ChatTurn::advisor("turn-1", GREETING, at)],
            pending: false,
            next_id: 2,
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// True while a user message is waiting for its reply.
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    fn push(&mut self, make: impl FnOnce(String) -> ChatTurn) {
        let id = format!("turn-{}", self.next_id);
        self.next_id += 1;
        self.turns.push(make(id));
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(UtcDateTime::now())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Submitted { text: String, at: UtcDateTime },
    Replied { text: String, at: UtcDateTime },
    Cleared { at: UtcDateTime },
}

/// Blank input and input sent while a reply is pending are ignored, as is a
/// reply nobody is waiting for.
pub fn reduce(mut state: ChatState, event: ChatEvent) -> ChatState {
    match event {
        ChatEvent::Submitted { text, at } => {
            if text.trim().is_empty() || state.pending {
                return state;
            }
            state.push(|id| ChatTurn::user(id, text, at));
            state.pending = true;
        }
        ChatEvent::Replied { text, at } => {
            if !state.pending {
                return state;
            }
            state.push(|id| ChatTurn::advisor(id, text, at));
            state.pending = false;
        }
        ChatEvent::Cleared { at } => {
            state.turns.clear();
            state.pending = false;
            state.push(|id| ChatTurn::advisor(id, CLEARED_GREETING, at));
        }
    }
    state
}

/// Advisor panel: conversation state plus the responder that answers it.
pub struct ChatController {
    state: ChatState,
    advisor: Box<dyn Advisor>,
}

impl ChatController {
    pub fn new(advisor: Box<dyn Advisor>) -> Self {
        Self {
            state: ChatState::default(),
            advisor,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    fn apply(&mut self, event: ChatEvent) {
        self.state = reduce(std::mem::take(&mut self.state), event);
    }

    /// Send `input` and wait for the reply. `None` when the input was ignored.
    pub async fn send(&mut self, input: &str) -> Option<&ChatTurn> {
        let before = self.state.turns.len();
        self.apply(ChatEvent::Submitted {
            text: input.to_owned(),
            at: UtcDateTime::now(),
        });
        if self.state.turns.len() == before {
            return None;
        }

        let reply = self.advisor.respond(input).await;
        self.apply(ChatEvent::Replied {
            text: reply,
            at: UtcDateTime::now(),
        });
        self.state.turns.last()
    }

    pub fn clear(&mut self) -> Notice {
        self.apply(ChatEvent::Cleared {
            at: UtcDateTime::now(),
        });
        Notice::success("Chat history cleared")
    }
}
