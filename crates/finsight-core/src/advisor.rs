//! Chat Responder for the advisor panel.
//!
//! Each call is stateless from the endpoint's point of view: only the current
//! message is sent, wrapped in a fixed instruction template. Failures never
//! reach the caller; they become [`APOLOGY`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::adapters::TextGeneration;
use crate::config::Settings;
use crate::http_client::HttpClient;

pub const SYSTEM_PROMPT: &str = "You are making a Financial Advisor, a friendly and knowledgeable financial advisor chatbot. You help users make smarter money decisions by offering clear, practical, and trustworthy advice on topics like budgeting, investing, saving, debt management, and financial planning.

You speak in a supportive, conversational tone, like a helpful friend who knows a lot about money. You avoid jargon unless it's explained clearly. Always tailor your advice to the user's personal situation if they share it.

Stay neutral, avoid offering legal or overly speculative advice, and always encourage users to consult a licensed financial professional for major decisions.";

pub const APOLOGY: &str = "I apologize, but I'm having trouble processing your request right now. Please try again in a moment.";

/// Anything that can answer a user message. Implementations never fail.
pub trait Advisor: Send + Sync {
    fn respond<'a>(&'a self, message: &'a str) -> Pin<Box<dyn Future<Output = String> + Send + 'a>>;
}

/// Instruction-format prompt for `message`.
pub fn build_prompt(message: &str) -> String {
    format!("<s>[INST] {SYSTEM_PROMPT}\n\nUser: {message} [/INST]")
}

/// Advisor backed by the hosted text-generation endpoint.
#[derive(Clone)]
pub struct InferenceAdvisor {
    generator: TextGeneration,
}

impl InferenceAdvisor {
    pub fn new(http_client: Arc<dyn HttpClient>, settings: &Settings) -> Self {
        Self {
            generator: TextGeneration::new(http_client, settings),
        }
    }
}

impl Advisor for InferenceAdvisor {
    fn respond<'a>(&'a self, message: &'a str) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        Box::pin(async move {
            match self.generator.generate(&build_prompt(message)).await {
                Ok(text) => text,
                Err(error) => {
                    log::error!("advisor reply failed: {error}");
                    String::from(APOLOGY)
                }
            }
        })
    }
}

/// Keyword-matched replies that need no network.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedAdvisor;

const CANNED_REPLIES: [(&[&str], &str); 4] = [
    (
        &["aapl", "apple"],
        "Based on recent data, Apple (AAPL) has shown strong performance with positive analyst ratings. Their latest product launches and services growth are contributing to a bullish outlook. Consider monitoring their upcoming earnings report for further guidance.",
    ),
    (
        &["tsla", "tesla"],
        "Tesla (TSLA) has been experiencing volatility due to production challenges and increased competition. However, their innovation in EV technology and energy solutions positions them well for long-term growth. Risk-tolerant investors might see current prices as an opportunity.",
    ),
    (
        &["msft", "microsoft"],
        "Microsoft (MSFT) continues to show strong growth driven by cloud services and AI investments. Their diversified revenue streams and strategic acquisitions create a stable outlook. Many analysts maintain buy ratings with expectations of continued steady growth.",
    ),
    (
        &["market", "trend"],
        "Current market trends indicate cautious optimism amid inflation concerns and interest rate adjustments. Technology and healthcare sectors are showing resilience, while consumer discretionary faces challenges. Consider diversification and maintaining cash reserves for potential opportunities.",
    ),
];

const CANNED_DEFAULT: &str = "Thank you for your question. While I don't have specific data on that particular query, I recommend considering factors like company fundamentals, industry trends, and macroeconomic conditions in your investment decisions. Would you like me to provide general guidance on investment strategies instead?";

impl CannedAdvisor {
    pub fn reply_for(message: &str) -> &'static str {
        let lower = message.to_lowercase();
        CANNED_REPLIES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|keyword| lower.contains(keyword)))
            .map_or(CANNED_DEFAULT, |(_, reply)| *reply)
    }
}

impl Advisor for CannedAdvisor {
    fn respond<'a>(&'a self, message: &'a str) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        Box::pin(async move { String::from(Self::reply_for(message)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_wraps_message_after_system_prompt() {
        let prompt = build_prompt("Should I pay off debt first?");
        assert!(prompt.starts_with("<s>[INST] You are making a Financial Advisor"));
        assert!(prompt.ends_with("\n\nUser: Should I pay off debt first? [/INST]"));
    }

    #[test]
    fn canned_replies_match_keywords_case_insensitively() {
        assert!(CannedAdvisor::reply_for("What about APPLE?").contains("Apple (AAPL)"));
        assert!(CannedAdvisor::reply_for("tsla outlook").contains("Tesla (TSLA)"));
        assert!(CannedAdvisor::reply_for("Is Microsoft a buy").contains("Microsoft (MSFT)"));
        assert!(CannedAdvisor::reply_for("market trends?").contains("cautious optimism"));
        assert_eq!(CannedAdvisor::reply_for("hello"), CANNED_DEFAULT);
    }

    #[test]
    fn first_matching_keyword_group_wins() {
        assert!(CannedAdvisor::reply_for("apple vs tesla").contains("Apple (AAPL)"));
    }

    #[tokio::test]
    async fn canned_advisor_responds_through_trait() {
        let advisor: &dyn Advisor = &CannedAdvisor;
        assert_eq!(advisor.respond("hi").await, CANNED_DEFAULT);
    }
}
