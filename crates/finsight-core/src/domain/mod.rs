//! Domain types shared by the fetcher, advisor and view controllers.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, upper-cased ticker |
//! | [`Quote`] | Price, percent change and sparkline for one ticker |
//! | [`QuoteOrigin`] | Live data or which fallback produced the quote |
//! | [`Candle`] | Daily aggregate bar (open, close, timestamp) |
//! | [`ChatTurn`] | One message in the advisor conversation |
//! | [`UtcDateTime`] | UTC timestamp |

mod models;
mod symbol;
mod timestamp;

pub use models::{Candle, ChatTurn, Quote, QuoteOrigin};
pub use symbol::Symbol;
pub use timestamp::{format_date, today_utc, UtcDateTime};
