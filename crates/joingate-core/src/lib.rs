//! Core of the channel-gated link bot.
//!
//! Framework-agnostic: Telegram and the resolution API live behind ports
//! (traits) implemented in adapter crates. Per event the router runs the
//! membership gate, then hands authorized events to the dispatcher.

pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod join_prompt;
pub mod logging;
pub mod membership;
pub mod messaging;
pub mod notices;
pub mod pipeline;
pub mod ports;
pub mod texts;

#[cfg(test)]
mod fakes;

pub use errors::{Error, Result};
