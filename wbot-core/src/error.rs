//! Error types for the bot core.
//!
//! [`WbotError`] is the top-level error; [`LookupError`] is returned by weather lookups.

use std::time::Duration;
use thiserror::Error;

/// Top-level error for wbot (transport, weather lookup, config, IO).
#[derive(Error, Debug)]
pub enum WbotError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by a [`crate::WeatherLookup`] (unknown place, provider down, bad body, timeout).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Place not found: {0}")]
    NotFound(String),

    #[error("Weather provider unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid weather response: {0}")]
    InvalidResponse(String),

    #[error("Weather lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for core operations; uses [`WbotError`].
pub type Result<T> = std::result::Result<T, WbotError>;
