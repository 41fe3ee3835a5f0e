//! Weather lookup abstraction and its result type.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::types::Coordinates;

/// Where to look the weather up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Place {
    Name(String),
    Coordinates(Coordinates),
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Name(name) => f.write_str(name),
            Place::Coordinates(c) => write!(f, "{}", c),
        }
    }
}

/// Current weather at a resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// Degrees Celsius.
    pub temperature_c: f64,
    /// Short status such as "light rain".
    pub status: String,
    /// Place name as resolved by the provider.
    pub place: String,
}

impl fmt::Display for WeatherSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} \u{00B0}C, {} in {}",
            self.temperature_c, self.status, self.place
        )
    }
}

/// Resolves a place to its current weather.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn resolve(&self, place: &Place) -> std::result::Result<WeatherSummary, LookupError>;
}
