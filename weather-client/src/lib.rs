//! # weather-client
//!
//! [`OpenWeatherClient`] resolves a city name or a coordinate pair to a [`WeatherSummary`] through the
//! OpenWeatherMap "current weather" endpoint (metric units).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};
use wbot_core::{LookupError, Place, WeatherLookup, WeatherSummary};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Masks an API key for logs: first 7 chars + `***` + last 4; keys of 11 chars or fewer become `***`.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    weather: Vec<Condition>,
    main: MainReadings,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

impl CurrentWeather {
    fn into_summary(self) -> Result<WeatherSummary, LookupError> {
        let status = self
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| LookupError::InvalidResponse("no weather conditions".to_string()))?;
        Ok(WeatherSummary {
            temperature_c: self.main.temp,
            status,
            place: self.name,
        })
    }
}

/// OpenWeatherMap client. Cheap to clone; shares the underlying connection pool.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherClient {
    /// Client for the public endpoint with the default timeout.
    pub fn new(api_key: String) -> Result<Self, LookupError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), DEFAULT_TIMEOUT)
    }

    /// Client for a custom endpoint (tests, proxies). `timeout` bounds each request.
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;
        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn query_for(&self, place: &Place) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        match place {
            Place::Name(name) => query.push(("q", name.clone())),
            Place::Coordinates(c) => {
                query.push(("lat", format!("{:.6}", c.latitude)));
                query.push(("lon", format!("{:.6}", c.longitude)));
            }
        }
        query
    }

    fn map_send_error(&self, e: reqwest::Error) -> LookupError {
        if e.is_timeout() {
            LookupError::Timeout(self.timeout)
        } else {
            LookupError::Unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn resolve(&self, place: &Place) -> Result<WeatherSummary, LookupError> {
        let url = format!("{}/weather", self.base_url);
        info!(
            place = %place,
            api_key = %mask_token(&self.api_key),
            "Requesting weather"
        );

        let response = self
            .http
            .get(&url)
            .query(&self.query_for(place))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(place = %place, "Weather provider does not know this place");
            return Err(LookupError::NotFound(place.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(place = %place, status = %status, body = %body, "Weather request failed");
            return Err(LookupError::Unavailable(format!("HTTP {}", status)));
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        debug!(body = %body, "Weather response");
        let current: CurrentWeather = serde_json::from_str(&body)
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;
        current.into_summary()
    }
}
