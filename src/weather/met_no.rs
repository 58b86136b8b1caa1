//! Weather client for the MET Norway locationforecast API
//!
//! Reads the first timeseries entry of the compact forecast as the current
//! conditions. The service needs an identifying `User-Agent` and no API key.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::{Coordinate, WeatherObservation};
use crate::{Result, SunshineError};

/// HTTP client for api.met.no
#[derive(Debug, Clone)]
pub struct MetNoClient {
    client: Client,
    base_url: String,
}

impl MetNoClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| SunshineError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for MetNoClient {
    #[instrument(skip(self, coordinate), fields(lat = coordinate.lat, lon = coordinate.lon))]
    async fn fetch(&self, coordinate: Coordinate) -> Result<WeatherObservation> {
        let start_time = Instant::now();

        // met.no rejects more than four decimals
        let lat = format!("{:.4}", coordinate.lat);
        let lon = format!("{:.4}", coordinate.lon);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .await?;

        let status = response.status();
        debug!(
            "HTTP response received: {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            warn!("Weather request failed with status {}", status);
            return Err(SunshineError::weather(format!(
                "API request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let forecast: compact::ForecastResponse = response
            .json()
            .await
            .map_err(|e| SunshineError::weather(format!("Invalid weather data: {e}")))?;

        forecast.into_observation()
    }
}

/// Response structures for the compact locationforecast format
mod compact {
    use serde::Deserialize;

    use crate::models::WeatherObservation;
    use crate::{Result, SunshineError};

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub properties: Properties,
    }

    #[derive(Debug, Deserialize)]
    pub struct Properties {
        pub timeseries: Vec<TimeStep>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TimeStep {
        pub time: String,
        pub data: TimeStepData,
    }

    #[derive(Debug, Deserialize)]
    pub struct TimeStepData {
        pub instant: InstantData,
        pub next_1_hours: Option<PeriodData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct InstantData {
        pub details: InstantDetails,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct InstantDetails {
        pub air_temperature: Option<f64>,
        pub cloud_area_fraction: Option<f64>,
        pub precipitation_amount: Option<f64>,
        pub wind_speed: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PeriodData {
        #[serde(default)]
        pub details: PeriodDetails,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct PeriodDetails {
        pub precipitation_amount: Option<f64>,
    }

    impl ForecastResponse {
        /// Current conditions from the first time step, defaulting missing fields
        pub fn into_observation(self) -> Result<WeatherObservation> {
            let step = self
                .properties
                .timeseries
                .into_iter()
                .next()
                .ok_or_else(|| SunshineError::weather("Response contains no timeseries"))?;

            let details = step.data.instant.details;

            // Precipitation is normally only published for the coming hour
            let precipitation = details.precipitation_amount.or_else(|| {
                step.data
                    .next_1_hours
                    .and_then(|period| period.details.precipitation_amount)
            });

            Ok(WeatherObservation {
                temperature: details
                    .air_temperature
                    .unwrap_or(WeatherObservation::DEFAULT_TEMPERATURE),
                cloud_coverage: details
                    .cloud_area_fraction
                    .unwrap_or(WeatherObservation::DEFAULT_CLOUD_COVERAGE),
                precipitation: precipitation.unwrap_or(WeatherObservation::DEFAULT_PRECIPITATION),
                wind_speed: details
                    .wind_speed
                    .unwrap_or(WeatherObservation::DEFAULT_WIND_SPEED),
                timestamp: step.time,
            })
        }
    }
}
