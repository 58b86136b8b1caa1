//! Sunshine search
//!
//! Looks up the current position, samples weather on the ring pattern around
//! it and ranks the samples by score. A failed weather lookup only drops that
//! one location; failing to get the current position aborts the search.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::SunshineConfig;
use crate::location_provider::LocationProvider;
use crate::models::{
    Coordinate, Location, ScoredLocation, SearchResult, WeatherAtLocation, WeatherObservation,
};
use crate::sampling::SamplingPattern;
use crate::scoring;
use crate::weather::WeatherProvider;
use crate::{Result, SunshineError};

/// A generated location paired with the outcome of its weather lookup
pub type SampleOutcome = (Location, Result<WeatherObservation>);

/// Upper bound on the number of locations a search reports
pub const MAX_BEST_LOCATIONS: usize = 5;

/// Search context: providers plus the sampling and ranking settings.
///
/// One instance serves any number of searches; it holds no per-search state.
pub struct SunshineFinder<L, W> {
    location_provider: Arc<L>,
    weather_provider: W,
    pattern: SamplingPattern,
    points_per_ring: usize,
    top_n: usize,
    default_radius_km: f64,
    max_concurrent_requests: usize,
}

impl<L, W> SunshineFinder<L, W>
where
    L: LocationProvider + 'static,
    W: WeatherProvider,
{
    /// Create a finder from the loaded configuration
    pub fn new(location_provider: L, weather_provider: W, config: &SunshineConfig) -> Self {
        Self {
            location_provider: Arc::new(location_provider),
            weather_provider,
            pattern: config.search.pattern(),
            points_per_ring: config.search.points_per_ring,
            top_n: config.search.top_n.clamp(1, MAX_BEST_LOCATIONS),
            default_radius_km: config.search.default_radius_km,
            max_concurrent_requests: config.weather.max_concurrent_requests.max(1),
        }
    }

    /// Create a finder with the built-in defaults
    pub fn with_defaults(location_provider: L, weather_provider: W) -> Self {
        Self::new(
            location_provider,
            weather_provider,
            &SunshineConfig::default(),
        )
    }

    /// Radius used when a caller does not name one
    #[must_use]
    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }

    /// Query the location provider.
    ///
    /// The provider may block, so it runs on the blocking thread pool.
    pub async fn current_location(&self) -> Result<Coordinate> {
        let provider = Arc::clone(&self.location_provider);

        tokio::task::spawn_blocking(move || provider.current_location())
            .await
            .map_err(|e| {
                SunshineError::location(format!("Location lookup did not complete: {e}"))
            })?
    }

    /// Find the best weather within `radius_km` of the current position
    pub async fn find_sunshine(&self, radius_km: f64) -> Result<SearchResult> {
        validate_radius(radius_km)?;

        let center = self.current_location().await?;
        info!("Current location: {}", center.format_coordinates());

        Ok(self.find_sunshine_around(center, radius_km).await)
    }

    /// Search around an explicit center
    pub async fn find_sunshine_around(&self, center: Coordinate, radius_km: f64) -> SearchResult {
        let locations = self
            .pattern
            .generate(center, radius_km, self.points_per_ring);
        let total_attempted = locations.len();
        info!("Checking weather at {} locations...", total_attempted);

        let outcomes = self.sample(locations).await;
        let scored = score_outcomes(outcomes);
        let total_checked = scored.len();

        info!(
            "Scored {}/{} locations within {}km",
            total_checked, total_attempted, radius_km
        );

        SearchResult {
            current_location: center,
            best_locations: rank(scored, self.top_n),
            total_checked,
            total_attempted,
            generated_at: Utc::now(),
        }
    }

    /// Fetch weather for every location, keeping generation order.
    ///
    /// Completes only after every lookup has settled.
    pub async fn sample(&self, locations: Vec<Location>) -> Vec<SampleOutcome> {
        stream::iter(locations)
            .map(|location| async move {
                let result = self.weather_provider.fetch(location.coordinate).await;
                (location, result)
            })
            .buffered(self.max_concurrent_requests)
            .collect()
            .await
    }

    /// Weather and score at one coordinate
    pub async fn weather_at(&self, coordinate: Coordinate) -> Result<WeatherAtLocation> {
        if !coordinate.is_finite() {
            return Err(SunshineError::validation(
                "Latitude and longitude must be finite numbers",
            ));
        }

        let weather = self.weather_provider.fetch(coordinate).await?;
        let score = scoring::score(&weather);

        Ok(WeatherAtLocation {
            location: coordinate,
            weather,
            score,
        })
    }
}

/// Score the successful samples and drop the failed ones
#[must_use]
pub fn score_outcomes(outcomes: Vec<SampleOutcome>) -> Vec<ScoredLocation> {
    let total = outcomes.len();

    outcomes
        .into_iter()
        .enumerate()
        .filter_map(|(i, (location, result))| match result {
            Ok(weather) => {
                let score = scoring::score(&weather);
                debug!("{}/{}: {} - Score: {}", i + 1, total, location.name, score);
                Some(ScoredLocation {
                    location,
                    weather,
                    score,
                })
            }
            Err(e) => {
                warn!("{}/{}: {} - Error: {}", i + 1, total, location.name, e);
                None
            }
        })
        .collect()
}

/// Order by score, highest first, and keep the first `top_n`.
///
/// The sort is stable, so equal scores keep their generation order.
#[must_use]
pub fn rank(mut scored: Vec<ScoredLocation>, top_n: usize) -> Vec<ScoredLocation> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_n);
    scored
}

fn validate_radius(radius_km: f64) -> Result<()> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(SunshineError::validation(format!(
            "Radius must be a non-negative number of kilometres, got: {radius_km}"
        )));
    }
    Ok(())
}
