//! Weather provider seam
//!
//! The finder only needs the current conditions at one coordinate. Any
//! failure is reported as [`SunshineError::Weather`](crate::SunshineError) so
//! the caller can drop that one location and carry on.

use async_trait::async_trait;

use crate::Result;
use crate::models::{Coordinate, WeatherObservation};

pub mod met_no;

pub use met_no::MetNoClient;

/// Source of current weather conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch the current observation for one coordinate
    async fn fetch(&self, coordinate: Coordinate) -> Result<WeatherObservation>;
}
