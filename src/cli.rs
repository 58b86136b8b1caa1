//! Command-line surface
//!
//! Argument model plus the human-readable renderings. JSON output is the
//! serde form of the same results.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::models::{Coordinate, SearchResult, WeatherAtLocation, WeatherObservation};
use crate::scoring::SubScores;

const RULE_WIDTH: usize = 40;

/// Find locations with good weather/sunshine within a specified radius.
#[derive(Debug, Parser)]
#[command(name = "sunshine-finder", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Search radius in kilometers [default: 100]
    #[arg(long)]
    pub radius: Option<f64>,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Path to a TOML configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show weather and score for one coordinate
    Weather {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Print the current location
    Locate,
    /// Run the tool server on stdin/stdout, or over HTTP with --http
    Serve {
        /// Listen on this port instead of stdio
        #[arg(long)]
        http: Option<u16>,
    },
}

impl Cli {
    /// Radius from the command line, falling back to the configured default
    #[must_use]
    pub fn radius_or(&self, default_radius_km: f64) -> f64 {
        self.radius.unwrap_or(default_radius_km)
    }
}

/// Pretty-printed JSON for any result type
pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

/// Human-readable search report
#[must_use]
pub fn render_search(result: &SearchResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n🌞 Sunshine Finder Results 🌞");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "Current Location: {}",
        result.current_location.format_coordinates()
    );
    let _ = writeln!(out, "Locations checked: {}", result.total_checked);
    if result.total_failed() > 0 {
        let _ = writeln!(out, "Locations unavailable: {}", result.total_failed());
    }

    if result.best_locations.is_empty() {
        let _ = writeln!(out, "\nNo weather data could be retrieved.");
        return out;
    }

    let _ = writeln!(
        out,
        "\n🏆 Top {} Best Weather Locations:",
        result.best_locations.len()
    );

    for (i, scored) in result.best_locations.iter().enumerate() {
        let location = &scored.location;
        let _ = writeln!(
            out,
            "\n{}. {} (Score: {}/100)",
            i + 1,
            location.name,
            scored.score
        );
        let _ = writeln!(out, "   📍 {}", location.format_coordinates());
        if !location.is_center() {
            let _ = writeln!(out, "   📏 Distance: {}km", location.distance_km);
        }
        write_weather(&mut out, &scored.weather);
    }

    out
}

/// Human-readable single-coordinate report
#[must_use]
pub fn render_weather(report: &WeatherAtLocation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "📍 {} (Score: {}/100)",
        report.location.format_coordinates(),
        report.score
    );
    write_weather(&mut out, &report.weather);
    write_breakdown(&mut out, &SubScores::from_weather(&report.weather));
    let _ = writeln!(out, "   🕒 Observed: {}", report.weather.timestamp);
    out
}

#[must_use]
pub fn render_location(coordinate: &Coordinate) -> String {
    format!("Current Location: {}\n", coordinate.format_coordinates())
}

fn write_weather(out: &mut String, weather: &WeatherObservation) {
    let _ = writeln!(out, "   🌡️  Temperature: {}", weather.format_temperature());
    let _ = writeln!(
        out,
        "   ☁️  Cloud coverage: {}",
        weather.format_cloud_coverage()
    );
    let _ = writeln!(
        out,
        "   🌧️  Precipitation: {}",
        weather.format_precipitation()
    );
    let _ = writeln!(out, "   💨 Wind speed: {}", weather.format_wind());
}

fn write_breakdown(out: &mut String, sub: &SubScores) {
    let _ = writeln!(
        out,
        "   📊 Breakdown: temperature {:.0}, cloud {:.0}, precipitation {:.0}, wind {:.0}",
        sub.temperature, sub.cloud, sub.precipitation, sub.wind
    );
}
