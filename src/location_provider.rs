//! Current position lookup
//!
//! The search center comes from an external program (CoreLocationCLI on
//! macOS by default) or from a fixed coordinate in the configuration. Any
//! failure here is fatal for a search.

use std::process::Command;

use tracing::debug;

use crate::config::LocationConfig;
use crate::models::Coordinate;
use crate::{Result, SunshineError};

/// Source of the current position
pub trait LocationProvider: Send + Sync {
    /// Query the current position once
    fn current_location(&self) -> Result<Coordinate>;
}

/// Runs a command that prints `<latitude> <longitude>` on stdout
#[derive(Debug, Clone)]
pub struct CommandLocationProvider {
    program: String,
    args: Vec<String>,
}

impl CommandLocationProvider {
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl LocationProvider for CommandLocationProvider {
    fn current_location(&self) -> Result<Coordinate> {
        debug!("Running location command: {} {:?}", self.program, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| SunshineError::location(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SunshineError::location(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let coordinate = parse_coordinates(&stdout)?;

        debug!("Resolved current location: {}", coordinate.format_coordinates());
        Ok(coordinate)
    }
}

/// Always reports the same coordinate
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    coordinate: Coordinate,
}

impl FixedLocationProvider {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl LocationProvider for FixedLocationProvider {
    fn current_location(&self) -> Result<Coordinate> {
        Ok(self.coordinate)
    }
}

/// Location provider selected by configuration
#[derive(Debug, Clone)]
pub enum ConfiguredLocationProvider {
    Command(CommandLocationProvider),
    Fixed(FixedLocationProvider),
}

impl ConfiguredLocationProvider {
    #[must_use]
    pub fn from_config(config: &LocationConfig) -> Self {
        match config.fixed {
            Some(coordinate) => Self::Fixed(FixedLocationProvider::new(coordinate)),
            None => Self::Command(CommandLocationProvider::new(
                config.command.clone(),
                config.args.clone(),
            )),
        }
    }
}

impl LocationProvider for ConfiguredLocationProvider {
    fn current_location(&self) -> Result<Coordinate> {
        match self {
            Self::Command(provider) => provider.current_location(),
            Self::Fixed(provider) => provider.current_location(),
        }
    }
}

/// Parse `"<lat> <lon>"` as printed by the location command
pub fn parse_coordinates(output: &str) -> Result<Coordinate> {
    let parts: Vec<&str> = output.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(SunshineError::location(format!(
            "Expected '<latitude> <longitude>', got: '{}'",
            output.trim()
        )));
    }

    let lat = parts[0]
        .parse::<f64>()
        .map_err(|e| SunshineError::location(format!("Invalid latitude '{}': {e}", parts[0])))?;
    let lon = parts[1]
        .parse::<f64>()
        .map_err(|e| SunshineError::location(format!("Invalid longitude '{}': {e}", parts[1])))?;

    let coordinate = Coordinate::new(lat, lon);
    if !coordinate.is_finite() {
        return Err(SunshineError::location(format!(
            "Coordinates must be finite, got: {lat} {lon}"
        )));
    }

    Ok(coordinate)
}
