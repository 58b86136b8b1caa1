//! Ring-based sampling pattern around a center coordinate
//!
//! The pattern starts with the center itself and adds evenly spaced points on
//! concentric rings of fixed radii. Offsets use an equirectangular
//! approximation (~111 km per degree), which holds for radii up to a few
//! hundred kilometres. Close to the poles the longitude offset diverges since
//! `cos(latitude)` approaches zero; callers searching there get unusable
//! longitudes.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::models::{Coordinate, Location};

/// Approximate kilometres per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.0;

/// Ring radii in ascending order, kilometres
pub const DEFAULT_RING_RADII_KM: [f64; 4] = [25.0, 50.0, 75.0, 100.0];

/// Lower bound for points on one ring
pub const DEFAULT_MIN_POINTS_PER_RING: usize = 4;

/// Requested density is divided by this before being applied to a ring
pub const POINTS_DENSITY_DIVISOR: usize = 4;

/// Density requested when the caller does not choose one
pub const DEFAULT_POINTS_PER_RING: usize = 16;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Tunable constants of the sampling pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingPattern {
    /// Ring radii in km, ascending
    pub ring_radii_km: Vec<f64>,
    /// Lower bound for points on one ring
    pub min_points_per_ring: usize,
}

impl Default for SamplingPattern {
    fn default() -> Self {
        Self {
            ring_radii_km: DEFAULT_RING_RADII_KM.to_vec(),
            min_points_per_ring: DEFAULT_MIN_POINTS_PER_RING,
        }
    }
}

impl SamplingPattern {
    #[must_use]
    pub fn new(ring_radii_km: Vec<f64>, min_points_per_ring: usize) -> Self {
        Self {
            ring_radii_km,
            min_points_per_ring,
        }
    }

    /// Points placed on each ring for a requested density.
    ///
    /// The density is floored by [`POINTS_DENSITY_DIVISOR`], so anything up to
    /// 16 yields the minimum of 4 points per ring.
    #[must_use]
    pub fn points_in_ring(&self, points_per_ring: usize) -> usize {
        self.min_points_per_ring
            .max(points_per_ring / POINTS_DENSITY_DIVISOR)
    }

    /// Generate the ordered candidate list: center first, then each ring in
    /// ascending radius, stopping at the first ring larger than `radius_km`.
    #[must_use]
    pub fn generate(
        &self,
        center: Coordinate,
        radius_km: f64,
        points_per_ring: usize,
    ) -> Vec<Location> {
        let mut locations = vec![Location::center(center)];

        let count = self.points_in_ring(points_per_ring);
        let lon_scale = KM_PER_DEGREE * center.lat.to_radians().cos();

        for &ring_radius in &self.ring_radii_km {
            if ring_radius > radius_km {
                break;
            }

            for i in 0..count {
                let angle = 2.0 * PI * i as f64 / count as f64;

                let lat_offset = (ring_radius / KM_PER_DEGREE) * angle.cos();
                let lon_offset = (ring_radius / lon_scale) * angle.sin();

                let coordinate = Coordinate::new(center.lat + lat_offset, center.lon + lon_offset);
                let name = format!("{}km {}", ring_radius, compass_label(angle));

                locations.push(Location::new(coordinate, name, ring_radius));
            }
        }

        locations
    }
}

/// Generate locations with the default pattern
#[must_use]
pub fn generate(center: Coordinate, radius_km: f64, points_per_ring: usize) -> Vec<Location> {
    SamplingPattern::default().generate(center, radius_km, points_per_ring)
}

/// Nearest 8-point compass direction for a bearing in radians (0 = north, clockwise)
fn compass_label(bearing: f64) -> &'static str {
    let sector = (bearing / (PI / 4.0)).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

#[cfg(test)]
mod tests {
    use super::*;
    use haversine::{Location as HaversineLocation, Units, distance};
    use rstest::rstest;

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0)
    }

    #[rstest]
    #[case(100.0, 17)]
    #[case(99.0, 13)]
    #[case(75.0, 13)]
    #[case(50.0, 9)]
    #[case(25.0, 5)]
    #[case(24.9, 1)]
    #[case(10.0, 1)]
    #[case(0.0, 1)]
    #[case(500.0, 17)]
    fn test_location_count_by_radius(#[case] radius_km: f64, #[case] expected: usize) {
        let locations = generate(origin(), radius_km, DEFAULT_POINTS_PER_RING);
        assert_eq!(locations.len(), expected);
    }

    #[test]
    fn test_center_is_first() {
        let center = Coordinate::new(52.0, 5.0);
        let locations = generate(center, 100.0, DEFAULT_POINTS_PER_RING);

        assert_eq!(locations[0].name, "Current Location");
        assert_eq!(locations[0].distance_km, 0.0);
        assert_eq!(locations[0].coordinate, center);
    }

    #[rstest]
    #[case(0, 4)]
    #[case(4, 4)]
    #[case(16, 4)]
    #[case(19, 4)]
    #[case(20, 5)]
    #[case(32, 8)]
    fn test_points_in_ring_floors_density(#[case] requested: usize, #[case] expected: usize) {
        assert_eq!(SamplingPattern::default().points_in_ring(requested), expected);
    }

    #[test]
    fn test_rings_in_ascending_order() {
        let locations = generate(origin(), 100.0, DEFAULT_POINTS_PER_RING);
        let distances: Vec<f64> = locations.iter().map(|l| l.distance_km).collect();
        assert_eq!(
            distances,
            vec![
                0.0, 25.0, 25.0, 25.0, 25.0, 50.0, 50.0, 50.0, 50.0, 75.0, 75.0, 75.0, 75.0,
                100.0, 100.0, 100.0, 100.0
            ]
        );
    }

    #[test]
    fn test_four_point_ring_labels_follow_bearing() {
        let locations = generate(origin(), 25.0, DEFAULT_POINTS_PER_RING);
        let names: Vec<&str> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Current Location", "25km N", "25km E", "25km S", "25km W"]
        );
    }

    #[test]
    fn test_eight_point_ring_labels_cycle_compass() {
        let locations = generate(origin(), 25.0, 32);
        let names: Vec<&str> = locations[1..].iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "25km N", "25km NE", "25km E", "25km SE", "25km S", "25km SW", "25km W", "25km NW"
            ]
        );
    }

    #[test]
    fn test_equirectangular_offsets_at_equator() {
        let locations = generate(origin(), 25.0, DEFAULT_POINTS_PER_RING);
        let north = locations[1].coordinate;
        let east = locations[2].coordinate;

        assert!((north.lat - 25.0 / 111.0).abs() < 1e-12);
        assert!(north.lon.abs() < 1e-12);
        assert!(east.lat.abs() < 1e-12);
        assert!((east.lon - 25.0 / 111.0).abs() < 1e-12);
    }

    #[test]
    fn test_longitude_offset_widens_with_latitude() {
        let center = Coordinate::new(60.0, 10.0);
        let locations = generate(center, 25.0, DEFAULT_POINTS_PER_RING);
        let east = locations[2].coordinate;

        // cos(60°) = 0.5, so one ring step spans twice the longitude
        assert!((east.lon - 10.0 - 2.0 * 25.0 / 111.0).abs() < 1e-9);
    }

    #[test]
    fn test_points_lie_on_their_ring() {
        fn to_haversine(coordinate: Coordinate) -> HaversineLocation {
            HaversineLocation {
                latitude: coordinate.lat,
                longitude: coordinate.lon,
            }
        }

        let center = Coordinate::new(52.0, 5.0);

        for location in generate(center, 100.0, DEFAULT_POINTS_PER_RING).iter().skip(1) {
            let km = distance(
                to_haversine(center),
                to_haversine(location.coordinate),
                Units::Kilometers,
            );
            let error = (km - location.distance_km).abs() / location.distance_km;
            assert!(error < 0.02, "{} is {km:.2} km away", location.name);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let center = Coordinate::new(47.37, 8.54);
        assert_eq!(
            generate(center, 100.0, DEFAULT_POINTS_PER_RING),
            generate(center, 100.0, DEFAULT_POINTS_PER_RING)
        );
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = SamplingPattern::new(vec![10.0, 20.0], 6);
        let locations = pattern.generate(origin(), 15.0, DEFAULT_POINTS_PER_RING);
        assert_eq!(locations.len(), 7);
        assert!(locations[1..].iter().all(|l| l.distance_km == 10.0));
    }

    #[test]
    fn test_polar_center_yields_degenerate_longitudes() {
        let locations = generate(Coordinate::new(90.0, 0.0), 25.0, DEFAULT_POINTS_PER_RING);
        let east = locations[2].coordinate;
        assert!(east.lon.abs() > 1e6 || !east.lon.is_finite());
    }
}
