// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Distances between sites.
//!
//! The exact distance is the orthodrome on a reference ellipsoid, solved with
//! Karney's geodesic algorithms.  The approximate distance treats a small
//! patch of the earth as planar, which is only meaningful for sites a few
//! hundred kilometers apart at most.

use geographiclib_rs::{Geodesic, InverseGeodesic};

use crate::Coordinate;

/// Reference ellipsoids supported by [`orthodrome_distance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ellipsoid {
    #[default]
    Wgs84,
    Grs80,
    Airy1830,
    Intl1924,
    Clarke1880,
    Grs67,
}

impl Ellipsoid {
    /// Returns the semi-major axis in km and the flattening of the ellipsoid.
    pub fn parameters(&self) -> (f64, f64) {
        match self {
            Ellipsoid::Wgs84 => (6378.137, 1.0 / 298.257223563),
            Ellipsoid::Grs80 => (6378.137, 1.0 / 298.257222101),
            Ellipsoid::Airy1830 => (6377.563396, 1.0 / 299.3249646),
            Ellipsoid::Intl1924 => (6378.388, 1.0 / 297.0),
            Ellipsoid::Clarke1880 => (6378.249145, 1.0 / 293.465),
            Ellipsoid::Grs67 => (6378.160, 1.0 / 298.25),
        }
    }
}

/// How [`find_neighbours`][crate::find_neighbours] measures the distance
/// between a source and a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceMethod {
    /// Geodesic distance on the given ellipsoid.
    Orthodrome(Ellipsoid),
    /// Planar small-angle approximation.
    SmallAngle,
}

impl Default for DistanceMethod {
    fn default() -> Self {
        DistanceMethod::Orthodrome(Ellipsoid::default())
    }
}

impl DistanceMethod {
    /// Returns the distance between `from` and `to` in km.
    pub fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        match self {
            DistanceMethod::Orthodrome(ellipsoid) => orthodrome_distance(from, to, *ellipsoid),
            DistanceMethod::SmallAngle => approximate_distance(from, to),
        }
    }
}

/// Returns the geodesic distance between two points on `ellipsoid` in km.
///
/// Converges for every pair of points, including nearly antipodal ones.
pub fn orthodrome_distance(from: Coordinate, to: Coordinate, ellipsoid: Ellipsoid) -> f64 {
    let (a, f) = ellipsoid.parameters();
    let geodesic = Geodesic::new(a * 1000.0, f);
    let meters: f64 = geodesic.inverse(from.latitude, from.longitude, to.latitude, to.longitude);

    meters / 1000.0
}

/// Returns the small-angle approximation of the distance between two points
/// in km.
///
/// Longitude differences are scaled by the cosine of the mean latitude, and
/// the resulting angle is measured on a sphere with the WGS-84 equatorial
/// radius.
pub fn approximate_distance(from: Coordinate, to: Coordinate) -> f64 {
    let (radius, _) = Ellipsoid::Wgs84.parameters();
    let mean_latitude = ((from.latitude + to.latitude) / 2.0).to_radians();
    let dx = wrap_longitude(to.longitude - from.longitude).to_radians() * mean_latitude.cos();
    let dy = (to.latitude - from.latitude).to_radians();

    radius * (dx * dx + dy * dy).sqrt()
}

/// Maps a longitude difference into `[-180, 180]`.
fn wrap_longitude(delta: f64) -> f64 {
    let wrapped = (delta + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && delta > 0.0 {
        180.0
    } else {
        wrapped
    }
}
