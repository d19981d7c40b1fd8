//! Geographic points and flat-earth distance/heading computations.
//!
//! Coordinates are stored as integer millionths of a degree. Distances
//! use a local planar approximation with fixed km-per-degree scale
//! factors, which is only accurate near the region the constants were
//! measured for.

use std::fmt;

use serde::Serialize;

use crate::{Error, Result};

pub const MIN_LATITUDE: i32 = -90 * 1_000_000;
pub const MAX_LATITUDE: i32 = 90 * 1_000_000;
pub const MIN_LONGITUDE: i32 = -180 * 1_000_000;
pub const MAX_LONGITUDE: i32 = 180 * 1_000_000;

/// Kilometers per degree of latitude in the local approximation.
pub const KM_PER_DEGREE_LATITUDE: f64 = 110.901;
/// Kilometers per degree of longitude in the local approximation.
pub const KM_PER_DEGREE_LONGITUDE: f64 = 93.681;

const MILLIONTHS: f64 = 1_000_000.0;

/// An immutable point on earth, in millionths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GeoPoint {
    latitude: i32,
    longitude: i32,
}

impl GeoPoint {
    /// Create a point from millionths of a degree.
    ///
    /// Fails with [`Error::PointOutOfRange`] rather than clamping.
    pub fn new(latitude: i32, longitude: i32) -> Result<Self> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude)
            || !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
        {
            return Err(Error::PointOutOfRange {
                latitude: latitude as f64 / MILLIONTHS,
                longitude: longitude as f64 / MILLIONTHS,
            });
        }
        Ok(Self { latitude, longitude })
    }

    /// Create a point from decimal degrees, rounded to the nearest millionth.
    ///
    /// The range check applies to the raw degrees, so a value just past a
    /// bound fails instead of rounding onto it.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self> {
        let min_lat = MIN_LATITUDE as f64 / MILLIONTHS;
        let max_lat = MAX_LATITUDE as f64 / MILLIONTHS;
        let min_lon = MIN_LONGITUDE as f64 / MILLIONTHS;
        let max_lon = MAX_LONGITUDE as f64 / MILLIONTHS;

        if !(min_lat..=max_lat).contains(&latitude) || !(min_lon..=max_lon).contains(&longitude) {
            return Err(Error::PointOutOfRange { latitude, longitude });
        }

        let lat = (latitude * MILLIONTHS).round() as i32;
        let lon = (longitude * MILLIONTHS).round() as i32;
        Self::new(lat, lon)
    }

    pub fn latitude(&self) -> i32 {
        self.latitude
    }

    pub fn longitude(&self) -> i32 {
        self.longitude
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude as f64 / MILLIONTHS
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude as f64 / MILLIONTHS
    }

    /// Planar distance to another point in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let (dlat_km, dlon_km) = self.delta_km(other);
        dlat_km.hypot(dlon_km)
    }

    /// Compass heading toward another point in degrees, in `[0, 360)`.
    ///
    /// 0 is north and 90 is east. There is no heading between a point
    /// and itself, so identical points yield [`Error::UndefinedHeading`].
    pub fn heading_to(&self, other: &GeoPoint) -> Result<f64> {
        if self == other {
            return Err(Error::UndefinedHeading);
        }

        let (dlat_km, dlon_km) = self.delta_km(other);
        let heading = dlon_km.atan2(dlat_km).to_degrees();
        Ok(if heading < 0.0 { heading + 360.0 } else { heading })
    }

    /// Latitude and longitude offsets toward `other`, in kilometers.
    fn delta_km(&self, other: &GeoPoint) -> (f64, f64) {
        let dlat = (other.latitude - self.latitude) as f64;
        let dlon = (other.longitude - self.longitude) as f64;
        (
            dlat * KM_PER_DEGREE_LATITUDE / MILLIONTHS,
            dlon * KM_PER_DEGREE_LONGITUDE / MILLIONTHS,
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
