//! Named straight-line segments between two points.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::point::GeoPoint;
use crate::{Error, Result};

/// Heading reported by a zero-length segment, outside the valid `[0, 360)` range.
pub const HEADING_UNDEFINED: f64 = 360.0;

/// An immutable directed segment from `p1` to `p2`, part of a named feature
/// such as a street.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GeoSegment {
    name: Arc<str>,
    p1: GeoPoint,
    p2: GeoPoint,
}

impl GeoSegment {
    /// Create a segment, validating the name and the derived length and heading.
    pub fn new(name: impl Into<Arc<str>>, p1: GeoPoint, p2: GeoPoint) -> Result<Self> {
        let segment = Self {
            name: name.into(),
            p1,
            p2,
        };

        if segment.name.is_empty() {
            return Err(Error::InvalidSegment("name must not be empty".into()));
        }

        let length = segment.length();
        if length.is_nan() || length < 0.0 {
            return Err(Error::InvalidSegment(format!(
                "length must be >= 0, got {length}"
            )));
        }

        let heading = segment.heading();
        if !((0.0..360.0).contains(&heading) || (heading == HEADING_UNDEFINED && p1 == p2)) {
            return Err(Error::InvalidSegment(format!(
                "heading must be in [0, 360), got {heading}"
            )));
        }

        Ok(segment)
    }

    /// The same segment travelled in the opposite direction.
    pub fn reverse(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            p1: self.p2,
            p2: self.p1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn p1(&self) -> GeoPoint {
        self.p1
    }

    pub fn p2(&self) -> GeoPoint {
        self.p2
    }

    /// Length in kilometers.
    pub fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }

    /// Compass heading from `p1` to `p2` in degrees.
    ///
    /// A zero-length segment has no direction and reports
    /// [`HEADING_UNDEFINED`] instead.
    pub fn heading(&self) -> f64 {
        self.p1.heading_to(&self.p2).unwrap_or(HEADING_UNDEFINED)
    }
}

impl fmt::Display for GeoSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.name, self.p1, self.p2)
    }
}
