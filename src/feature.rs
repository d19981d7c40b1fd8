//! Geographic features: contiguous runs of same-named segments.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::point::GeoPoint;
use crate::segment::GeoSegment;
use crate::{Error, Result};

/// A non-empty chain of connected segments sharing one name, such as
/// the stretch of a street between two turns.
///
/// Features only grow at the tail and every append returns a new value.
/// The total length is accumulated on append rather than recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct GeoFeature {
    segments: Vec<GeoSegment>,
    length: f64,
}

impl GeoFeature {
    /// Create a feature holding a single segment.
    pub fn new(segment: GeoSegment) -> Self {
        let length = segment.length();
        Self {
            segments: vec![segment],
            length,
        }
    }

    /// Build a feature from a run that is already known to be connected
    /// and uniformly named.
    pub(crate) fn from_run(run: &[GeoSegment]) -> Self {
        debug_assert!(!run.is_empty());
        Self {
            segments: run.to_vec(),
            length: run.iter().map(GeoSegment::length).sum(),
        }
    }

    /// Append a segment, returning the extended feature.
    ///
    /// The segment must start where this feature ends and carry the
    /// same name.
    pub fn try_add_segment(&self, segment: GeoSegment) -> Result<Self> {
        if segment.p1() != self.end() {
            return Err(Error::ContractViolation(format!(
                "segment {segment} does not start at feature end {}",
                self.end()
            )));
        }
        if segment.name() != self.name() {
            return Err(Error::ContractViolation(format!(
                "segment {segment} does not belong to feature {}",
                self.name()
            )));
        }

        let length = self.length + segment.length();
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Ok(Self { segments, length })
    }

    /// Append a segment, panicking if it does not continue this feature.
    ///
    /// Use [`GeoFeature::try_add_segment`] when the segment comes from
    /// untrusted input.
    pub fn add_segment(&self, segment: GeoSegment) -> Self {
        match self.try_add_segment(segment) {
            Ok(feature) => feature,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn name(&self) -> &str {
        self.first().name()
    }

    pub fn start(&self) -> GeoPoint {
        self.first().p1()
    }

    pub fn end(&self) -> GeoPoint {
        self.last().p2()
    }

    pub fn start_heading(&self) -> f64 {
        self.first().heading()
    }

    pub fn end_heading(&self) -> f64 {
        self.last().heading()
    }

    /// Total length in kilometers.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Segments of this feature in travel order.
    pub fn geo_segments(&self) -> std::slice::Iter<'_, GeoSegment> {
        self.segments.iter()
    }

    fn first(&self) -> &GeoSegment {
        &self.segments[0]
    }

    fn last(&self) -> &GeoSegment {
        &self.segments[self.segments.len() - 1]
    }
}

impl PartialEq for GeoFeature {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for GeoFeature {}

impl Hash for GeoFeature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl fmt::Display for GeoFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
