//! Routes: connected chains of segments with arbitrary names.
//!
//! A route is stored as its raw segment sequence. The feature view is
//! derived on demand by grouping consecutive segments that share a
//! name, so two routes compare equal when their feature partitions do.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::feature::GeoFeature;
use crate::point::GeoPoint;
use crate::segment::GeoSegment;
use crate::{Error, Result};

/// A non-empty chain of connected segments, appendable only at the tail.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    segments: Vec<GeoSegment>,
    length: f64,
}

impl Route {
    /// Create a route holding a single segment.
    pub fn new(segment: GeoSegment) -> Self {
        let length = segment.length();
        Self {
            segments: vec![segment],
            length,
        }
    }

    /// Build a route from a sequence of connected segments.
    ///
    /// Returns [`Error::EmptyRoute`] for an empty sequence and
    /// [`Error::ContractViolation`] at the first gap between segments.
    pub fn from_segments<I>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = GeoSegment>,
    {
        let mut iter = segments.into_iter();
        let first = iter.next().ok_or(Error::EmptyRoute)?;

        let mut route = Self::new(first);
        for segment in iter {
            if segment.p1() != route.end() {
                return Err(discontinuity(&segment, route.end()));
            }
            route.length += segment.length();
            route.segments.push(segment);
        }

        log::debug!(
            "Built route from {} segments, {:.3} km",
            route.segments.len(),
            route.length
        );
        Ok(route)
    }

    /// Append a segment, returning the extended route.
    ///
    /// The segment must start where this route ends; its name is free.
    pub fn try_add_segment(&self, segment: GeoSegment) -> Result<Self> {
        if segment.p1() != self.end() {
            return Err(discontinuity(&segment, self.end()));
        }

        let length = self.length + segment.length();
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Ok(Self { segments, length })
    }

    /// Append a segment, panicking if it does not start at the route end.
    pub fn add_segment(&self, segment: GeoSegment) -> Self {
        match self.try_add_segment(segment) {
            Ok(route) => route,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn start(&self) -> GeoPoint {
        self.segments[0].p1()
    }

    pub fn end(&self) -> GeoPoint {
        self.segments[self.segments.len() - 1].p2()
    }

    pub fn start_heading(&self) -> f64 {
        self.segments[0].heading()
    }

    pub fn end_heading(&self) -> f64 {
        self.segments[self.segments.len() - 1].heading()
    }

    /// Total length in kilometers.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Raw segments in travel order.
    pub fn geo_segments(&self) -> std::slice::Iter<'_, GeoSegment> {
        self.segments.iter()
    }

    /// Features of this route in travel order.
    ///
    /// Each call walks the segments afresh. Adjacent features never share
    /// a name, and their segments concatenated give back the route's
    /// segments exactly.
    pub fn geo_features(&self) -> GeoFeatures<'_> {
        GeoFeatures {
            remaining: &self.segments,
        }
    }
}

fn discontinuity(segment: &GeoSegment, end: GeoPoint) -> Error {
    Error::ContractViolation(format!(
        "segment {segment} does not start at route end {end}"
    ))
}

/// Iterator over the features of a [`Route`], produced lazily one
/// maximal same-name run at a time.
#[derive(Debug, Clone)]
pub struct GeoFeatures<'a> {
    remaining: &'a [GeoSegment],
}

impl Iterator for GeoFeatures<'_> {
    type Item = GeoFeature;

    fn next(&mut self) -> Option<GeoFeature> {
        let name = self.remaining.first()?.name();
        let run_len = self
            .remaining
            .iter()
            .take_while(|s| s.name() == name)
            .count();

        let (run, rest) = self.remaining.split_at(run_len);
        self.remaining = rest;
        Some(GeoFeature::from_run(run))
    }
}

impl std::iter::FusedIterator for GeoFeatures<'_> {}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.geo_features().eq(other.geo_features())
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for feature in self.geo_features() {
            feature.hash(state);
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.geo_features().map(|gf| gf.to_string()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
