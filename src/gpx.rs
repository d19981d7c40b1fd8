//! GPX 1.1 segment source.
//!
//! Wraps the `gpx` crate and turns named GPX routes and tracks into
//! [`GeoSegment`]s. Every `<rte>` or `<trk>` is treated as one named
//! feature, so its `<name>` names each segment between consecutive
//! points. Routes come first, then tracks, each in file order.

use std::io::Read;

use crate::point::GeoPoint;
use crate::route::Route;
use crate::segment::GeoSegment;
use crate::{Error, Result};

/// Read all segments from a GPX document.
pub fn segments_from_gpx<R: Read>(reader: R) -> Result<Vec<GeoSegment>> {
    let gpx = gpx::read(reader)?;

    let routes = gpx
        .routes
        .iter()
        .map(|r| (r.name.as_deref(), r.points.iter().collect::<Vec<_>>()));
    let tracks = gpx.tracks.iter().map(|t| {
        let points = t
            .segments
            .iter()
            .flat_map(|seg| seg.points.iter())
            .collect::<Vec<_>>();
        (t.name.as_deref(), points)
    });

    let mut segments = Vec::new();
    for (name, waypoints) in routes.chain(tracks) {
        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => {
                return Err(Error::InvalidSegment(
                    "GPX route or track has no name".into(),
                ))
            }
        };

        if waypoints.len() < 2 {
            log::warn!("Skipping '{name}': fewer than two points");
            continue;
        }

        let points = waypoints
            .iter()
            .map(|wp| GeoPoint::from_degrees(wp.point().y(), wp.point().x()))
            .collect::<Result<Vec<_>>>()?;

        for pair in points.windows(2) {
            segments.push(GeoSegment::new(name, pair[0], pair[1])?);
        }
    }

    log::info!("Parsed {} segments from GPX", segments.len());
    Ok(segments)
}

/// Read a GPX document and chain all of its segments into one route.
///
/// Fails with [`Error::EmptyRoute`] when the document holds no segments
/// and with [`Error::ContractViolation`] when consecutive segments do not
/// connect.
pub fn route_from_gpx<R: Read>(reader: R) -> Result<Route> {
    Route::from_segments(segments_from_gpx(reader)?)
}
