//! Named geographic segments, routes built from them, and turn-by-turn
//! directions rendered from a route.
//!
//! Values are immutable: appending to a [`GeoFeature`] or [`Route`]
//! returns a new value and leaves the receiver untouched.

pub mod feature;
pub mod gpx;
pub mod point;
pub mod route;
pub mod route_nav;
pub mod segment;

pub use feature::GeoFeature;
pub use point::GeoPoint;
pub use route::Route;
pub use route_nav::{DrivingRouteFormatter, Instruction, RouteFormatter, Turn};
pub use segment::GeoSegment;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised while building or exporting route values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("point out of range: ({latitude}, {longitude})")]
    PointOutOfRange { latitude: f64, longitude: f64 },

    #[error("invalid segment: {0}")]
    InvalidSegment(String),

    #[error("contract violation: {0}")]
    ContractViolation(String),

    #[error("heading between identical points is undefined")]
    UndefinedHeading,

    #[error("empty route")]
    EmptyRoute,

    #[error("GPX parse error: {0}")]
    Gpx(#[from] ::gpx::errors::GpxError),

    #[error("JSON serialize error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn values_are_shareable_across_threads() {
        assert_send_sync::<GeoPoint>();
        assert_send_sync::<GeoSegment>();
        assert_send_sync::<GeoFeature>();
        assert_send_sync::<Route>();
    }

    #[test]
    fn error_messages_are_readable() {
        let err = Error::ContractViolation("segment does not start at (0, 0)".into());
        assert_eq!(
            err.to_string(),
            "contract violation: segment does not start at (0, 0)"
        );
        assert_eq!(Error::EmptyRoute.to_string(), "empty route");
    }
}
