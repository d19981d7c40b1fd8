//! Turn-by-turn directions for a route.
//!
//! Walks the features of a [`Route`] in order, classifies the heading
//! change at the start of each feature into a turn, and renders one
//! instruction line per feature.

use serde::Serialize;

use crate::feature::GeoFeature;
use crate::route::Route;
use crate::Result;

/// Heading changes below this many degrees read as "Continue".
pub const SLIGHT_TURN_MIN: f64 = 10.0;
/// Heading changes from here on are regular turns.
pub const TURN_MIN: f64 = 60.0;
/// Heading changes from here on are sharp turns.
pub const SHARP_TURN_MIN: f64 = 120.0;
/// Heading changes from here on are U-turns.
pub const U_TURN_MIN: f64 = 179.0;

/// A single turn-by-turn instruction, one per route feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    /// Index of the feature in the route (0-based).
    pub feature_index: usize,
    /// Name of the feature to travel along.
    pub name: String,
    /// Turn needed to enter the feature.
    pub turn: Turn,
    /// Length of the feature in kilometers.
    pub distance_km: f64,
    /// Human-readable instruction text, without a line terminator.
    pub text: String,
}

/// Turn direction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Continue,
    SlightLeft,
    Left,
    SharpLeft,
    SlightRight,
    Right,
    SharpRight,
    UTurn,
}

impl Turn {
    /// Classify the turn from one heading onto another, both in degrees.
    pub fn between(orig_heading: f64, new_heading: f64) -> Self {
        classify_turn(relative_angle(orig_heading, new_heading))
    }

    /// The phrase that opens an instruction line for this turn.
    pub fn phrase(self) -> &'static str {
        match self {
            Turn::Continue => "Continue",
            Turn::SlightLeft => "Turn slight left",
            Turn::Left => "Turn left",
            Turn::SharpLeft => "Turn sharp left",
            Turn::SlightRight => "Turn slight right",
            Turn::Right => "Turn right",
            Turn::SharpRight => "Turn sharp right",
            Turn::UTurn => "U-turn",
        }
    }
}

/// Describe the turn from `orig_heading` onto `new_heading`,
/// e.g. "Turn slight right".
pub fn turn_phrase(orig_heading: f64, new_heading: f64) -> &'static str {
    Turn::between(orig_heading, new_heading).phrase()
}

/// Heading change in degrees, normalized to (-180, 180].
///
/// Positive values turn right, negative values turn left.
fn relative_angle(orig_heading: f64, new_heading: f64) -> f64 {
    let angle = new_heading - orig_heading;
    if angle > 180.0 {
        angle - 360.0
    } else if angle < -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Classify a relative heading change into a turn.
fn classify_turn(angle: f64) -> Turn {
    let right = angle > 0.0;
    let abs_angle = angle.abs();

    if abs_angle < SLIGHT_TURN_MIN {
        Turn::Continue
    } else if abs_angle < TURN_MIN {
        if right { Turn::SlightRight } else { Turn::SlightLeft }
    } else if abs_angle < SHARP_TURN_MIN {
        if right { Turn::Right } else { Turn::Left }
    } else if abs_angle < U_TURN_MIN {
        if right { Turn::SharpRight } else { Turn::SharpLeft }
    } else {
        Turn::UTurn
    }
}

/// Renders a route as text directions, one line per feature.
pub trait RouteFormatter {
    /// Render the line for a single feature, entered with heading
    /// `orig_heading`. The line includes its terminator.
    fn compute_line(&self, feature: &GeoFeature, orig_heading: f64) -> String;

    /// Render directions for the whole route, starting with heading
    /// `initial_heading`.
    ///
    /// Each feature is entered with the end heading of the previous one.
    fn compute_directions(&self, route: &Route, initial_heading: f64) -> String {
        let mut directions = String::new();
        let mut heading = initial_heading;
        let mut lines = 0;

        for feature in route.geo_features() {
            directions.push_str(&self.compute_line(&feature, heading));
            heading = feature.end_heading();
            lines += 1;
        }

        log::debug!("Computed {lines} direction lines for route {route}");
        directions
    }
}

/// Directions for driving: distances in kilometers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrivingRouteFormatter;

impl RouteFormatter for DrivingRouteFormatter {
    fn compute_line(&self, feature: &GeoFeature, orig_heading: f64) -> String {
        let turn = Turn::between(orig_heading, feature.start_heading());
        format!("{}\n", driving_text(turn, feature))
    }
}

fn driving_text(turn: Turn, feature: &GeoFeature) -> String {
    format!(
        "{} onto {} and go {} kilometers.",
        turn.phrase(),
        feature.name(),
        format_km(feature.length())
    )
}

/// One digit after the decimal point. Exact binary ties round to even.
fn format_km(km: f64) -> String {
    format!("{km:.1}")
}

/// Generate structured driving instructions, one per route feature.
///
/// Headings carry over between features exactly as in
/// [`RouteFormatter::compute_directions`].
pub fn generate_instructions(route: &Route, initial_heading: f64) -> Vec<Instruction> {
    let mut heading = initial_heading;

    route
        .geo_features()
        .enumerate()
        .map(|(i, feature)| {
            let turn = Turn::between(heading, feature.start_heading());
            heading = feature.end_heading();

            Instruction {
                feature_index: i,
                name: feature.name().to_string(),
                turn,
                distance_km: feature.length(),
                text: driving_text(turn, &feature),
            }
        })
        .collect()
}

/// Serialize a route, with its segments and total length, as JSON.
pub fn route_to_json(route: &Route) -> Result<String> {
    Ok(serde_json::to_string(route)?)
}

/// Generate driving instructions and return them as a JSON array.
pub fn instructions_to_json(route: &Route, initial_heading: f64) -> Result<String> {
    let instructions = generate_instructions(route, initial_heading);
    Ok(serde_json::to_string(&instructions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::GeoPoint;
    use crate::segment::GeoSegment;

    fn pt(lat: i32, lon: i32) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn seg(name: &str, a: (i32, i32), b: (i32, i32)) -> GeoSegment {
        GeoSegment::new(name, pt(a.0, a.1), pt(b.0, b.1)).unwrap()
    }

    /// North for ~0.1 km, then ~30 degrees right for ~0.7 km.
    fn khankin_trumpeldor() -> Route {
        let base = (32_800_000, 35_000_000);
        let corner = (base.0 + 902, base.1);
        let end = (corner.0 + 5_466, corner.1 + 3_736);

        Route::new(seg("Khankin Road", base, corner))
            .add_segment(seg("Trumpeldor Avenue", corner, end))
    }

    #[test]
    fn turn_boundaries_from_north() {
        let cases = [
            (5.0, "Continue"),
            (10.0, "Turn slight right"),
            (59.9, "Turn slight right"),
            (60.0, "Turn right"),
            (119.9, "Turn right"),
            (120.0, "Turn sharp right"),
            (178.9, "Turn sharp right"),
            (179.0, "U-turn"),
            (180.0, "U-turn"),
            (300.0, "Turn left"),
            (350.5, "Continue"),
            (330.0, "Turn slight left"),
            (200.0, "Turn sharp left"),
        ];
        for (new_heading, expected) in cases {
            assert_eq!(turn_phrase(0.0, new_heading), expected, "heading {new_heading}");
        }
    }

    #[test]
    fn turn_wraps_around_north() {
        assert_eq!(Turn::between(350.0, 20.0), Turn::SlightRight);
        assert_eq!(Turn::between(20.0, 350.0), Turn::SlightLeft);
        assert_eq!(Turn::between(270.0, 0.0), Turn::Right);
        assert_eq!(Turn::between(0.0, 270.0), Turn::Left);
    }

    #[test]
    fn zero_delta_is_continue() {
        assert_eq!(Turn::between(123.0, 123.0), Turn::Continue);
        assert_eq!(Turn::between(0.0, 0.0), Turn::Continue);
    }

    #[test]
    fn relative_angle_is_normalized() {
        assert_eq!(relative_angle(0.0, 300.0), -60.0);
        assert_eq!(relative_angle(300.0, 0.0), 60.0);
        assert_eq!(relative_angle(90.0, 270.0), 180.0);
    }

    #[test]
    fn format_km_one_decimal() {
        assert_eq!(format_km(0.05), "0.1");
        assert_eq!(format_km(1.44), "1.4");
        assert_eq!(format_km(0.0), "0.0");
        assert_eq!(format_km(12.0), "12.0");
    }

    #[test]
    fn format_km_ties_round_to_even() {
        // Exact binary ties.
        assert_eq!(format_km(0.25), "0.2");
        assert_eq!(format_km(0.75), "0.8");
        // 0.35 is slightly below the tie in binary.
        assert_eq!(format_km(0.35), "0.3");
        assert_eq!(format_km(1.45), "1.4");
    }

    #[test]
    fn degenerate_feature_reads_as_north() {
        let route = Route::new(seg("Dot", (5, 5), (5, 5)))
            .add_segment(seg("Main", (5, 5), (5, 10_005)));

        let directions = DrivingRouteFormatter.compute_directions(&route, 90.0);
        assert_eq!(
            directions,
            "Turn left onto Dot and go 0.0 kilometers.\n\
             Turn right onto Main and go 0.9 kilometers.\n"
        );
    }

    #[test]
    fn directions_khankin_trumpeldor() {
        let route = khankin_trumpeldor();
        let directions = DrivingRouteFormatter.compute_directions(&route, route.start_heading());

        assert_eq!(
            directions,
            "Continue onto Khankin Road and go 0.1 kilometers.\n\
             Turn slight right onto Trumpeldor Avenue and go 0.7 kilometers.\n"
        );
    }

    #[test]
    fn directions_merge_same_named_segments() {
        let route = Route::new(seg("Main", (0, 0), (4_000, 0)))
            .add_segment(seg("Main", (4_000, 0), (9_017, 0)))
            .add_segment(seg("Side", (9_017, 0), (9_017, -10_000)));

        let directions = DrivingRouteFormatter.compute_directions(&route, 0.0);
        assert_eq!(
            directions,
            "Continue onto Main and go 1.0 kilometers.\n\
             Turn left onto Side and go 0.9 kilometers.\n"
        );
    }

    #[test]
    fn heading_carries_over_between_features() {
        // East, then north: the second line turns left relative to the
        // end of the first feature, not the initial heading.
        let route = Route::new(seg("A", (0, 0), (0, 10_000)))
            .add_segment(seg("B", (0, 10_000), (10_000, 10_000)));

        let directions = DrivingRouteFormatter.compute_directions(&route, 0.0);
        let lines: Vec<&str> = directions.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Turn right onto A"));
        assert!(lines[1].starts_with("Turn left onto B"));
    }

    #[test]
    fn one_terminator_per_line() {
        let route = khankin_trumpeldor();
        let directions = DrivingRouteFormatter.compute_directions(&route, 0.0);

        assert_eq!(directions.matches('\n').count(), 2);
        assert!(directions.ends_with(".\n"));
        assert!(!directions.starts_with('\n'));
        assert!(!directions.contains("  "));
    }

    #[test]
    fn instructions_match_text_directions() {
        let route = khankin_trumpeldor();
        let instructions = generate_instructions(&route, route.start_heading());

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].turn, Turn::Continue);
        assert_eq!(instructions[1].turn, Turn::SlightRight);
        assert_eq!(instructions[1].feature_index, 1);
        assert_eq!(instructions[1].name, "Trumpeldor Avenue");

        let rendered: String = instructions.iter().map(|i| format!("{}\n", i.text)).collect();
        assert_eq!(
            rendered,
            DrivingRouteFormatter.compute_directions(&route, route.start_heading())
        );
    }

    #[test]
    fn instructions_to_json_produces_valid_json() {
        let route = khankin_trumpeldor();
        let json = instructions_to_json(&route, 0.0).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed.is_array());
        assert_eq!(parsed[0]["turn"], "continue");
        assert_eq!(parsed[1]["turn"], "slight_right");
        assert_eq!(parsed[1]["name"], "Trumpeldor Avenue");
    }

    #[test]
    fn route_to_json_lists_segments() {
        let route = khankin_trumpeldor();
        let json = route_to_json(&route).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let segments = parsed["segments"].as_array().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0]["name"], "Khankin Road");
        assert_eq!(segments[0]["p1"]["latitude"], 32_800_000);
        assert_eq!(segments[1]["p2"]["longitude"], 35_003_736);
        assert!((parsed["length"].as_f64().unwrap() - route.length()).abs() < 1e-12);
    }
}
