//! Transit line types.

use super::{Category, Point};

/// Placeholder shown for an unknown start or end time.
pub const UNKNOWN_TIME: &str = "--";

/// Daily operating hours of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatingWindow {
    /// First service, `HH:MM` or [`UNKNOWN_TIME`].
    pub start: String,
    /// Last service, `HH:MM` or [`UNKNOWN_TIME`].
    pub end: String,
    /// Free-text remark from the provider.
    pub note: String,
}

impl OperatingWindow {
    /// The window used before hydration and whenever parsing fails.
    pub fn placeholder() -> Self {
        Self {
            start: UNKNOWN_TIME.to_string(),
            end: UNKNOWN_TIME.to_string(),
            note: String::new(),
        }
    }

    /// Whether real times are known.
    pub fn is_known(&self) -> bool {
        self.start != UNKNOWN_TIME && self.end != UNKNOWN_TIME
    }
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// A stop along a line.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    /// Providers occasionally omit stop positions.
    pub point: Option<Point>,
    /// 1-based position along the line.
    pub sequence_index: u32,
}

impl Stop {
    /// Number stops by their position in `stops`, starting at 1.
    ///
    /// Any ordering field the provider sent is deliberately ignored.
    pub fn sequence<I>(stops: I) -> Vec<Stop>
    where
        I: IntoIterator<Item = (String, Option<Point>)>,
    {
        stops
            .into_iter()
            .zip(1u32..)
            .map(|((name, point), sequence_index)| Stop {
                name,
                point,
                sequence_index,
            })
            .collect()
    }
}

/// A line serving one or more nearby stations.
///
/// Created once per provider line id during aggregation. Afterwards only the
/// nearest-station fields (tightened during aggregation), `visible`, and the
/// hydration fields change.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Provider's stable line id; the dedup key across stations.
    pub id: String,
    pub name: String,
    pub category: Category,
    pub nearest_station_name: String,
    pub nearest_distance_m: u32,
    pub start_stop: String,
    pub end_stop: String,
    pub operating_window: OperatingWindow,
    pub stops: Vec<Stop>,
    pub path: Vec<Point>,
    /// Display colour as `#rrggbb`.
    pub color: String,
    pub visible: bool,
    /// True once `path`, `stops` and `operating_window` have been filled.
    pub hydrated: bool,
}

impl Line {
    /// Merge hydration data into this line and mark it hydrated.
    pub fn apply(&mut self, patch: LinePatch) {
        self.path = patch.path;
        self.stops = patch.stops;
        self.operating_window = patch.operating_window;
        self.hydrated = true;
    }

    /// Whether this line currently contributes a route overlay.
    pub fn is_drawable(&self) -> bool {
        self.visible && self.hydrated && self.path.len() > 1
    }
}

/// Detail data fetched for a single line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinePatch {
    pub path: Vec<Point>,
    pub stops: Vec<Stop>,
    pub operating_window: OperatingWindow,
}

impl LinePatch {
    /// Patch used when detail lookup fails: empty geometry, unknown hours.
    pub fn placeholder() -> Self {
        Self::default()
    }
}
