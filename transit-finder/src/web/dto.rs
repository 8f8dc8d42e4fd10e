//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Line, LinePatch, Point, Station, Stop};
use crate::engine::ViewState;

/// Request to search around an address.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text address
    pub address: String,

    /// Search radius in meters (500-2000, step 100; defaults to server config)
    pub radius: Option<u32>,

    /// City scope (defaults to server config)
    pub city: Option<String>,
}

/// Query for a line's detail.
#[derive(Debug, Deserialize)]
pub struct LineDetailRequest {
    /// City scope (defaults to server config)
    pub city: Option<String>,
}

/// A `[lng, lat]` pair.
pub type LngLat = [f64; 2];

fn lng_lat(point: &Point) -> LngLat {
    [point.lng(), point.lat()]
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Provider POI id
    pub id: String,

    /// Display name
    pub name: String,

    /// `"rail"` or `"surface"`
    pub category: &'static str,

    /// Position
    pub location: LngLat,

    /// Distance from the search center in meters
    pub distance_m: u32,
}

impl StationResult {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
            category: station.category.as_str(),
            location: lng_lat(&station.point),
            distance_m: station.distance_m,
        }
    }
}

/// A line in search results.
#[derive(Debug, Serialize)]
pub struct LineResult {
    /// Provider line id
    pub id: String,

    /// Display name
    pub name: String,

    /// `"rail"` or `"surface"`
    pub category: &'static str,

    /// Nearest station served by this line
    pub nearest_station: String,

    /// Distance to that station in meters
    pub nearest_distance_m: u32,

    /// First stop
    pub start_stop: String,

    /// Last stop
    pub end_stop: String,

    /// Display colour
    pub color: String,

    /// Whether the line is shown by default
    pub visible: bool,
}

impl LineResult {
    /// Create from a domain Line.
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            category: line.category.as_str(),
            nearest_station: line.nearest_station_name.clone(),
            nearest_distance_m: line.nearest_distance_m,
            start_stop: line.start_stop.clone(),
            end_stop: line.end_stop.clone(),
            color: line.color.clone(),
            visible: line.visible,
        }
    }
}

/// Response to a search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Geocoded search center
    pub center: Option<LngLat>,

    /// Radius used, in meters
    pub radius_m: u32,

    /// Deduplicated stations, nearest first
    pub stations: Vec<StationResult>,

    /// Lines, rail first, then by nearest station
    pub lines: Vec<LineResult>,

    /// False if some line lookups had not settled in time
    pub done: bool,
}

impl SearchResponse {
    /// Create from a session snapshot.
    pub fn from_view(view: &ViewState, radius_m: u32) -> Self {
        Self {
            center: view.center.as_ref().map(lng_lat),
            radius_m,
            stations: view.stations.iter().map(StationResult::from_station).collect(),
            lines: view.lines.iter().map(LineResult::from_line).collect(),
            done: view.lines_done,
        }
    }
}

/// A stop on a line.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Stop name
    pub name: String,

    /// Position, if the provider gave one
    pub location: Option<LngLat>,

    /// 1-based position along the line
    pub sequence: u32,
}

impl StopResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            name: stop.name.clone(),
            location: stop.point.as_ref().map(lng_lat),
            sequence: stop.sequence_index,
        }
    }
}

/// Response to a line detail request.
#[derive(Debug, Serialize)]
pub struct LineDetailResponse {
    /// Provider line id
    pub id: String,

    /// Route geometry
    pub path: Vec<LngLat>,

    /// Stops in order
    pub stops: Vec<StopResult>,

    /// First service, `HH:MM` or `--`
    pub start_time: String,

    /// Last service, `HH:MM` or `--`
    pub end_time: String,

    /// Provider's schedule remark
    pub note: String,
}

impl LineDetailResponse {
    /// Create from a hydration patch.
    pub fn from_patch(id: &str, patch: &LinePatch) -> Self {
        Self {
            id: id.to_string(),
            path: patch.path.iter().map(lng_lat).collect(),
            stops: patch.stops.iter().map(StopResult::from_stop).collect(),
            start_time: patch.operating_window.start.clone(),
            end_time: patch.operating_window.end.clone(),
            note: patch.operating_window.note.clone(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
