//! Provider-agnostic lookup results.

use crate::domain::{Category, Point};

/// A point of interest returned by a nearby search.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub point: Point,
}

/// A line as returned by a name search, before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLine {
    pub id: String,
    pub name: String,
    pub start_stop: String,
    pub end_stop: String,
    /// Category as reported by the provider, when it reports one.
    pub category_hint: Option<Category>,
}

/// A stop as returned by a line detail lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStop {
    pub name: String,
    pub point: Option<Point>,
}

/// Full geometry and schedule data for one line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineDetail {
    pub path: Vec<Point>,
    pub stops: Vec<RawStop>,
    /// Provider-encoded schedule text; see [`crate::lines::parse_schedule`].
    pub schedule_blob: Option<String>,
}
