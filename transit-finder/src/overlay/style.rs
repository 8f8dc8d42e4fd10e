//! Overlay styles.

use crate::domain::Category;

/// Shape of a point marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    RoundedSquare,
}

/// Style of a point marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    /// Fill colour, `#rrggbb`.
    pub fill: &'static str,
    pub border: &'static str,
    pub border_px: u8,
    /// Width and height.
    pub size_px: u8,
    pub z_index: i32,
}

/// Marker for the geocoded search center.
pub const CENTER_MARKER: MarkerStyle = MarkerStyle {
    shape: MarkerShape::Circle,
    fill: "#ff4d4f",
    border: "#fff",
    border_px: 3,
    size_px: 20,
    z_index: 200,
};

pub const RAIL_STATION_MARKER: MarkerStyle = MarkerStyle {
    shape: MarkerShape::Circle,
    fill: "#1677ff",
    border: "#fff",
    border_px: 2,
    size_px: 12,
    z_index: 100,
};

pub const SURFACE_STATION_MARKER: MarkerStyle = MarkerStyle {
    shape: MarkerShape::RoundedSquare,
    fill: "#52c41a",
    border: "#fff",
    border_px: 2,
    size_px: 12,
    z_index: 100,
};

/// Station marker style for a category.
pub fn station_marker(category: Category) -> MarkerStyle {
    match category {
        Category::Rail => RAIL_STATION_MARKER,
        Category::Surface => SURFACE_STATION_MARKER,
    }
}

/// Style of a route polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStyle {
    pub color: String,
    pub weight: u8,
    pub opacity: f32,
    pub z_index: i32,
}

impl RouteStyle {
    pub fn for_color(color: &str) -> Self {
        Self {
            color: color.to_string(),
            weight: 5,
            opacity: 0.8,
            z_index: 50,
        }
    }
}

/// Style of a stop dot on a route.
#[derive(Debug, Clone, PartialEq)]
pub struct DotStyle {
    pub fill: String,
    pub radius: u8,
    pub stroke: &'static str,
    pub stroke_width: u8,
    pub z_index: i32,
}

impl DotStyle {
    pub fn for_color(color: &str) -> Self {
        Self {
            fill: color.to_string(),
            radius: 4,
            stroke: "#fff",
            stroke_width: 1,
            z_index: 60,
        }
    }
}

/// Viewport margin in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// Margin used when fitting routes; the left edge leaves room for the
/// docked detail panel.
pub const FIT_PADDING: Padding = Padding {
    top: 60,
    right: 60,
    bottom: 60,
    left: 400,
};
