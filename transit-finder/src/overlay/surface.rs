//! Drawing surface abstraction.

use crate::domain::Point;

use super::style::{DotStyle, MarkerStyle, Padding, RouteStyle};

/// One object to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// A point marker (search center or station).
    Marker {
        point: Point,
        style: MarkerStyle,
        /// Hover text.
        title: Option<String>,
    },
    /// A line's path.
    Route { path: Vec<Point>, style: RouteStyle },
    /// A stop along a drawn route.
    StopDot { point: Point, style: DotStyle },
}

/// Something overlays can be drawn on, such as a map widget.
///
/// Handles are opaque; the reconciler only stores them and hands them back.
pub trait Surface {
    type Handle;

    /// Draw an overlay and return its handle.
    fn draw(&mut self, overlay: &Overlay) -> Self::Handle;

    /// Remove a previously drawn overlay.
    fn remove(&mut self, handle: Self::Handle);

    /// Move the viewport to frame the given overlays.
    fn fit_view(&mut self, handles: &[&Self::Handle], padding: Padding);
}
