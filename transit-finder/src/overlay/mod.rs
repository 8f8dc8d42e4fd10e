//! Map overlay reconciliation.
//!
//! The engine does not draw anything itself. It describes overlays and
//! hands them to a [`Surface`], keeping a ledger of the opaque handles it
//! got back so later changes can be applied with as few calls as possible.

mod reconciler;
mod style;
mod surface;

pub use reconciler::{OverlayReconciler, ReconcileInput, ReconcileReport};
pub use style::{
    CENTER_MARKER, DotStyle, FIT_PADDING, MarkerShape, MarkerStyle, Padding, RAIL_STATION_MARKER,
    RouteStyle, SURFACE_STATION_MARKER, station_marker,
};
pub use surface::{Overlay, Surface};
