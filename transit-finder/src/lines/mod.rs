//! Lines serving the discovered stations.
//!
//! [`aggregate`] fans out one lookup per physical stop and merges the
//! results into a single ranked list. [`hydrate`] fills in one line's
//! geometry and schedule later, when the user first shows it.

mod aggregate;
mod hydrate;
mod palette;
mod schedule;

pub use aggregate::{LineMerge, aggregate, infer_category};
pub use hydrate::hydrate;
pub use palette::{ColorCursor, PALETTE};
pub use schedule::parse_schedule;
