//! Domain types for the transit finder.
//!
//! This module contains the value types shared by every layer. Types that
//! carry invariants (such as [`Point`]) enforce them at construction time.

mod line;
mod point;
mod station;

pub use line::{Line, LinePatch, OperatingWindow, Stop, UNKNOWN_TIME};
pub use point::{InvalidPoint, Point};
pub use station::{Category, Station};
