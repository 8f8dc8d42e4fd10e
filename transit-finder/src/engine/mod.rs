//! Transit aggregation engine.
//!
//! Ties station discovery, line aggregation and lazy hydration together
//! into discovery cycles owned by a [`Session`].

mod config;
mod error;
mod session;

pub use config::{EngineConfig, SearchRadius, VisibilityDefaults};
pub use error::EngineError;
pub use session::{Session, ViewState};
