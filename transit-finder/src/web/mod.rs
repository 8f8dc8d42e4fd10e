//! Web layer for the transit finder.
//!
//! Provides JSON endpoints for searching around an address and loading
//! line details.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, DEFAULT_SEARCH_DEADLINE};
