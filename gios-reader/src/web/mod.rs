//! Web layer for the station reader.
//!
//! Provides read-only HTTP endpoints over the latest refresh.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::{AppState, StationSnapshot};
