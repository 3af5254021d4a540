// Roster Grid Library
// Selection and permission-gated context actions for calendar roster grids

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::EngineError;
pub use services::engine::{GridEngine, MenuView};
