//! Commands Layer
//!
//! Host-facing command handlers that bridge a front end to the catalog.
//! Handlers return `Result<T, String>` so errors cross the boundary as text.

mod catalog_cmd;
mod item_cmd;

use std::sync::Arc;

use crate::config::Settings;
use crate::repository::{DocumentStore, ItemRepository};

pub use catalog_cmd::*;
pub use item_cmd::*;

/// Application state shared across commands
pub struct AppState {
    pub repo: ItemRepository,
    pub settings: Settings,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, settings: Settings) -> Self {
        Self {
            repo: ItemRepository::new(store),
            settings,
        }
    }
}
