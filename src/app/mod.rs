//! App layer - the actor that owns state and the actions it performs
//!
//! - `actor`: event loop over UI, engine, and timer channels
//! - `state`: the mutable shell state and its render snapshot
//! - `commands`: one method per user-visible action
//! - `menu`: the action menu model

pub mod actor;
pub mod commands;
pub mod menu;
pub mod state;

pub use actor::AppActor;
pub use menu::{ActionMenu, MenuItem};
pub use state::ShellState;
