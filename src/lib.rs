//! # Skiff
//!
//! A minimal tabbed browser shell for the terminal.
//!
//! ## Features
//! - Tabbed pages with live titles and load progress
//! - Address and search entries with a per-page focus chain
//! - Singleton downloads and settings pages
//! - Crash-isolated page engines
//! - Action menu and help popup
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Renderer Layer (Tokio engine tasks)

pub mod address;
pub mod app;
pub mod constants;
pub mod messages;
pub mod pages;
pub mod renderer;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, MenuItem, ShellState};
pub use messages::{RenderState, RendererCommand, RendererEvent, UiEvent};
pub use pages::{Page, PageDescription, PageId, PageManager};
pub use renderer::RendererActor;
