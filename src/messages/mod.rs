//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Renderer layers.

pub mod render;
pub mod renderer;
pub mod ui_events;

pub use render::RenderState;
pub use renderer::{RendererCommand, RendererEvent};
pub use ui_events::UiEvent;
