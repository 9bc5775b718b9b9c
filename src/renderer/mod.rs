//! Renderer layer - engine tasks that load and report on documents

pub mod actor;
pub mod engine;

pub use actor::RendererActor;
