// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles the render pipeline, GPU resource upload, and frame presentation.

pub mod pipeline;
pub mod render_engine;

// Re-export main types
pub use pipeline::{create_pipeline, PipelineConfig};
pub use render_engine::RenderEngine;
