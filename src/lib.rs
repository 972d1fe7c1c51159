// src/lib.rs
//! Free-camera model viewer
//!
//! Loads an OBJ model, flies a camera around it with mouse and WASD, and
//! nudges a few hierarchically linked objects along clamped axes. Built on
//! wgpu and winit.

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod gfx;
pub mod input;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use config::ViewerConfig;
pub use error::{SceneError, ViewerError};
pub use frame_loop::{FrameLoop, FrameMatrices, FrameSink};
