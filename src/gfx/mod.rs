//! # Graphics Module
//!
//! Camera, scene and GPU code of the viewer.
//!
//! - **Camera** ([`camera`]) - free-fly camera and its winit event routing
//! - **Scene** ([`scene`]) - object transforms, hierarchy, OBJ models
//! - **Resources** ([`resources`]) - uniforms, textures and bind groups
//! - **Rendering** ([`rendering`]) - pipeline and the [`RenderEngine`] frame sink
//!
//! Everything outside [`rendering`] and [`resources`] runs without a GPU.

pub mod camera;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::{FlyCamera, MoveDirection};
pub use rendering::render_engine::RenderEngine;
