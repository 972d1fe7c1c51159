// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Handles textures, uniform buffers, and bind groups for rendering.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;
pub mod transform_bindings;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO};
pub use material::MaterialBindings;
pub use texture_resource::{DepthTexture, TextureResource};
pub use transform_bindings::{ModelUBO, ModelUniform, TransformBindings};
