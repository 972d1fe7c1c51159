//! # Scene Module
//!
//! Everything the viewer knows about what it draws:
//!
//! - [`ObjectTransformStore`] - per-object positions with per-axis limits
//! - [`Hierarchy`] - data-driven parent links, resolved into model matrices
//! - [`Scene`] - camera, transforms and hierarchy driven together by held keys
//! - [`Model`] / [`Mesh`] - geometry loaded from OBJ files by [`load_model`]
//! - [`Vertex3D`] - vertex layout shared with the shader
//!
//! Only translation takes part in the hierarchy; rotation and scale are stored
//! on [`ObjectTransform`] but not composed.

pub mod hierarchy;
pub mod loader;
pub mod object;
pub mod scene;
pub mod transform;
pub mod transform_store;
pub mod vertex;

// Re-export main types
pub use hierarchy::{Hierarchy, Placement};
pub use loader::load_model;
pub use object::{DrawModel, Mesh, Model};
pub use scene::Scene;
pub use transform::{Axis, AxisLimit, ObjectTransform};
pub use transform_store::ObjectTransformStore;
pub use vertex::Vertex3D;
