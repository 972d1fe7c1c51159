//! Error types for the viewer
//!
//! The transform core never fails at runtime. Errors only come from building
//! an invalid scene description or from the platform collaborators (window,
//! GPU, asset loading).

use thiserror::Error;

use crate::gfx::scene::transform::Axis;

/// Invalid scene description, reported while the scene is being built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("hierarchy has {placements} placements but the store holds {objects} objects")]
    LengthMismatch { placements: usize, objects: usize },

    #[error("object {child} names parent {parent}, but only {len} objects exist")]
    ParentOutOfRange {
        child: usize,
        parent: usize,
        len: usize,
    },

    #[error("object {0} is its own parent")]
    SelfParent(usize),

    #[error("parent chain starting at object {0} contains a cycle")]
    ParentCycle(usize),

    #[error("object {index} has an empty {axis:?} limit [{min}, {max}]")]
    InvalidLimit {
        index: usize,
        axis: Axis,
        min: f32,
        max: f32,
    },

    #[error("no object with index {index} (scene holds {len})")]
    UnknownObject { index: usize, len: usize },
}

/// Fatal failures of the viewer's collaborators.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to load model '{path}': {source}")]
    ModelLoad {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("model '{0}' contains no meshes")]
    EmptyModel(String),

    #[error("failed to decode texture: {0}")]
    Texture(#[from] image::ImageError),

    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface ran out of memory")]
    SurfaceOutOfMemory,

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}
