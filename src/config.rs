//! Viewer configuration
//!
//! Everything the viewer needs to start lives in [`ViewerConfig`]. The
//! defaults reproduce the reference scene: a 1280x720 window, the camera five
//! units back from the origin, four objects with object 2 attached to object 1,
//! and a single white point light.

use std::path::PathBuf;

use cgmath::Vector3;

use crate::gfx::scene::{
    hierarchy::Placement,
    transform::{Axis, AxisLimit},
};
use crate::input::KeyBindings;

/// Top-level viewer settings
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub model_path: PathBuf,
    pub clear_color: wgpu::Color,
    pub vsync: bool,
    pub camera: CameraSettings,
    pub motion: MotionSettings,
    pub scene: SceneLayout,
    pub light: LightSettings,
    pub material: PhongMaterial,
    pub bindings: KeyBindings,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "3D Model".to_string(),
            width: 1280,
            height: 720,
            model_path: PathBuf::from("burmakina.obj"),
            clear_color: wgpu::Color {
                r: 0.5,
                g: 0.5,
                b: 1.0,
                a: 1.0,
            },
            vsync: true,
            camera: CameraSettings::default(),
            motion: MotionSettings::default(),
            scene: SceneLayout::default(),
            light: LightSettings::default(),
            material: PhongMaterial::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl ViewerConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_camera(mut self, camera: CameraSettings) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_scene(mut self, scene: SceneLayout) -> Self {
        self.scene = scene;
        self
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Initial surface aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Free camera defaults and tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub position: Vector3<f32>,
    /// Degrees. -90 looks down the negative z axis.
    pub yaw: f32,
    /// Degrees.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Degrees of rotation per pixel of pointer travel.
    pub sensitivity: f32,
    /// Units per second.
    pub speed: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 5.0),
            yaw: -90.0,
            pitch: 0.0,
            fov: 45.0,
            sensitivity: 0.1,
            speed: 2.5,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

/// Object nudge tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    /// Units per second while a nudge key is held.
    pub nudge_speed: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self { nudge_speed: 1.5 }
    }
}

/// Object count, hierarchy and per-axis limits of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    /// One entry per object; the length is the object count.
    pub placements: Vec<Placement>,
    /// Limit applied to every object on the x and z axes before overrides.
    pub default_limit: AxisLimit,
    pub limit_overrides: Vec<(usize, Axis, AxisLimit)>,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            placements: vec![
                Placement::Static,
                Placement::Root,
                Placement::ChildOf(1),
                Placement::Root,
            ],
            default_limit: AxisLimit::new(-5.0, 5.0),
            limit_overrides: vec![
                (1, Axis::Z, AxisLimit::new(-0.5, 0.25)),
                (2, Axis::X, AxisLimit::new(-0.5, 0.5)),
                (3, Axis::X, AxisLimit::new(-1.0, 0.5)),
            ],
        }
    }
}

impl SceneLayout {
    pub fn object_count(&self) -> usize {
        self.placements.len()
    }
}

/// Point light used by the Phong shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSettings {
    pub position: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            position: [2.0, 3.0, 2.0],
            ambient: [0.1, 0.1, 0.1],
            diffuse: [0.8, 0.8, 0.8],
            specular: [1.0, 1.0, 1.0],
        }
    }
}

/// Phong material shared by every mesh of the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            ambient: [1.0, 0.1, 0.1],
            diffuse: [0.2, 0.4, 0.8],
            specular: [0.8, 0.8, 0.8],
            shininess: 32.0,
        }
    }
}

impl PhongMaterial {
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess.max(1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_reference_scene() {
        let layout = SceneLayout::default();
        assert_eq!(layout.object_count(), 4);
        assert_eq!(layout.placements[2], Placement::ChildOf(1));
        assert_eq!(layout.limit_overrides[0], (1, Axis::Z, AxisLimit::new(-0.5, 0.25)));
    }

    #[test]
    fn test_aspect_ratio_survives_zero_height() {
        let config = ViewerConfig::default().with_size(800, 0);
        assert_eq!(config.aspect_ratio(), 800.0);
        assert_eq!(ViewerConfig::default().aspect_ratio(), 1280.0 / 720.0);
    }
}
