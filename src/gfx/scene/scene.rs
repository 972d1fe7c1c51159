use cgmath::Matrix4;

use crate::{
    config::{MotionSettings, ViewerConfig},
    error::SceneError,
    gfx::camera::FlyCamera,
    input::{InputState, KeyBindings},
};

use super::{
    hierarchy::Hierarchy,
    transform::Axis,
    transform_store::ObjectTransformStore,
};

/// Main scene containing the camera and the nudgeable objects
pub struct Scene {
    pub camera: FlyCamera,
    pub transforms: ObjectTransformStore,
    pub hierarchy: Hierarchy,
    pub motion: MotionSettings,
}

impl Scene {
    /// Builds the scene described by `config`
    ///
    /// Every object starts at the origin with the layout's default limit on
    /// x and z; overrides are applied on top. Key bindings must only target
    /// objects that exist.
    pub fn from_config(config: &ViewerConfig) -> Result<Self, SceneError> {
        let layout = &config.scene;
        let count = layout.object_count();

        let mut transforms = ObjectTransformStore::new(count);
        for index in 0..count {
            transforms.set_axis_limit(index, Axis::X, layout.default_limit)?;
            transforms.set_axis_limit(index, Axis::Z, layout.default_limit)?;
        }
        for &(index, axis, limit) in &layout.limit_overrides {
            transforms.set_axis_limit(index, axis, limit)?;
        }

        if let Some(index) = config.bindings.max_object_index() {
            if index >= count {
                return Err(SceneError::UnknownObject { index, len: count });
            }
        }

        Self::new(
            FlyCamera::new(&config.camera),
            transforms,
            Hierarchy::new(layout.placements.clone())?,
            config.motion,
        )
    }

    pub fn new(
        camera: FlyCamera,
        transforms: ObjectTransformStore,
        hierarchy: Hierarchy,
        motion: MotionSettings,
    ) -> Result<Self, SceneError> {
        if hierarchy.len() != transforms.len() {
            return Err(SceneError::LengthMismatch {
                placements: hierarchy.len(),
                objects: transforms.len(),
            });
        }

        Ok(Self {
            camera,
            transforms,
            hierarchy,
            motion,
        })
    }

    pub fn object_count(&self) -> usize {
        self.transforms.len()
    }

    /// Turns every held movement and nudge key into one frame of motion
    pub fn apply_held_keys(&mut self, input: &InputState, bindings: &KeyBindings, delta_time: f32) {
        for &(key, direction) in &bindings.movement {
            if input.is_held(key) {
                self.camera.on_key_held(direction, delta_time);
            }
        }

        let step = self.motion.nudge_speed * delta_time;
        for binding in &bindings.nudges {
            if input.is_held(binding.increase) {
                self.transforms.nudge(binding.object, binding.axis, step);
            }
            if input.is_held(binding.decrease) {
                self.transforms.nudge(binding.object, binding.axis, -step);
            }
        }
    }

    /// Model matrix of object `index`
    pub fn model_matrix(&self, index: usize) -> Matrix4<f32> {
        self.hierarchy.model_matrix(&self.transforms, index)
    }

    /// Model matrices of every object, in index order
    pub fn model_matrices(&self) -> Vec<Matrix4<f32>> {
        self.hierarchy.model_matrices(&self.transforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneLayout;
    use crate::gfx::scene::{hierarchy::Placement, transform::AxisLimit};
    use cgmath::{SquareMatrix, Vector3};
    use winit::keyboard::KeyCode;

    #[test]
    fn test_reference_limits() {
        let scene = Scene::from_config(&ViewerConfig::default()).unwrap();
        assert_eq!(scene.object_count(), 4);

        let object1 = scene.transforms.get(1).unwrap();
        assert_eq!(object1.axis_limit(Axis::Z), Some(AxisLimit::new(-0.5, 0.25)));
        assert_eq!(object1.axis_limit(Axis::X), Some(AxisLimit::new(-5.0, 5.0)));
        assert_eq!(object1.axis_limit(Axis::Y), None);
        assert_eq!(
            scene.transforms.get(3).unwrap().axis_limit(Axis::X),
            Some(AxisLimit::new(-1.0, 0.5))
        );
    }

    #[test]
    fn test_held_digit_nudges_object() {
        let config = ViewerConfig::default();
        let mut scene = Scene::from_config(&config).unwrap();
        let mut input = InputState::new();

        input.set_key(KeyCode::Digit1, true);
        scene.apply_held_keys(&input, &config.bindings, 0.1);
        assert!((scene.transforms.get(1).unwrap().position.z - 0.15).abs() < 1e-6);

        // Plenty of frames later the object rests on its limit.
        for _ in 0..100 {
            scene.apply_held_keys(&input, &config.bindings, 0.1);
        }
        assert_eq!(scene.transforms.get(1).unwrap().position.z, 0.25);

        input.set_key(KeyCode::Digit1, false);
        input.set_key(KeyCode::Digit6, true);
        for _ in 0..100 {
            scene.apply_held_keys(&input, &config.bindings, 0.1);
        }
        assert_eq!(scene.transforms.get(3).unwrap().position.x, -1.0);
    }

    #[test]
    fn test_zero_delta_time_changes_nothing() {
        let config = ViewerConfig::default();
        let mut scene = Scene::from_config(&config).unwrap();
        let mut input = InputState::new();
        for key in [
            KeyCode::KeyW,
            KeyCode::KeyA,
            KeyCode::Digit1,
            KeyCode::Digit3,
            KeyCode::Digit6,
        ] {
            input.set_key(key, true);
        }

        let camera_before = scene.camera.position;
        let matrices_before = scene.model_matrices();
        scene.apply_held_keys(&input, &config.bindings, 0.0);

        assert_eq!(scene.camera.position, camera_before);
        assert_eq!(scene.model_matrices(), matrices_before);
    }

    #[test]
    fn test_child_matrix_tracks_parent_nudges() {
        let config = ViewerConfig::default();
        let mut scene = Scene::from_config(&config).unwrap();
        let mut input = InputState::new();
        input.set_key(KeyCode::Digit2, true);
        input.set_key(KeyCode::Digit3, true);
        scene.apply_held_keys(&input, &config.bindings, 0.2);

        let p1 = scene.transforms.get(1).unwrap().position;
        let p2 = scene.transforms.get(2).unwrap().position;
        assert_eq!(p1, Vector3::new(0.0, 0.0, -0.3));
        assert_eq!(p2, Vector3::new(0.3, 0.0, 0.0));

        let model = scene.model_matrix(2);
        assert!((model.w.x - 0.3).abs() < 1e-6);
        assert!((model.w.z + 0.3).abs() < 1e-6);
        assert_eq!(scene.model_matrix(3), Matrix4::identity());
    }

    #[test]
    fn test_binding_to_missing_object_rejected() {
        let config = ViewerConfig::default().with_scene(SceneLayout {
            placements: vec![Placement::Static, Placement::Root],
            ..SceneLayout::default()
        });
        assert!(matches!(
            Scene::from_config(&config),
            Err(SceneError::UnknownObject { .. })
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = Scene::new(
            FlyCamera::default(),
            ObjectTransformStore::new(3),
            Hierarchy::new(vec![Placement::Root]).unwrap(),
            MotionSettings::default(),
        );
        assert!(matches!(result, Err(SceneError::LengthMismatch { .. })));
    }
}
