use cgmath::*;

use crate::config::CameraSettings;

const WORLD_UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_FOV: f32 = 1.0;
pub const MAX_FOV: f32 = 90.0;

/// Held-key movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

/// Free-fly camera driven by yaw/pitch angles.
///
/// Pointer motion turns the camera, scrolling narrows or widens the field of
/// view, and held keys move the eye along the view direction or sideways.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    /// Degrees, unbounded.
    yaw: f32,
    /// Degrees, kept within [-89, 89].
    pitch: f32,
    /// Vertical field of view in degrees, kept within [1, 90].
    fov: f32,
    last_pointer: Option<(f32, f32)>,
    pub sensitivity: f32,
    pub speed: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

impl FlyCamera {
    pub fn new(settings: &CameraSettings) -> Self {
        let mut camera = Self {
            position: settings.position,
            front: -Vector3::unit_z(),
            up: WORLD_UP,
            yaw: settings.yaw,
            pitch: settings.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov: settings.fov.clamp(MIN_FOV, MAX_FOV),
            last_pointer: None,
            sensitivity: settings.sensitivity,
            speed: settings.speed,
            znear: settings.znear,
            zfar: settings.zfar,
        };
        camera.update_front();
        camera
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Feeds an absolute pointer position.
    ///
    /// The first position after construction or [`reset_pointer`] only becomes
    /// the reference point, so capturing the cursor never makes the view jump.
    ///
    /// [`reset_pointer`]: FlyCamera::reset_pointer
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let (last_x, last_y) = self.last_pointer.unwrap_or((x, y));
        self.last_pointer = Some((x, y));

        // Screen y grows downwards; moving the pointer up looks up.
        let x_offset = (x - last_x) * self.sensitivity;
        let y_offset = (last_y - y) * self.sensitivity;

        self.yaw += x_offset;
        self.pitch = (self.pitch + y_offset).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_front();
    }

    /// Forgets the pointer reference point
    pub fn reset_pointer(&mut self) {
        self.last_pointer = None;
    }

    /// Zooms by narrowing (positive `dy`) or widening the field of view
    pub fn on_scroll(&mut self, dy: f32) {
        self.fov = (self.fov - dy).clamp(MIN_FOV, MAX_FOV);
    }

    /// Moves the eye for one frame of a held movement key
    pub fn on_key_held(&mut self, direction: MoveDirection, delta_time: f32) {
        let distance = self.speed * delta_time;
        match direction {
            MoveDirection::Forward => self.position += self.front * distance,
            MoveDirection::Backward => self.position -= self.front * distance,
            MoveDirection::StrafeLeft => self.position -= self.right() * distance,
            MoveDirection::StrafeRight => self.position += self.right() * distance,
        }
    }

    pub fn right(&self) -> Vector3<f32> {
        self.front.cross(self.up).normalize()
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.front, self.up)
    }

    /// OpenGL-convention perspective projection; see `OPENGL_TO_WGPU_MATRIX`
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        perspective(Deg(self.fov), aspect, self.znear, self.zfar)
    }

    fn update_front(&mut self) {
        let yaw = Rad::from(Deg(self.yaw));
        let pitch = Rad::from(Deg(self.pitch));
        self.front = Vector3::new(
            yaw.0.cos() * pitch.0.cos(),
            pitch.0.sin(),
            yaw.0.sin() * pitch.0.cos(),
        )
        .normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = FlyCamera::default();
        assert!((camera.front() - Vector3::new(0.0, 0.0, -1.0)).magnitude() < EPSILON);
        assert_eq!(camera.position, Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.fov(), 45.0);
    }

    #[test]
    fn test_first_pointer_event_only_seeds() {
        let mut camera = FlyCamera::default();
        let (yaw, pitch) = (camera.yaw(), camera.pitch());

        camera.on_pointer_move(500.0, 300.0);
        assert_eq!(camera.yaw(), yaw);
        assert_eq!(camera.pitch(), pitch);

        camera.on_pointer_move(510.0, 300.0);
        assert!((camera.yaw() - (yaw + 1.0)).abs() < EPSILON);
        assert_eq!(camera.pitch(), pitch);
    }

    #[test]
    fn test_pointer_up_looks_up() {
        let mut camera = FlyCamera::default();
        camera.on_pointer_move(0.0, 100.0);
        camera.on_pointer_move(0.0, 50.0);
        assert!((camera.pitch() - 5.0).abs() < EPSILON);
        assert!(camera.front().y > 0.0);
    }

    #[test]
    fn test_reset_pointer_reseeds() {
        let mut camera = FlyCamera::default();
        camera.on_pointer_move(0.0, 0.0);
        camera.reset_pointer();
        let yaw = camera.yaw();
        camera.on_pointer_move(1000.0, 0.0);
        assert_eq!(camera.yaw(), yaw);
    }

    #[test]
    fn test_random_pointer_motion_keeps_invariants() {
        let mut camera = FlyCamera::default();
        let mut rng = rand::rng();

        for _ in 0..10_000 {
            let x = rng.random_range(-5000.0f32..5000.0);
            let y = rng.random_range(-5000.0f32..5000.0);
            camera.on_pointer_move(x, y);

            assert!(camera.pitch() >= -PITCH_LIMIT && camera.pitch() <= PITCH_LIMIT);
            assert!((camera.front().magnitude() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_random_scrolling_keeps_fov_in_range() {
        let mut camera = FlyCamera::default();
        let mut rng = rand::rng();

        for _ in 0..10_000 {
            camera.on_scroll(rng.random_range(-50.0f32..50.0));
            assert!(camera.fov() >= MIN_FOV && camera.fov() <= MAX_FOV);
        }
    }

    #[test]
    fn test_scroll_clamps_at_both_ends() {
        let mut camera = FlyCamera::default();
        camera.on_scroll(1000.0);
        assert_eq!(camera.fov(), MIN_FOV);
        camera.on_scroll(-1000.0);
        assert_eq!(camera.fov(), MAX_FOV);
    }

    #[test]
    fn test_movement_scales_with_delta_time() {
        let mut camera = FlyCamera::default();
        camera.on_key_held(MoveDirection::Forward, 1.0);
        assert!((camera.position - Vector3::new(0.0, 0.0, 2.5)).magnitude() < EPSILON);

        camera.on_key_held(MoveDirection::StrafeRight, 0.4);
        assert!((camera.position - Vector3::new(1.0, 0.0, 2.5)).magnitude() < EPSILON);

        camera.on_key_held(MoveDirection::StrafeLeft, 0.4);
        camera.on_key_held(MoveDirection::Backward, 1.0);
        assert!((camera.position - Vector3::new(0.0, 0.0, 5.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_zero_delta_time_does_not_move() {
        let mut camera = FlyCamera::default();
        let before = camera.position;
        for direction in [
            MoveDirection::Forward,
            MoveDirection::Backward,
            MoveDirection::StrafeLeft,
            MoveDirection::StrafeRight,
        ] {
            camera.on_key_held(direction, 0.0);
        }
        assert_eq!(camera.position, before);
    }

    #[test]
    fn test_view_matrix_maps_target_onto_negative_z() {
        let camera = FlyCamera::default();
        let view = camera.view_matrix();
        let target = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((target.z + 5.0).abs() < EPSILON);
        assert!(target.x.abs() < EPSILON && target.y.abs() < EPSILON);
    }

    #[test]
    fn test_projection_follows_fov() {
        let mut camera = FlyCamera::default();
        let wide = camera.projection_matrix(16.0 / 9.0);
        camera.on_scroll(20.0);
        let narrow = camera.projection_matrix(16.0 / 9.0);
        // Narrower field of view means a larger focal scale.
        assert!(narrow.y.y > wide.y.y);
    }
}
