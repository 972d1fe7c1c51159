use cgmath::{Matrix4, SquareMatrix, Vector3};

/// Remaps OpenGL clip-space depth ([-1, 1]) to wgpu's [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

impl CameraUniform {
    /// Builds the uniform from OpenGL-convention view and projection matrices
    pub fn from_matrices(view: Matrix4<f32>, projection: Matrix4<f32>, eye: Vector3<f32>) -> Self {
        Self {
            view_position: [eye.x, eye.y, eye.z, 1.0],
            view_proj: convert_matrix4_to_array(OPENGL_TO_WGPU_MATRIX * projection * view),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{perspective, Deg, Vector4};

    #[test]
    fn test_depth_remapped_to_unit_range() {
        let projection = perspective(Deg(45.0), 1.0, 0.1, 100.0);
        let clip = OPENGL_TO_WGPU_MATRIX * projection;

        let near = clip * Vector4::new(0.0, 0.0, -0.1, 1.0);
        let far = clip * Vector4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
    }
}
