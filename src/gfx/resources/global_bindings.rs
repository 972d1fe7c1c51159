//! Global uniform bindings for camera and light data
//!
//! Bound to slot 0 of the pipeline and shared by every mesh.

use crate::{
    config::LightSettings,
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content.
/// MUST match the `Globals` struct in `phong.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_proj: [[f32; 4]; 4],
    view_position: [f32; 4],
    light_position: [f32; 4],
    light_ambient: [f32; 4],
    light_diffuse: [f32; 4],
    light_specular: [f32; 4],
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, light: &LightSettings) -> Self {
        let extend = |v: [f32; 3], w: f32| [v[0], v[1], v[2], w];
        Self {
            view_proj: camera.view_proj,
            view_position: camera.view_position,
            light_position: extend(light.position, 1.0),
            light_ambient: extend(light.ambient, 0.0),
            light_diffuse: extend(light.diffuse, 0.0),
            light_specular: extend(light.specular, 0.0),
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with this frame's camera and the light
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: &LightSettings,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, light));
}

/// Layout and bind group for the global uniforms
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_size_matches_shader() {
        // mat4x4 + five vec4
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 64 + 5 * 16);
    }

    #[test]
    fn test_light_is_padded_to_vec4() {
        let content = GlobalUBOContent::new(CameraUniform::default(), &LightSettings::default());
        assert_eq!(content.light_position, [2.0, 3.0, 2.0, 1.0]);
        assert_eq!(content.light_diffuse, [0.8, 0.8, 0.8, 0.0]);
    }
}
