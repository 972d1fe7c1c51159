//! Per-mesh model matrix uniforms

use cgmath::{Matrix4, SquareMatrix};

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
    uniform_buffer::UniformBuffer,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl From<Matrix4<f32>> for ModelUniform {
    fn from(model: Matrix4<f32>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Matrix4::<f32>::identity().into()
    }
}

pub type ModelUBO = UniformBuffer<ModelUniform>;

/// Shared layout for the per-mesh transform bind groups (slot 1)
pub struct TransformBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl TransformBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            bind_group_layout: BindGroupLayoutBuilder::new()
                .next_binding_vertex(binding_types::uniform())
                .create(device, "Transform Bind Group Layout"),
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// Creates a uniform initialised to identity and its bind group
    pub fn create(&self, device: &wgpu::Device) -> (ModelUBO, wgpu::BindGroup) {
        let ubo = ModelUBO::new_with_data(device, &ModelUniform::default());
        let bind_group = BindGroupBuilder::new(&self.bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Transform Bind Group");
        (ubo, bind_group)
    }
}
