//! Phong material uniforms and per-texture bind groups
//!
//! One material uniform is shared by the whole model; each mesh gets its own
//! bind group pairing that uniform with the mesh's diffuse texture.

use wgpu::Device;

use crate::{
    config::PhongMaterial,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

use super::texture_resource::TextureResource;

/// GPU uniform data for materials.
/// MUST match the `Material` struct in `phong.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub shininess: f32,
    _padding: [f32; 3],
}

impl From<&PhongMaterial> for MaterialUniform {
    fn from(material: &PhongMaterial) -> Self {
        let extend = |v: [f32; 3]| [v[0], v[1], v[2], 1.0];
        Self {
            ambient: extend(material.ambient),
            diffuse: extend(material.diffuse),
            specular: extend(material.specular),
            shininess: material.shininess,
            _padding: [0.0; 3],
        }
    }
}

type MaterialUBO = UniformBuffer<MaterialUniform>;

/// Material uniform buffer plus the layout every mesh bind group follows
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    ubo: MaterialUBO,
}

impl MaterialBindings {
    pub fn new(device: &Device, material: &PhongMaterial) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(
                wgpu::SamplerBindingType::Filtering,
            ))
            .create(device, "Material Bind Group Layout");

        let ubo = MaterialUBO::new_with_data(device, &MaterialUniform::from(material));

        MaterialBindings {
            bind_group_layout,
            ubo,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// Binds the shared material uniform together with `texture`
    pub fn create_bind_group(&self, device: &Device, texture: &TextureResource) -> wgpu::BindGroup {
        BindGroupBuilder::new(&self.bind_group_layout)
            .resource(self.ubo.binding_resource())
            .texture(&texture.view)
            .sampler(&texture.sampler)
            .create(device, "Material Bind Group")
    }
}
