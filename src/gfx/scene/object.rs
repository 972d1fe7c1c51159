use std::path::PathBuf;

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::gfx::resources::{ModelUBO, ModelUniform};

use super::vertex::Vertex3D;

/// GPU buffers and bind groups of one uploaded mesh
pub struct MeshGpuResources {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub transform_ubo: ModelUBO,
    pub transform_bind_group: wgpu::BindGroup,
    pub material_bind_group: wgpu::BindGroup,
}

/// One sub-object of the loaded model
pub struct Mesh {
    pub name: String,
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    /// Absolute or model-relative path of the diffuse map, if the material has one.
    pub diffuse_texture: Option<PathBuf>,
    pub gpu_resources: Option<MeshGpuResources>, // None until uploaded
}

impl Mesh {
    /// Builds a mesh from flat tobj-style arrays.
    ///
    /// Missing normals are generated from the faces; missing texture
    /// coordinates default to zero.
    pub fn new(
        name: &str,
        positions: &[f32],
        normals: &[f32],
        tex_coords: &[f32],
        indices: Vec<u32>,
    ) -> Self {
        let vertex_count = positions.len() / 3;

        let generated;
        let normals = if normals.len() == positions.len() {
            normals
        } else {
            generated = Self::calculate_face_normals(positions, &indices);
            &generated[..]
        };
        let has_tex_coords = tex_coords.len() == vertex_count * 2;

        let vertices = (0..vertex_count)
            .map(|i| Vertex3D {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
                // OBJ puts v = 0 at the bottom, wgpu at the top.
                tex_coords: if has_tex_coords {
                    [tex_coords[i * 2], 1.0 - tex_coords[i * 2 + 1]]
                } else {
                    [0.0, 0.0]
                },
            })
            .collect();

        Self {
            name: name.to_string(),
            vertices,
            indices,
            diffuse_texture: None,
            gpu_resources: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Averaged, normalised face normals per vertex (flat array like `positions`)
    pub fn calculate_face_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
        let vertex_count = positions.len() / 3;
        let mut normals = vec![0.0; positions.len()];
        let point = |i: usize| {
            cgmath::Vector3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2])
        };

        for triangle in indices.chunks_exact(3) {
            let [i0, i1, i2] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            if i0.max(i1).max(i2) >= vertex_count {
                continue;
            }
            let face_normal = (point(i1) - point(i0)).cross(point(i2) - point(i0));

            for vertex in [i0, i1, i2] {
                normals[vertex * 3] += face_normal.x;
                normals[vertex * 3 + 1] += face_normal.y;
                normals[vertex * 3 + 2] += face_normal.z;
            }
        }

        for normal in normals.chunks_exact_mut(3) {
            let length = (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
            if length > 0.0 {
                normal.iter_mut().for_each(|n| *n /= length);
            }
        }

        normals
    }

    /// Creates vertex/index buffers and attaches the given bind groups
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        transform: (ModelUBO, wgpu::BindGroup),
        material_bind_group: wgpu::BindGroup,
    ) {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let (transform_ubo, transform_bind_group) = transform;
        self.gpu_resources = Some(MeshGpuResources {
            vertex_buffer,
            index_buffer,
            transform_ubo,
            transform_bind_group,
            material_bind_group,
        });
    }

    /// Writes the model matrix to the mesh's uniform, if uploaded
    pub fn update_transform(&mut self, queue: &wgpu::Queue, model: Matrix4<f32>) {
        if let Some(gpu) = self.gpu_resources.as_mut() {
            gpu.transform_ubo.update_content(queue, ModelUniform::from(model));
        }
    }
}

/// Every mesh of one loaded model file
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
}

impl Model {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.vertices.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.indices.len() / 3).sum()
    }
}

pub trait DrawModel<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_model(&mut self, model: &'a Model);
}

impl<'a, 'b> DrawModel<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    /// Binds slots 1 (transform) and 2 (material); slot 0 is set by the caller.
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let Some(gpu) = &mesh.gpu_resources else {
            return; // Skip drawing if not uploaded
        };

        self.set_bind_group(1, &gpu.transform_bind_group, &[]);
        self.set_bind_group(2, &gpu.material_bind_group, &[]);
        self.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        self.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count(), 0, 0..1);
    }

    fn draw_model(&mut self, model: &'b Model) {
        for mesh in &model.meshes {
            self.draw_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_positions() -> Vec<f32> {
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
    }

    #[test]
    fn test_generated_normals_face_the_viewer() {
        let normals = Mesh::calculate_face_normals(&triangle_positions(), &[0, 1, 2]);
        for normal in normals.chunks_exact(3) {
            assert_eq!(normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let normals = Mesh::calculate_face_normals(&triangle_positions(), &[0, 1, 7]);
        assert!(normals.iter().all(|n| *n == 0.0));
    }

    #[test]
    fn test_mesh_flips_v_and_fills_normals() {
        let mesh = Mesh::new(
            "tri",
            &triangle_positions(),
            &[],
            &[0.0, 0.0, 1.0, 0.25, 0.0, 1.0],
            vec![0, 1, 2],
        );
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.vertices()[1].tex_coords, [1.0, 0.75]);
        assert_eq!(mesh.vertices()[2].normal, [0.0, 0.0, 1.0]);
        assert_eq!(mesh.index_count(), 3);
    }

    #[test]
    fn test_missing_tex_coords_default_to_zero() {
        let mesh = Mesh::new("tri", &triangle_positions(), &[], &[], vec![0, 1, 2]);
        assert!(mesh.vertices().iter().all(|v| v.tex_coords == [0.0, 0.0]));
    }

    #[test]
    fn test_model_counts() {
        let model = Model {
            name: "pair".into(),
            meshes: vec![
                Mesh::new("a", &triangle_positions(), &[], &[], vec![0, 1, 2]),
                Mesh::new("b", &triangle_positions(), &[], &[], vec![0, 1, 2]),
            ],
        };
        assert_eq!(model.vertex_count(), 6);
        assert_eq!(model.triangle_count(), 2);
    }
}
