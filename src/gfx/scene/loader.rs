//! Wavefront OBJ loading
//!
//! Produces CPU-side meshes only; GPU upload happens in the render engine.

use std::path::Path;

use crate::error::ViewerError;

use super::object::{Mesh, Model};

/// Loads every sub-object of an OBJ file as a triangulated, single-indexed mesh.
///
/// A missing or broken MTL file is not fatal: meshes just lose their diffuse map.
pub fn load_model(path: &Path) -> Result<Model, ViewerError> {
    let display_path = path.display().to_string();

    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| ViewerError::ModelLoad {
        path: display_path.clone(),
        source,
    })?;

    let materials = materials.unwrap_or_else(|err| {
        log::warn!("No usable materials for '{}': {}", display_path, err);
        Vec::new()
    });

    if models.is_empty() {
        return Err(ViewerError::EmptyModel(display_path));
    }

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut meshes = Vec::with_capacity(models.len());

    for m in &models {
        let source = &m.mesh;
        log::debug!(
            "mesh '{}': {} vertices, {} triangles, material {:?}",
            m.name,
            source.positions.len() / 3,
            source.indices.len() / 3,
            source.material_id
        );

        let mut mesh = Mesh::new(
            &m.name,
            &source.positions,
            &source.normals,
            &source.texcoords,
            source.indices.clone(),
        );

        mesh.diffuse_texture = source
            .material_id
            .and_then(|id| materials.get(id))
            .and_then(|material| material.diffuse_texture.as_deref())
            .filter(|texture| !texture.is_empty())
            .map(|texture| base_dir.join(texture));

        meshes.push(mesh);
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| display_path.clone());

    let model = Model { name, meshes };
    log::info!(
        "Loaded '{}': {} meshes, {} vertices, {} triangles",
        display_path,
        model.meshes.len(),
        model.vertex_count(),
        model.triangle_count()
    );

    Ok(model)
}
