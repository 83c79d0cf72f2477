use crate::components::entity::Entity;
use crate::renderer::instance::{MeshInstance, RenderBuffer};

/// Build the render buffer from a set of entities.
/// Inactive entities and entities without a mesh are skipped.
/// At most `max_instances` meshes are written.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
    max_instances: usize,
) {
    buffer.clear();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else {
            continue;
        };
        if buffer.instances.len() >= max_instances {
            log::warn!("render buffer full at {max_instances} instances");
            break;
        }
        buffer.push(MeshInstance::from_mesh(entity.world_matrix().to_cols_array(), mesh));
    }
}
