//! Scene container: objects, materials, camera.

use wgpu::Device;

use crate::gfx::camera::ViewCamera;
use crate::scene::material::MaterialRegistry;
use crate::scene::object::{Mesh, Object, ObjectId};

/// Flat scene holding every renderable object plus the material registry.
///
/// Objects are addressed by stable [`ObjectId`]s so the furnishing session
/// can keep references across removals. All CPU-side state works without a
/// GPU; buffers are created lazily by [`Scene::ensure_gpu_resources`].
pub struct Scene {
    pub camera: ViewCamera,
    pub materials: MaterialRegistry,
    objects: Vec<Object>,
    next_object_id: u64,
}

impl Scene {
    pub fn new(camera: ViewCamera) -> Self {
        Self {
            camera,
            materials: MaterialRegistry::new(),
            objects: Vec::new(),
            next_object_id: 1,
        }
    }

    /// Adds an object built from the given meshes and returns its id.
    pub fn add_object(&mut self, meshes: Vec<Mesh>) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        self.objects.push(Object::new(id, meshes));
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Removes an object and drops its GPU resources. Unknown ids are a no-op.
    pub fn remove_object(&mut self, id: ObjectId) {
        self.objects.retain(|o| o.id != id);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Updates per-frame CPU state (camera matrices).
    pub fn update(&mut self) {
        self.camera.update_view_proj();
    }

    /// Creates GPU resources for anything added since the last call and syncs
    /// material uniforms. Safe to call every frame; unchanged uploads are
    /// skipped downstream.
    pub fn ensure_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_none() {
                object.init_gpu_resources(device);
            }
        }
        self.materials.update_all_gpu_resources(device, queue);
    }

    /// Writes every object's current transform to the GPU.
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_box;

    fn test_scene() -> Scene {
        Scene::new(ViewCamera::room_view(1.5))
    }

    #[test]
    fn object_ids_stay_stable_across_removal() {
        let mut scene = test_scene();
        let a = scene.add_object(vec![Mesh::new(generate_box(1.0, 1.0, 1.0), 0)]);
        let b = scene.add_object(vec![Mesh::new(generate_box(1.0, 1.0, 1.0), 0)]);
        let c = scene.add_object(vec![Mesh::new(generate_box(1.0, 1.0, 1.0), 0)]);

        scene.remove_object(b);

        assert!(scene.object(a).is_some());
        assert!(scene.object(b).is_none());
        assert!(scene.object(c).is_some());
        assert_eq!(scene.object_count(), 2);
    }

    #[test]
    fn removing_unknown_id_is_noop() {
        let mut scene = test_scene();
        scene.add_object(vec![Mesh::new(generate_box(1.0, 1.0, 1.0), 0)]);
        scene.remove_object(ObjectId(999));
        assert_eq!(scene.object_count(), 1);
    }
}
