//! Scene objects: meshes plus a decomposed TRS transform.
//!
//! Unlike a general engine, objects here always transform as
//! translation × yaw rotation × uniform scale, because that is the entire
//! manipulation vocabulary of the planner. The matrix is derived on demand.

use cgmath::{Matrix4, Rad, Vector3};
use wgpu::Device;

use crate::gfx::geometry::GeometryData;
use crate::gfx::picking::Aabb;
use crate::scene::material::MaterialId;
use crate::scene::vertex::Vertex3D;

/// Stable handle to an object in the scene, unaffected by removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

/// One draw call worth of geometry with a single material.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    pub material: MaterialId,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn new(geometry: GeometryData, material: MaterialId) -> Self {
        let index_count = geometry.indices.len() as u32;
        let vertices = geometry
            .positions
            .iter()
            .zip(geometry.normals.iter())
            .map(|(&position, &normal)| Vertex3D { position, normal })
            .collect();

        Self {
            vertices,
            indices: geometry.indices,
            material,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    /// Bounds of the raw vertices in object-local space.
    pub fn local_bounds(&self) -> Aabb {
        let mut min = Vector3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vector3::new(f32::MIN, f32::MIN, f32::MIN);
        for v in &self.vertices {
            min.x = min.x.min(v.position[0]);
            min.y = min.y.min(v.position[1]);
            min.z = min.z.min(v.position[2]);
            max.x = max.x.max(v.position[0]);
            max.y = max.y.max(v.position[1]);
            max.z = max.z.max(v.position[2]);
        }
        Aabb::new(min, max)
    }
}

/// Per-object GPU state: the transform uniform and its bind group.
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
}

/// A renderable scene object.
pub struct Object {
    pub id: ObjectId,
    pub meshes: Vec<Mesh>,

    pub position: Vector3<f32>,
    pub yaw: Rad<f32>,
    pub scale: f32,
    pub visible: bool,

    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(id: ObjectId, meshes: Vec<Mesh>) -> Self {
        Self {
            id,
            meshes,
            position: Vector3::new(0.0, 0.0, 0.0),
            yaw: Rad(0.0),
            scale: 1.0,
            visible: true,
            gpu_resources: None,
        }
    }

    /// World transform: T * R(yaw) * S.
    pub fn transform_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_y(self.yaw)
            * Matrix4::from_scale(self.scale)
    }

    /// Union of all mesh bounds in object-local space.
    pub fn local_bounds(&self) -> Aabb {
        let mut bounds: Option<Aabb> = None;
        for mesh in &self.meshes {
            let b = mesh.local_bounds();
            bounds = Some(match bounds {
                Some(prev) => prev.union(&b),
                None => b,
            });
        }
        bounds.unwrap_or(Aabb::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
        ))
    }

    /// Uploads vertex/index buffers and creates the transform uniform.
    pub fn init_gpu_resources(&mut self, device: &Device) {
        for mesh in &mut self.meshes {
            let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Vertex Buffer"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            );
            let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Index Buffer"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            );
            mesh.vertex_buffer = Some(vertex_buffer);
            mesh.index_buffer = Some(index_buffer);
        }

        let transform: Matrix4<f32> = self.transform_matrix();
        let transform_data: &[f32; 16] = transform.as_ref();

        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = Self::transform_bind_group_layout(device);
        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
        });
    }

    /// Writes the current transform to the GPU, if resources exist.
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            let transform: Matrix4<f32> = self.transform_matrix();
            // cgmath matrices are column-major, which is what the GPU expects
            let transform_data: &[f32; 16] = transform.as_ref();
            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    pub fn transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }

    /// Vertex-stage uniform layout for the object transform.
    pub fn transform_bind_group_layout(device: &Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Transform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }
}

/// Mesh drawing extension for render passes. Bind groups (global, transform,
/// material) must already be set by the caller.
pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // not uploaded yet
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_box;

    #[test]
    fn trs_matrix_applies_in_order() {
        let mut object = Object::new(ObjectId(1), vec![Mesh::new(generate_box(2.0, 2.0, 2.0), 0)]);
        object.position = Vector3::new(1.0, 0.0, -2.0);
        object.scale = 0.5;

        let m = object.transform_matrix();
        let corner = m * cgmath::Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert!((corner.x - 1.5).abs() < 1e-5);
        assert!((corner.y - 0.5).abs() < 1e-5);
        assert!((corner.z + 1.5).abs() < 1e-5);
    }

    #[test]
    fn object_bounds_union_meshes() {
        let mut low = generate_box(1.0, 1.0, 1.0);
        for p in &mut low.positions {
            p[1] -= 2.0;
        }
        let object = Object::new(
            ObjectId(2),
            vec![
                Mesh::new(generate_box(1.0, 1.0, 1.0), 0),
                Mesh::new(low, 0),
            ],
        );
        let bounds = object.local_bounds();
        assert!((bounds.min.y + 2.5).abs() < 1e-5);
        assert!((bounds.max.y - 0.5).abs() < 1e-5);
    }
}
