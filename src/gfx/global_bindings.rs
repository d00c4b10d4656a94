//! Global uniform bindings: camera and light data shared by every draw.

use wgpu::Device;

use crate::gfx::camera::CameraUniform;
use crate::gfx::uniform::UniformBuffer;

/// Per-frame global uniform content. Must match `GlobalUniform` in
/// `shader.wgsl` exactly (112 bytes, no implicit padding).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUboContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_position: [f32; 3],
    light_intensity: f32,
    light_color: [f32; 3],
    ambient: f32,
}

/// Single point light illuminating the room.
#[derive(Copy, Clone, Debug)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub ambient: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        // Roughly the original scene: warm-white key light high to the
        // right, strong ambient so unlit faces stay readable.
        Self {
            position: [3.0, 5.0, 2.0],
            color: [1.0, 1.0, 1.0],
            intensity: 0.7,
            ambient: 0.55,
        }
    }
}

pub type GlobalUbo = UniformBuffer<GlobalUboContent>;

/// Uploads camera and light data into the global uniform buffer.
pub fn update_global_ubo(
    ubo: &mut GlobalUbo,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    light: LightConfig,
) {
    ubo.update_content(
        queue,
        GlobalUboContent {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_position: light.position,
            light_intensity: light.intensity,
            light_color: light.color,
            ambient: light.ambient,
        },
    );
}

/// Bind group management for the global uniforms (slot 0 in the pipeline).
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    pub fn new(device: &Device) -> Self {
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Globals Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &Device, ubo: &GlobalUbo) {
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        }));
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// # Panics
    /// Panics if `create_bind_group()` has not been called yet.
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}
