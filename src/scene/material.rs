//! Material system with group-based recoloring.
//!
//! Every shaded surface in the scene owns a `Material` instance stored in the
//! central [`MaterialRegistry`]. Materials are additionally registered under a
//! [`MaterialGroup`], the unit of recoloring exposed in the UI: editing a
//! group's color rewrites the base color of every material in that group and
//! nothing else.

use std::collections::HashMap;

use wgpu::Device;

use crate::gfx::uniform::UniformBuffer;

/// Index of a material inside the registry. Stable for the scene lifetime;
/// materials are never removed, only their owning meshes are.
pub type MaterialId = usize;

/// Named bucket of materials that recolor together.
///
/// One group can span many meshes and many items (every spawned bed shares
/// `BedMain`), matching how the color panel edits "all bed frames" at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialGroup {
    Walls,
    Floor,
    BedMain,
    BedTextile,
    SofaBody,
    SofaCushionWarm,
    SofaCushionLight,
    Desk,
    Chair,
    WardrobeMain,
    WardrobeAccent,
    WardrobeHandle,
    CoffeeTable,
    Rug,
    PartitionFrame,
    PartitionGlass,
    LampPole,
    LampShade,
}

/// Converts `0xRRGGBB` into linear-ish [r, g, b] floats.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// GPU uniform data for a material. Must match `MaterialUniform` in
/// `shader.wgsl` exactly (48 bytes, no implicit padding).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub roughness: f32,
    pub metallic: f32,
    _padding: [f32; 3],
}

type MaterialUbo = UniformBuffer<MaterialUniform>;

/// A single shaded-surface material.
///
/// CPU-side properties plus lazily created GPU resources. The uniform write
/// is skipped when the content is unchanged, so syncing every frame is cheap.
pub struct Material {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub roughness: f32,
    pub metallic: f32,

    ubo: Option<MaterialUbo>,
    bind_group: Option<wgpu::BindGroup>,
}

impl Material {
    pub fn new(base_color: [f32; 3], roughness: f32, metallic: f32) -> Self {
        Self {
            base_color: [base_color[0], base_color[1], base_color[2], 1.0],
            emissive: [0.0, 0.0, 0.0],
            roughness: roughness.clamp(0.0, 1.0),
            metallic: metallic.clamp(0.0, 1.0),
            ubo: None,
            bind_group: None,
        }
    }

    /// Builder: alpha transparency (partition glass, selection ring).
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder: emissive color (lamp shade, scale handle).
    pub fn with_emission(mut self, r: f32, g: f32, b: f32) -> Self {
        self.emissive = [r, g, b];
        self
    }

    fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            emissive: self.emissive,
            roughness: self.roughness,
            metallic: self.metallic,
            _padding: [0.0; 3],
        }
    }

    /// Creates GPU resources on first call, then keeps the uniform in sync.
    pub fn update_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        if self.ubo.is_none() {
            let ubo = MaterialUbo::new(device);
            let layout = Self::bind_group_layout(device);
            self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Material Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.binding_resource(),
                }],
            }));
            self.ubo = Some(ubo);
        }

        let uniform = self.uniform();
        if let Some(ubo) = &mut self.ubo {
            ubo.update_content(queue, uniform);
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }

    /// Fragment-stage uniform layout, shared by every material. wgpu matches
    /// bind group layouts structurally, so each call site may create its own.
    pub fn bind_group_layout(device: &Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
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

/// Central material storage plus the group index used for recoloring.
pub struct MaterialRegistry {
    materials: Vec<Material>,
    groups: HashMap<MaterialGroup, Vec<MaterialId>>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            groups: HashMap::new(),
        }
    }

    /// Adds a material without group membership (ring, handle).
    pub fn add(&mut self, material: Material) -> MaterialId {
        let id = self.materials.len();
        self.materials.push(material);
        id
    }

    /// Adds a material and registers it under `group` for recoloring.
    pub fn add_grouped(&mut self, group: MaterialGroup, material: Material) -> MaterialId {
        let id = self.add(material);
        self.groups.entry(group).or_default().push(id);
        id
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id)
    }

    /// Rewrites the base color of every material in `group`, preserving each
    /// material's alpha.
    pub fn set_group_color(&mut self, group: MaterialGroup, color: [f32; 3]) {
        let Some(ids) = self.groups.get(&group) else {
            return;
        };
        for &id in ids {
            let mat = &mut self.materials[id];
            mat.base_color = [color[0], color[1], color[2], mat.base_color[3]];
        }
    }

    /// Current color of a group: the first registered material's base color,
    /// or `None` if nothing is registered yet (e.g. no sofa in the room).
    pub fn group_color(&self, group: MaterialGroup) -> Option<[f32; 3]> {
        let ids = self.groups.get(&group)?;
        let first = self.materials.get(*ids.first()?)?;
        Some([
            first.base_color[0],
            first.base_color[1],
            first.base_color[2],
        ])
    }

    /// Syncs every material to the GPU, creating resources as needed.
    pub fn update_all_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for material in &mut self.materials {
            material.update_gpu_resources(device, queue);
        }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}
