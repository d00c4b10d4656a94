//! Furniture catalog: procedural part assemblies for every kind.
//!
//! Each kind is described as a list of parts (primitive geometry, offset,
//! material group, material). The session turns a blueprint into scene
//! meshes and derives the item's local bounding box from the same parts, so
//! picking and rendering always agree.

use cgmath::Vector3;

use crate::gfx::geometry::{generate_box, generate_cylinder, GeometryData};
use crate::gfx::picking::Aabb;
use crate::room::item::FurnitureKind;
use crate::scene::material::{rgb, Material, MaterialGroup};

/// One primitive of a furniture assembly.
pub struct Part {
    pub geometry: GeometryData,
    pub offset: Vector3<f32>,
    pub group: MaterialGroup,
    pub material: Material,
}

impl Part {
    /// Geometry with the part offset baked into the positions.
    pub fn baked_geometry(&self) -> GeometryData {
        let mut geometry = self.geometry.clone();
        geometry.translate(self.offset.into());
        geometry
    }
}

/// Everything needed to spawn one kind of furniture.
pub struct Blueprint {
    pub kind: FurnitureKind,
    pub base_radius: f32,
    pub default_scale: f32,
    pub parts: Vec<Part>,
}

impl Blueprint {
    /// Bounds of all parts at scale 1, offsets applied.
    pub fn local_bounds(&self) -> Aabb {
        let mut bounds: Option<Aabb> = None;
        for part in &self.parts {
            let (min, max) = part.geometry.bounds();
            let b = Aabb::from_min_max(min, max).translated(part.offset);
            bounds = Some(match bounds {
                Some(prev) => prev.union(&b),
                None => b,
            });
        }
        bounds.unwrap_or(Aabb::from_min_max([0.0; 3], [0.0; 3]))
    }
}

/// Footprint radius of a kind at scale 1.
pub fn base_radius(kind: FurnitureKind) -> f32 {
    match kind {
        FurnitureKind::Bed => 1.0,
        FurnitureKind::Desk => 0.8,
        FurnitureKind::Chair => 0.6,
        FurnitureKind::Wardrobe => 0.9,
        FurnitureKind::Sofa => 1.1,
        FurnitureKind::CoffeeTable => 0.7,
        FurnitureKind::Rug => 1.8,
        FurnitureKind::Partition => 1.0,
        FurnitureKind::Lamp => 0.4,
    }
}

/// Scale a kind spawns at before any user resizing.
pub fn default_scale(kind: FurnitureKind) -> f32 {
    match kind {
        FurnitureKind::Bed | FurnitureKind::Desk | FurnitureKind::Chair
        | FurnitureKind::Wardrobe => 0.8,
        FurnitureKind::Sofa => 0.9,
        FurnitureKind::CoffeeTable
        | FurnitureKind::Rug
        | FurnitureKind::Partition
        | FurnitureKind::Lamp => 1.0,
    }
}

fn boxed(
    dims: [f32; 3],
    offset: [f32; 3],
    group: MaterialGroup,
    material: Material,
) -> Part {
    Part {
        geometry: generate_box(dims[0], dims[1], dims[2]),
        offset: Vector3::from(offset),
        group,
        material,
    }
}

fn cylinder(
    radius: f32,
    height: f32,
    segments: u32,
    offset: [f32; 3],
    group: MaterialGroup,
    material: Material,
) -> Part {
    Part {
        geometry: generate_cylinder(radius, height, segments),
        offset: Vector3::from(offset),
        group,
        material,
    }
}

/// Builds the part list for a kind. Dimensions are at scale 1; the spawn
/// default scale shrinks most kinds slightly.
pub fn blueprint(kind: FurnitureKind) -> Blueprint {
    let parts = match kind {
        FurnitureKind::Bed => bed_parts(),
        FurnitureKind::Desk => desk_parts(),
        FurnitureKind::Chair => chair_parts(),
        FurnitureKind::Wardrobe => wardrobe_parts(),
        FurnitureKind::Sofa => sofa_parts(),
        FurnitureKind::CoffeeTable => coffee_table_parts(),
        FurnitureKind::Rug => rug_parts(),
        FurnitureKind::Partition => partition_parts(),
        FurnitureKind::Lamp => lamp_parts(),
    };

    Blueprint {
        kind,
        base_radius: base_radius(kind),
        default_scale: default_scale(kind),
        parts,
    }
}

fn bed_parts() -> Vec<Part> {
    vec![
        boxed(
            [1.8, 0.25, 1.2],
            [0.0, 0.125, 0.0],
            MaterialGroup::BedMain,
            Material::new(rgb(0x8b7d71), 0.9, 0.1),
        ),
        boxed(
            [1.8, 0.22, 1.2],
            [0.0, 0.25 + 0.11, 0.0],
            MaterialGroup::BedTextile,
            Material::new(rgb(0xfdfdfd), 0.98, 0.0),
        ),
        boxed(
            [1.75, 0.06, 1.0],
            [0.02, 0.25 + 0.22 + 0.03, 0.05],
            MaterialGroup::BedTextile,
            Material::new(rgb(0xd0d3d8), 0.99, 0.0),
        ),
    ]
}

fn desk_parts() -> Vec<Part> {
    let mut parts = vec![boxed(
        [1.4, 0.1, 0.6],
        [0.0, 0.75, 0.0],
        MaterialGroup::Desk,
        Material::new(rgb(0xd1b79a), 0.8, 0.05),
    )];
    for (x, z) in [(-0.6, -0.25), (0.6, -0.25), (-0.6, 0.25), (0.6, 0.25)] {
        parts.push(boxed(
            [0.08, 0.7, 0.08],
            [x, 0.35, z],
            MaterialGroup::Desk,
            Material::new(rgb(0x232733), 0.9, 0.05),
        ));
    }
    parts
}

fn chair_parts() -> Vec<Part> {
    let mut parts = vec![
        boxed(
            [0.6, 0.1, 0.6],
            [0.0, 0.55, 0.0],
            MaterialGroup::Chair,
            Material::new(rgb(0xd6b89a), 0.9, 0.0),
        ),
        boxed(
            [0.6, 0.7, 0.08],
            [0.0, 0.95, -0.25],
            MaterialGroup::Chair,
            Material::new(rgb(0xd6b89a), 0.9, 0.0),
        ),
    ];
    for (x, z) in [(-0.25, -0.25), (0.25, -0.25), (-0.25, 0.25), (0.25, 0.25)] {
        parts.push(boxed(
            [0.06, 0.55, 0.06],
            [x, 0.275, z],
            MaterialGroup::Chair,
            Material::new(rgb(0x232733), 0.9, 0.0),
        ));
    }
    parts
}

fn wardrobe_parts() -> Vec<Part> {
    vec![
        boxed(
            [1.0, 2.0, 0.4],
            [0.0, 1.0, 0.0],
            MaterialGroup::WardrobeMain,
            Material::new(rgb(0x444444), 0.95, 0.0),
        ),
        boxed(
            [1.02, 2.02, 0.02],
            [0.0, 1.0, 0.21],
            MaterialGroup::WardrobeAccent,
            Material::new(rgb(0xf4f5f7), 0.9, 0.0),
        ),
        boxed(
            [0.03, 0.35, 0.03],
            [-0.15, 1.0, 0.24],
            MaterialGroup::WardrobeHandle,
            Material::new(rgb(0x111111), 0.3, 0.8),
        ),
        boxed(
            [0.03, 0.35, 0.03],
            [0.15, 1.0, 0.24],
            MaterialGroup::WardrobeHandle,
            Material::new(rgb(0x111111), 0.3, 0.8),
        ),
    ]
}

fn sofa_parts() -> Vec<Part> {
    let body = || Material::new(rgb(0x8b5a35), 0.9, 0.0);
    let mut parts = vec![
        boxed([1.9, 0.15, 0.9], [0.0, 0.2, 0.0], MaterialGroup::SofaBody, body()),
        boxed([1.8, 0.25, 0.8], [0.0, 0.4, 0.0], MaterialGroup::SofaBody, body()),
        boxed([1.8, 0.55, 0.12], [0.0, 0.8, -0.34], MaterialGroup::SofaBody, body()),
        boxed([0.12, 0.5, 0.8], [-0.9, 0.65, 0.0], MaterialGroup::SofaBody, body()),
        boxed([0.12, 0.5, 0.8], [0.9, 0.65, 0.0], MaterialGroup::SofaBody, body()),
    ];
    parts.push(boxed(
        [0.55, 0.25, 0.3],
        [-0.3, 0.9, -0.25],
        MaterialGroup::SofaCushionWarm,
        Material::new(rgb(0xf4c542), 0.98, 0.0),
    ));
    parts.push(boxed(
        [0.55, 0.25, 0.3],
        [0.3, 0.9, -0.25],
        MaterialGroup::SofaCushionLight,
        Material::new(rgb(0xf4c542), 0.98, 0.0),
    ));
    parts
}

fn coffee_table_parts() -> Vec<Part> {
    let mut parts = vec![
        boxed(
            [1.0, 0.06, 0.6],
            [0.0, 0.45, 0.0],
            MaterialGroup::CoffeeTable,
            Material::new(rgb(0x222222), 0.7, 0.05),
        ),
        boxed(
            [0.96, 0.05, 0.56],
            [0.0, 0.25, 0.0],
            MaterialGroup::CoffeeTable,
            Material::new(rgb(0x222222), 0.8, 0.02),
        ),
    ];
    for (x, z) in [(-0.47, -0.28), (0.47, -0.28), (-0.47, 0.28), (0.47, 0.28)] {
        parts.push(boxed(
            [0.07, 0.42, 0.07],
            [x, 0.21, z],
            MaterialGroup::CoffeeTable,
            Material::new(rgb(0x222222), 0.8, 0.02),
        ));
    }
    parts
}

fn rug_parts() -> Vec<Part> {
    vec![boxed(
        [3.4, 0.02, 2.4],
        [0.0, 0.01, 0.0],
        MaterialGroup::Rug,
        Material::new(rgb(0xf7f7f7), 0.98, 0.0),
    )]
}

fn partition_parts() -> Vec<Part> {
    let frame = || Material::new(rgb(0x141414), 0.35, 0.6);
    let width = 1.8;
    let height = 2.2;
    let thick = 0.04;

    let mut parts = vec![
        boxed([width, 0.06, thick], [0.0, 0.03, 0.0], MaterialGroup::PartitionFrame, frame()),
        boxed(
            [width, 0.06, thick],
            [0.0, height - 0.03, 0.0],
            MaterialGroup::PartitionFrame,
            frame(),
        ),
        boxed(
            [0.06, height, thick],
            [-width / 2.0, height / 2.0, 0.0],
            MaterialGroup::PartitionFrame,
            frame(),
        ),
        boxed(
            [0.06, height, thick],
            [width / 2.0, height / 2.0, 0.0],
            MaterialGroup::PartitionFrame,
            frame(),
        ),
    ];

    let vertical_count = 3;
    let spacing = width / (vertical_count + 1) as f32;
    for i in 1..=vertical_count {
        parts.push(boxed(
            [0.04, height - 0.12, thick],
            [-width / 2.0 + i as f32 * spacing, height / 2.0, 0.0],
            MaterialGroup::PartitionFrame,
            frame(),
        ));
    }

    parts.push(boxed(
        [width - 0.12, 0.04, thick],
        [0.0, height / 2.0, 0.0],
        MaterialGroup::PartitionFrame,
        frame(),
    ));
    parts.push(boxed(
        [width - 0.14, height - 0.14, thick * 0.5],
        [0.0, height / 2.0, 0.0],
        MaterialGroup::PartitionGlass,
        Material::new(rgb(0xffffff), 0.1, 0.0).with_alpha(0.08),
    ));

    parts
}

fn lamp_parts() -> Vec<Part> {
    let pole = || Material::new(rgb(0x222222), 0.4, 0.7);
    let glow = rgb(0xfff2c7);
    vec![
        cylinder(0.18, 0.04, 20, [0.0, 0.02, 0.0], MaterialGroup::LampPole, pole()),
        cylinder(0.03, 1.4, 12, [0.0, 0.75, 0.0], MaterialGroup::LampPole, pole()),
        cylinder(
            0.18,
            0.5,
            20,
            [0.0, 1.45, 0.0],
            MaterialGroup::LampShade,
            Material::new(rgb(0xf5f1e6), 0.85, 0.0).with_emission(
                glow[0] * 0.3,
                glow[1] * 0.3,
                glow[2] * 0.3,
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_parts_and_positive_radius() {
        for kind in FurnitureKind::ALL {
            let bp = blueprint(kind);
            assert!(!bp.parts.is_empty(), "{:?} has no parts", kind);
            assert!(bp.base_radius > 0.0);
            assert!(bp.default_scale > 0.0);
        }
    }

    #[test]
    fn blueprints_rest_on_the_floor() {
        for kind in FurnitureKind::ALL {
            let bounds = blueprint(kind).local_bounds();
            // The wardrobe's oversized front panel dips 1 cm under the
            // floor; anything past that is a misplaced part.
            assert!(bounds.min.y >= -0.02, "{:?} dips below floor", kind);
            assert!(bounds.max.y > 0.0);
        }
    }

    #[test]
    fn wardrobe_is_tallest_of_case_goods() {
        let wardrobe = blueprint(FurnitureKind::Wardrobe).local_bounds();
        let desk = blueprint(FurnitureKind::Desk).local_bounds();
        assert!(wardrobe.max.y > desk.max.y);
        assert!((wardrobe.max.y - 2.02).abs() < 0.1);
    }

    #[test]
    fn partition_glass_is_translucent() {
        let bp = blueprint(FurnitureKind::Partition);
        let glass = bp
            .parts
            .iter()
            .find(|p| p.group == MaterialGroup::PartitionGlass)
            .unwrap();
        assert!(glass.material.base_color[3] < 0.1);
    }
}
