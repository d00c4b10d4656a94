//! Procedural primitive generation.
//!
//! All furniture and room-shell meshes are assembled from these primitives;
//! nothing is loaded from disk. Shapes are generated centered on the origin
//! (boxes, rings) or sitting on their vertical center (cylinders) with
//! per-face normals.

use std::f32::consts::PI;

/// Raw geometry produced by the generators, ready to become a mesh.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifts every position by `offset`. Used to bake part placement into
    /// furniture assemblies so one object holds many primitives.
    pub fn translate(&mut self, offset: [f32; 3]) {
        for p in &mut self.positions {
            p[0] += offset[0];
            p[1] += offset[1];
            p[2] += offset[2];
        }
    }

    /// Axis-aligned bounds of the raw positions (min, max).
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        if self.positions.is_empty() {
            return ([0.0; 3], [0.0; 3]);
        }
        (min, max)
    }
}

/// Generate a box of the given full extents, centered at the origin.
///
/// 24 vertices (4 per face) so each face gets a flat outward normal.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let mut data = GeometryData::new();

    // (normal, four corners counter-clockwise seen from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        (
            [0.0, 0.0, 1.0],
            [[-hw, -hh, hd], [hw, -hh, hd], [hw, hh, hd], [-hw, hh, hd]],
        ),
        (
            [0.0, 0.0, -1.0],
            [[hw, -hh, -hd], [-hw, -hh, -hd], [-hw, hh, -hd], [hw, hh, -hd]],
        ),
        (
            [-1.0, 0.0, 0.0],
            [[-hw, -hh, -hd], [-hw, -hh, hd], [-hw, hh, hd], [-hw, hh, -hd]],
        ),
        (
            [1.0, 0.0, 0.0],
            [[hw, -hh, hd], [hw, -hh, -hd], [hw, hh, -hd], [hw, hh, hd]],
        ),
        (
            [0.0, 1.0, 0.0],
            [[-hw, hh, hd], [hw, hh, hd], [hw, hh, -hd], [-hw, hh, -hd]],
        ),
        (
            [0.0, -1.0, 0.0],
            [[-hw, -hh, -hd], [hw, -hh, -hd], [hw, -hh, hd], [-hw, -hh, hd]],
        ),
    ];

    for (normal, corners) in faces {
        let base = data.positions.len() as u32;
        for corner in corners {
            data.positions.push(corner);
            data.normals.push(normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate an upright cylinder centered at the origin.
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let hh = height / 2.0;
    let segments = segments.max(3);

    // Side wall: two rings of vertices with outward radial normals.
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * 2.0 * PI;
        let (sin, cos) = theta.sin_cos();
        let normal = [cos, 0.0, sin];
        data.positions.push([radius * cos, -hh, radius * sin]);
        data.normals.push(normal);
        data.positions.push([radius * cos, hh, radius * sin]);
        data.normals.push(normal);
    }
    for i in 0..segments {
        let base = i * 2;
        data.indices.extend_from_slice(&[
            base,
            base + 1,
            base + 3,
            base + 3,
            base + 2,
            base,
        ]);
    }

    // Caps: a center vertex fan per cap.
    for (y, normal) in [(hh, [0.0, 1.0, 0.0]), (-hh, [0.0, -1.0, 0.0])] {
        let center = data.positions.len() as u32;
        data.positions.push([0.0, y, 0.0]);
        data.normals.push(normal);
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * 2.0 * PI;
            let (sin, cos) = theta.sin_cos();
            data.positions.push([radius * cos, y, radius * sin]);
            data.normals.push(normal);
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = center + 2 + i;
            if normal[1] > 0.0 {
                data.indices.extend_from_slice(&[center, b, a]);
            } else {
                data.indices.extend_from_slice(&[center, a, b]);
            }
        }
    }

    data
}

/// Generate a flat annulus in the XZ plane (the selection ring).
///
/// Rendered without backface culling, so one winding suffices.
pub fn generate_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segments = segments.max(3);

    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * 2.0 * PI;
        let (sin, cos) = theta.sin_cos();
        data.positions.push([inner_radius * cos, 0.0, inner_radius * sin]);
        data.normals.push([0.0, 1.0, 0.0]);
        data.positions.push([outer_radius * cos, 0.0, outer_radius * sin]);
        data.normals.push([0.0, 1.0, 0.0]);
    }
    for i in 0..segments {
        let base = i * 2;
        data.indices.extend_from_slice(&[
            base,
            base + 2,
            base + 3,
            base + 3,
            base + 1,
            base,
        ]);
    }

    data
}
