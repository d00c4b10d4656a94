//! Furniture item types.

use cgmath::{Matrix4, Rad, Vector3};

use crate::config::{
    HANDLE_DISTANCE_FACTOR, HANDLE_HEIGHT, RING_INNER_FACTOR, RING_LIFT, RING_OUTER_FACTOR,
    SELECTION_HIGHLIGHT_SCALE,
};
use crate::gfx::picking::Aabb;
use crate::scene::ObjectId;

/// Identifier for a furniture item, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

/// The nine furniture categories the planner knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FurnitureKind {
    Bed,
    Desk,
    Chair,
    Wardrobe,
    Sofa,
    CoffeeTable,
    Rug,
    Partition,
    Lamp,
}

impl FurnitureKind {
    pub const ALL: [FurnitureKind; 9] = [
        FurnitureKind::Bed,
        FurnitureKind::Sofa,
        FurnitureKind::CoffeeTable,
        FurnitureKind::Chair,
        FurnitureKind::Desk,
        FurnitureKind::Wardrobe,
        FurnitureKind::Partition,
        FurnitureKind::Rug,
        FurnitureKind::Lamp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FurnitureKind::Bed => "Bed",
            FurnitureKind::Desk => "Desk",
            FurnitureKind::Chair => "Chair",
            FurnitureKind::Wardrobe => "Wardrobe",
            FurnitureKind::Sofa => "Sofa",
            FurnitureKind::CoffeeTable => "Coffee table",
            FurnitureKind::Rug => "Rug",
            FurnitureKind::Partition => "Partition",
            FurnitureKind::Lamp => "Lamp",
        }
    }
}

/// Scene objects backing one item: the furniture body plus its two
/// selection affordances.
#[derive(Debug, Clone, Copy)]
pub struct ItemVisuals {
    pub body: ObjectId,
    pub ring: ObjectId,
    pub handle: ObjectId,
}

/// A placed furniture instance.
///
/// Position is the floor-contact point (y = 0); `radius` is the current
/// footprint radius used by the placement search, kept equal to
/// `base_radius * base_scale`.
pub struct FurnitureItem {
    pub id: ItemId,
    pub kind: FurnitureKind,
    pub label: String,

    pub position: Vector3<f32>,
    pub yaw: Rad<f32>,

    pub base_radius: f32,
    pub radius: f32,
    pub base_scale: f32,

    /// Bounds of the body geometry at scale 1, in item-local space.
    pub local_bounds: Aabb,
    pub visuals: ItemVisuals,
}

impl FurnitureItem {
    /// Scale actually rendered: base scale plus the selection highlight.
    pub fn visual_scale(&self, selected: bool) -> f32 {
        if selected {
            self.base_scale * SELECTION_HIGHLIGHT_SCALE
        } else {
            self.base_scale
        }
    }

    /// Body transform at the given visual scale.
    pub fn transform(&self, selected: bool) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_y(self.yaw)
            * Matrix4::from_scale(self.visual_scale(selected))
    }

    /// Body bounds in world space (used for pointer hit-testing).
    pub fn world_bounds(&self, selected: bool) -> Aabb {
        self.local_bounds.transform(&self.transform(selected))
    }

    /// Selection ring band in world units: (center, y, inner, outer).
    pub fn ring_band(&self, selected: bool) -> (Vector3<f32>, f32, f32, f32) {
        let s = self.visual_scale(selected);
        (
            self.position,
            RING_LIFT,
            self.base_radius * RING_INNER_FACTOR * s,
            self.base_radius * RING_OUTER_FACTOR * s,
        )
    }

    /// World-space center of the scale handle cube.
    pub fn handle_center(&self, selected: bool) -> Vector3<f32> {
        let s = self.visual_scale(selected);
        let d = self.base_radius * HANDLE_DISTANCE_FACTOR;
        let local = Vector3::new(d * s, HANDLE_HEIGHT * s, d * s);
        let (sin, cos) = self.yaw.0.sin_cos();
        self.position
            + Vector3::new(
                local.x * cos + local.z * sin,
                local.y,
                -local.x * sin + local.z * cos,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    fn item_at(x: f32, z: f32) -> FurnitureItem {
        FurnitureItem {
            id: ItemId(1),
            kind: FurnitureKind::Chair,
            label: "Chair 1".into(),
            position: Vector3::new(x, 0.0, z),
            yaw: Rad(0.0),
            base_radius: 0.6,
            radius: 0.48,
            base_scale: 0.8,
            local_bounds: Aabb::from_min_max([-0.3, 0.0, -0.3], [0.3, 1.3, 0.3]),
            visuals: ItemVisuals {
                body: crate::scene::ObjectId(1),
                ring: crate::scene::ObjectId(2),
                handle: crate::scene::ObjectId(3),
            },
        }
    }

    #[test]
    fn selection_inflates_visual_scale() {
        let item = item_at(0.0, 0.0);
        assert!((item.visual_scale(false) - 0.8).abs() < 1e-6);
        assert!((item.visual_scale(true) - 0.8 * 1.08).abs() < 1e-6);
    }

    #[test]
    fn world_bounds_follow_position_and_scale() {
        let item = item_at(2.0, -1.0);
        let bounds = item.world_bounds(false);
        assert!((bounds.min.x - (2.0 - 0.3 * 0.8)).abs() < 1e-5);
        assert!((bounds.max.z - (-1.0 + 0.3 * 0.8)).abs() < 1e-5);
        assert!((bounds.max.y - 1.3 * 0.8).abs() < 1e-5);
    }

    #[test]
    fn handle_rotates_with_yaw() {
        let mut item = item_at(0.0, 0.0);
        let rest = item.handle_center(false);
        assert!(rest.x > 0.0 && rest.z > 0.0);

        item.yaw = Rad(std::f32::consts::FRAC_PI_2);
        let turned = item.handle_center(false);
        // Quarter turn moves the handle from (+x, +z) to (+x, -z).
        assert!((turned.x - rest.x).abs() < 1e-5 || (turned.x + rest.x).abs() < 1e-5);
        assert!((turned.magnitude2() - rest.magnitude2()).abs() < 1e-4);
        assert!(turned.z < 0.0);
    }
}
