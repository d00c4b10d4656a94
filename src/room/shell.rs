//! Static room shell: floor slab and three walls.
//!
//! The front of the room (+Z toward the camera) stays open so the fixed
//! camera can see in. Shell surfaces join the material registry under the
//! `Walls` and `Floor` groups, so the color panel can repaint them like any
//! furniture group.

use crate::config::{ROOM_DEPTH, ROOM_WIDTH, WALL_HEIGHT};
use crate::gfx::geometry::generate_box;
use crate::scene::material::{rgb, Material, MaterialGroup};
use crate::scene::object::Mesh;
use crate::scene::{ObjectId, Scene};

const WALL_THICKNESS: f32 = 0.1;
const FLOOR_THICKNESS: f32 = 0.1;

/// Builds the room shell into the scene and returns its object id.
pub fn build_room_shell(scene: &mut Scene) -> ObjectId {
    let floor_material = scene.materials.add_grouped(
        MaterialGroup::Floor,
        Material::new(rgb(0xc89a6d), 0.95, 0.0),
    );
    let wall_material = scene.materials.add_grouped(
        MaterialGroup::Walls,
        Material::new(rgb(0xe4e1dd), 0.98, 0.0),
    );

    let mut floor = generate_box(ROOM_WIDTH, FLOOR_THICKNESS, ROOM_DEPTH);
    floor.translate([0.0, -FLOOR_THICKNESS / 2.0, 0.0]);

    let mut back_wall = generate_box(ROOM_WIDTH, WALL_HEIGHT, WALL_THICKNESS);
    back_wall.translate([0.0, WALL_HEIGHT / 2.0, -ROOM_DEPTH / 2.0 - WALL_THICKNESS / 2.0]);

    let mut left_wall = generate_box(WALL_THICKNESS, WALL_HEIGHT, ROOM_DEPTH);
    left_wall.translate([-ROOM_WIDTH / 2.0 - WALL_THICKNESS / 2.0, WALL_HEIGHT / 2.0, 0.0]);

    // The right wall runs 0.7x depth and sits flush with the front edge,
    // leaving the back-right corner open.
    let mut right_wall = generate_box(WALL_THICKNESS, WALL_HEIGHT, ROOM_DEPTH * 0.7);
    right_wall.translate([
        ROOM_WIDTH / 2.0 + WALL_THICKNESS / 2.0,
        WALL_HEIGHT / 2.0,
        ROOM_DEPTH * 0.15,
    ]);

    scene.add_object(vec![
        Mesh::new(floor, floor_material),
        Mesh::new(back_wall, wall_material),
        Mesh::new(left_wall, wall_material),
        Mesh::new(right_wall, wall_material),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::ViewCamera;

    #[test]
    fn shell_registers_floor_and_wall_groups() {
        let mut scene = Scene::new(ViewCamera::room_view(1.5));
        let id = build_room_shell(&mut scene);

        assert!(scene.object(id).is_some());
        assert_eq!(scene.materials.group_color(MaterialGroup::Floor), Some(rgb(0xc89a6d)));
        assert_eq!(scene.materials.group_color(MaterialGroup::Walls), Some(rgb(0xe4e1dd)));
    }

    #[test]
    fn right_wall_is_short_and_front_flush() {
        let mut scene = Scene::new(ViewCamera::room_view(1.5));
        let id = build_room_shell(&mut scene);
        let right = scene
            .object(id)
            .unwrap()
            .meshes
            .last()
            .unwrap()
            .local_bounds();

        assert!(right.min.x >= ROOM_WIDTH / 2.0 - 1e-5);
        assert!((right.max.z - ROOM_DEPTH / 2.0).abs() < 1e-5);
        assert!((right.min.z - (ROOM_DEPTH / 2.0 - ROOM_DEPTH * 0.7)).abs() < 1e-5);
    }

    #[test]
    fn floor_top_sits_at_origin_plane() {
        let mut scene = Scene::new(ViewCamera::room_view(1.5));
        let id = build_room_shell(&mut scene);
        let bounds = scene.object(id).unwrap().local_bounds();
        // Floor top at y = 0, walls reach full height.
        assert!((bounds.max.y - WALL_HEIGHT).abs() < 1e-5);
        assert!((bounds.min.y + FLOOR_THICKNESS).abs() < 1e-5);
    }
}
