//! # Interaction Module
//!
//! Pointer-driven furniture manipulation: an explicit drag state machine fed
//! by window mouse events. One drag is active at a time; its kind is decided
//! on pointer-down by what was hit, in priority order: scale handle, rotate
//! ring, furniture body, then empty space (which clears the selection).

use cgmath::{Rad, Vector3};

use crate::config::{
    DRAG_FACTOR_MAX, DRAG_FACTOR_MIN, HANDLE_SIZE, ROOM_DEPTH, ROOM_WIDTH, ROTATE_SENSITIVITY,
    SCALE_DRAG_PIXELS,
};
use crate::gfx::picking::{annulus_hit, floor_hit, screen_to_ray, Aabb, Ray};
use crate::room::item::ItemId;
use crate::room::RoomSession;
use crate::scene::Scene;

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Dragging an item across the floor. `grab_offset` keeps the item from
    /// snapping its center under the cursor.
    Move {
        item: ItemId,
        grab_offset: Vector3<f32>,
    },
    /// Dragging the scale handle. Scale is recomputed from the scale at
    /// drag start, so a long drag cannot compound.
    Scale {
        item: ItemId,
        start_x: f32,
        start_scale: f32,
    },
    /// Dragging the rotate ring. Incremental: yaw follows per-event
    /// horizontal travel.
    Rotate { item: ItemId, last_x: f32 },
}

/// Translates pointer events into session mutations.
pub struct PointerInteraction {
    state: DragState,
}

impl PointerInteraction {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Primary button pressed at `screen_pos`.
    pub fn pointer_down(
        &mut self,
        session: &mut RoomSession,
        scene: &mut Scene,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
    ) {
        let ray = screen_to_ray(screen_pos, screen_size, &scene.camera);
        self.begin_drag(session, scene, &ray, screen_pos.0);
    }

    /// Pointer moved while a drag may be active.
    pub fn pointer_move(
        &mut self,
        session: &mut RoomSession,
        scene: &mut Scene,
        screen_pos: (f32, f32),
        screen_size: (f32, f32),
    ) {
        let ray = screen_to_ray(screen_pos, screen_size, &scene.camera);
        self.update_drag(session, scene, &ray, screen_pos.0);
    }

    /// Primary button released. Ends any drag; the selection stays.
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    fn begin_drag(
        &mut self,
        session: &mut RoomSession,
        scene: &mut Scene,
        ray: &Ray,
        screen_x: f32,
    ) {
        // Affordances belong to the selected item only.
        if let Some(item) = session.selected_item() {
            if handle_bounds(item).intersect_ray(ray).is_some() {
                self.state = DragState::Scale {
                    item: item.id,
                    start_x: screen_x,
                    start_scale: item.base_scale,
                };
                return;
            }

            let (center, y, inner, outer) = item.ring_band(true);
            if annulus_hit(ray, center, y, inner, outer).is_some() {
                self.state = DragState::Rotate {
                    item: item.id,
                    last_x: screen_x,
                };
                return;
            }
        }

        // Closest furniture body under the cursor.
        let mut best: Option<(ItemId, f32)> = None;
        for item in session.items() {
            let selected = session.selected() == Some(item.id);
            if let Some(t) = item.world_bounds(selected).intersect_ray(ray) {
                if best.map_or(true, |(_, best_t)| t < best_t) {
                    best = Some((item.id, t));
                }
            }
        }

        match best {
            Some((id, _)) => {
                session.select(scene, Some(id));
                if let Some(p) = floor_hit(ray) {
                    let position = session
                        .item(id)
                        .map(|i| i.position)
                        .unwrap_or(Vector3::new(0.0, 0.0, 0.0));
                    self.state = DragState::Move {
                        item: id,
                        grab_offset: Vector3::new(position.x - p.x, 0.0, position.z - p.z),
                    };
                }
            }
            None => {
                session.select(scene, None);
                self.state = DragState::Idle;
            }
        }
    }

    fn update_drag(
        &mut self,
        session: &mut RoomSession,
        scene: &mut Scene,
        ray: &Ray,
        screen_x: f32,
    ) {
        match self.state {
            DragState::Idle => {}
            DragState::Move { item, grab_offset } => {
                // Outside the floor rectangle the drag pauses in place.
                let Some(p) = floor_hit(ray) else {
                    return;
                };
                if let Some(item) = session.item_mut(item) {
                    let limit_x = (ROOM_WIDTH / 2.0 - item.radius).max(0.0);
                    let limit_z = (ROOM_DEPTH / 2.0 - item.radius).max(0.0);
                    item.position.x = (p.x + grab_offset.x).clamp(-limit_x, limit_x);
                    item.position.z = (p.z + grab_offset.z).clamp(-limit_z, limit_z);
                }
                session.sync_visuals(scene);
            }
            DragState::Scale {
                start_x,
                start_scale,
                ..
            } => {
                let factor = (1.0 + (screen_x - start_x) / SCALE_DRAG_PIXELS)
                    .clamp(DRAG_FACTOR_MIN, DRAG_FACTOR_MAX);
                session.resize_selected(scene, start_scale * factor);
            }
            DragState::Rotate { item, last_x } => {
                let dx = screen_x - last_x;
                if let Some(item) = session.item_mut(item) {
                    item.yaw += Rad(dx * ROTATE_SENSITIVITY);
                }
                self.state = DragState::Rotate { item, last_x: screen_x };
                session.sync_visuals(scene);
            }
        }
    }
}

impl Default for PointerInteraction {
    fn default() -> Self {
        Self::new()
    }
}

/// World-space bounds of the selected item's scale handle cube.
fn handle_bounds(item: &crate::room::FurnitureItem) -> Aabb {
    let center = item.handle_center(true);
    let half = HANDLE_SIZE * 0.5 * item.visual_scale(true);
    let half = Vector3::new(half, half, half);
    Aabb::new(center - half, center + half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_SCALE, MIN_SCALE};
    use crate::gfx::camera::ViewCamera;
    use crate::room::FurnitureKind;

    fn setup_with_item(kind: FurnitureKind) -> (Scene, RoomSession, ItemId) {
        let mut scene = Scene::new(ViewCamera::room_view(1.5));
        let mut session = RoomSession::with_seed(11);
        let id = session.add_furniture(&mut scene, kind);
        // Park the item at a known spot for ray construction.
        session.item_mut(id).unwrap().position = Vector3::new(0.0, 0.0, 0.0);
        session.sync_visuals(&mut scene);
        (scene, session, id)
    }

    fn ray_down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vector3::new(x, 5.0, z), Vector3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn body_click_selects_and_starts_move() {
        let (mut scene, mut session, id) = setup_with_item(FurnitureKind::Desk);
        session.select(&mut scene, None);

        let mut interaction = PointerInteraction::new();
        interaction.begin_drag(&mut session, &mut scene, &ray_down_at(0.0, 0.0), 400.0);

        assert_eq!(session.selected(), Some(id));
        assert!(matches!(interaction.state(), DragState::Move { item, .. } if item == id));
    }

    #[test]
    fn empty_click_clears_selection() {
        let (mut scene, mut session, id) = setup_with_item(FurnitureKind::Chair);
        assert_eq!(session.selected(), Some(id));

        let mut interaction = PointerInteraction::new();
        interaction.begin_drag(&mut session, &mut scene, &ray_down_at(2.9, -2.9), 700.0);

        assert_eq!(session.selected(), None);
        assert_eq!(interaction.state(), DragState::Idle);
    }

    #[test]
    fn ring_click_starts_rotate_for_selected_only() {
        let (mut scene, mut session, id) = setup_with_item(FurnitureKind::Chair);
        let (_, _, inner, outer) = session.item(id).unwrap().ring_band(true);
        let ring_x = (inner + outer) / 2.0;

        let mut interaction = PointerInteraction::new();
        interaction.begin_drag(&mut session, &mut scene, &ray_down_at(ring_x, 0.0), 400.0);
        assert!(matches!(interaction.state(), DragState::Rotate { item, .. } if item == id));

        // Deselected: the same ray falls through to empty space.
        interaction.pointer_up();
        session.select(&mut scene, None);
        interaction.begin_drag(&mut session, &mut scene, &ray_down_at(ring_x, 0.0), 400.0);
        assert!(!matches!(interaction.state(), DragState::Rotate { .. }));
    }

    #[test]
    fn handle_click_starts_scale_with_start_scale() {
        let (mut scene, mut session, id) = setup_with_item(FurnitureKind::Chair);
        let item = session.item(id).unwrap();
        let center = item.handle_center(true);
        let start = item.base_scale;

        let mut interaction = PointerInteraction::new();
        interaction.begin_drag(
            &mut session,
            &mut scene,
            &ray_down_at(center.x, center.z),
            500.0,
        );

        assert_eq!(
            interaction.state(),
            DragState::Scale {
                item: id,
                start_x: 500.0,
                start_scale: start
            }
        );
    }

    #[test]
    fn move_drag_keeps_grab_offset_and_clamps_to_room() {
        let (mut scene, mut session, id) = setup_with_item(FurnitureKind::Desk);
        // Grab slightly off-center.
        let mut interaction = PointerInteraction::new();
        interaction.begin_drag(&mut session, &mut scene, &ray_down_at(0.2, 0.1), 400.0);

        interaction.update_drag(&mut session, &mut scene, &ray_down_at(1.2, 1.1), 450.0);
        let p = session.item(id).unwrap().position;
        assert!((p.x - 1.0).abs() < 1e-4);
        assert!((p.z - 1.0).abs() < 1e-4);

        // Near the wall: clamped to radius distance inside it.
        interaction.update_drag(&mut session, &mut scene, &ray_down_at(2.9, 0.1), 900.0);
        let item = session.item(id).unwrap();
        assert!((item.position.x - (ROOM_WIDTH / 2.0 - item.radius)).abs() < 1e-4);

        // Off the floor rectangle entirely: the drag pauses in place.
        let before = session.item(id).unwrap().position;
        interaction.update_drag(&mut session, &mut scene, &ray_down_at(50.0, 0.1), 950.0);
        assert_eq!(session.item(id).unwrap().position, before);
    }

    #[test]
    fn scale_drag_is_anchored_to_drag_start() {
        let (mut scene, mut session, id) = setup_with_item(FurnitureKind::Chair);
        let start = session.item(id).unwrap().base_scale;
        let center = session.item(id).unwrap().handle_center(true);

        let mut interaction = PointerInteraction::new();
        let ray = ray_down_at(center.x, center.z);
        interaction.begin_drag(&mut session, &mut scene, &ray, 500.0);

        interaction.update_drag(&mut session, &mut scene, &ray, 650.0);
        let half_step = session.item(id).unwrap().base_scale;
        assert!((half_step - start * 1.5).abs() < 1e-5);

        // Moving back to the start position restores the start scale exactly.
        interaction.update_drag(&mut session, &mut scene, &ray, 500.0);
        assert!((session.item(id).unwrap().base_scale - start).abs() < 1e-6);
    }

    #[test]
    fn scale_drag_clamps_both_ends() {
        let (mut scene, mut session, id) = setup_with_item(FurnitureKind::Chair);
        let center = session.item(id).unwrap().handle_center(true);
        let ray = ray_down_at(center.x, center.z);

        let mut interaction = PointerInteraction::new();
        interaction.begin_drag(&mut session, &mut scene, &ray, 500.0);

        interaction.update_drag(&mut session, &mut scene, &ray, 5000.0);
        assert!((session.item(id).unwrap().base_scale - MAX_SCALE).abs() < 1e-6);

        interaction.update_drag(&mut session, &mut scene, &ray, -5000.0);
        assert!((session.item(id).unwrap().base_scale - MIN_SCALE).abs() < 1e-6);
    }

    #[test]
    fn rotate_drag_accumulates_per_event() {
        let (mut scene, mut session, id) = setup_with_item(FurnitureKind::Chair);
        let (_, _, inner, outer) = session.item(id).unwrap().ring_band(true);
        let ray = ray_down_at((inner + outer) / 2.0, 0.0);

        let mut interaction = PointerInteraction::new();
        interaction.begin_drag(&mut session, &mut scene, &ray, 100.0);

        interaction.update_drag(&mut session, &mut scene, &ray, 190.0);
        interaction.update_drag(&mut session, &mut scene, &ray, 280.0);

        let yaw = session.item(id).unwrap().yaw;
        assert!((yaw.0 - 180.0 * ROTATE_SENSITIVITY).abs() < 1e-5);
    }

    #[test]
    fn pointer_up_ends_drag_but_keeps_selection() {
        let (mut scene, mut session, id) = setup_with_item(FurnitureKind::Sofa);
        let mut interaction = PointerInteraction::new();
        interaction.begin_drag(&mut session, &mut scene, &ray_down_at(0.0, 0.0), 400.0);
        assert!(interaction.is_dragging());

        interaction.pointer_up();
        assert!(!interaction.is_dragging());
        assert_eq!(session.selected(), Some(id));
    }
}
