//! Furnishing session: the furniture inventory and selection state.
//!
//! [`RoomSession`] owns every placed item and mirrors it into the scene as
//! three objects per item (body, selection ring, scale handle). All mutation
//! goes through the session so the scene never drifts out of sync with the
//! inventory.

use cgmath::{Rad, Vector3};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::{HANDLE_SIZE, MAX_SCALE, MIN_SCALE, RING_INNER_FACTOR, RING_LIFT, RING_OUTER_FACTOR};
use crate::gfx::geometry::{generate_box, generate_ring};
use crate::room::catalog::{self, Blueprint};
use crate::room::item::{FurnitureItem, FurnitureKind, ItemId, ItemVisuals};
use crate::room::placement::{self, Footprint, PlacementSpot};
use crate::scene::material::{rgb, Material};
use crate::scene::object::Mesh;
use crate::scene::{ObjectId, Scene};

/// Called whenever the selection changes, with the newly selected item.
pub type SelectionListener = Box<dyn FnMut(Option<&FurnitureItem>)>;

pub struct RoomSession {
    items: Vec<FurnitureItem>,
    selected: Option<ItemId>,
    next_item_id: u32,
    listeners: Vec<SelectionListener>,
    rng: StdRng,
}

impl RoomSession {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic session for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            next_item_id: 1,
            listeners: Vec::new(),
            rng,
        }
    }

    pub fn items(&self) -> &[FurnitureItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&FurnitureItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut FurnitureItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&FurnitureItem> {
        self.selected.and_then(|id| self.item(id))
    }

    /// Maps a scene body object back to its item, for pointer picking.
    pub fn item_for_body(&self, object: ObjectId) -> Option<ItemId> {
        self.items
            .iter()
            .find(|i| i.visuals.body == object)
            .map(|i| i.id)
    }

    /// Registers a selection listener. Fired on every selection change,
    /// including deselection.
    pub fn add_selection_listener(&mut self, listener: SelectionListener) {
        self.listeners.push(listener);
    }

    fn notify_selection(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        let current = self
            .selected
            .and_then(|id| self.items.iter().find(|i| i.id == id));
        for listener in &mut listeners {
            listener(current);
        }
        self.listeners = listeners;
    }

    /// Changes the selection and updates highlight visuals. Selecting the
    /// already selected item is a no-op and does not re-notify.
    pub fn select(&mut self, scene: &mut Scene, id: Option<ItemId>) {
        let id = id.filter(|id| self.item(*id).is_some());
        if self.selected == id {
            return;
        }
        self.selected = id;
        self.sync_visuals(scene);
        self.notify_selection();
    }

    fn footprints(&self) -> Vec<Footprint> {
        self.items.iter().map(|i| (i.position, i.radius)).collect()
    }

    /// Adds a new item at a random clear spot and selects it.
    pub fn add_furniture(&mut self, scene: &mut Scene, kind: FurnitureKind) -> ItemId {
        let blueprint = catalog::blueprint(kind);
        let radius = blueprint.base_radius * blueprint.default_scale;
        let occupied = self.footprints();
        let spot = placement::find_spot(&mut self.rng, radius, &occupied);
        if !spot.clear {
            log::info!("room is crowded, {} spawns overlapping", kind.name());
        }

        let id = self.spawn(scene, blueprint, spot, Rad(0.0));
        self.select(scene, Some(id));
        id
    }

    fn spawn(
        &mut self,
        scene: &mut Scene,
        blueprint: Blueprint,
        spot: PlacementSpot,
        yaw: Rad<f32>,
    ) -> ItemId {
        let kind = blueprint.kind;
        let base_radius = blueprint.base_radius;
        let base_scale = blueprint.default_scale;
        let local_bounds = blueprint.local_bounds();
        let position = Vector3::new(spot.x, 0.0, spot.z);

        let mut body_meshes = Vec::with_capacity(blueprint.parts.len());
        for part in blueprint.parts {
            let geometry = part.baked_geometry();
            let material = scene.materials.add_grouped(part.group, part.material);
            body_meshes.push(Mesh::new(geometry, material));
        }
        let body = scene.add_object(body_meshes);

        let ring_material = scene
            .materials
            .add(Material::new(rgb(0x4f8ff7), 0.9, 0.0).with_alpha(0.4));
        let ring_geometry = generate_ring(
            base_radius * RING_INNER_FACTOR,
            base_radius * RING_OUTER_FACTOR,
            48,
        );
        let ring = scene.add_object(vec![Mesh::new(ring_geometry, ring_material)]);

        let handle_material = scene.materials.add(
            Material::new(rgb(0xf4b400), 0.5, 0.2).with_emission(0.35, 0.25, 0.0),
        );
        let handle_geometry = generate_box(HANDLE_SIZE, HANDLE_SIZE, HANDLE_SIZE);
        let handle = scene.add_object(vec![Mesh::new(handle_geometry, handle_material)]);

        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        // Labels carry the item id, which never repeats within a session.
        let label = format!("{} {}", kind.name(), id.0);

        self.items.push(FurnitureItem {
            id,
            kind,
            label,
            position,
            yaw,
            base_radius,
            radius: base_radius * base_scale,
            base_scale,
            local_bounds,
            visuals: ItemVisuals { body, ring, handle },
        });
        self.sync_visuals(scene);
        id
    }

    /// Removes the selected item and its scene objects.
    pub fn delete_selected(&mut self, scene: &mut Scene) {
        let Some(id) = self.selected else {
            return;
        };
        if let Some(index) = self.items.iter().position(|i| i.id == id) {
            let item = self.items.remove(index);
            scene.remove_object(item.visuals.body);
            scene.remove_object(item.visuals.ring);
            scene.remove_object(item.visuals.handle);
            log::info!("removed {}", item.label);
        }
        self.selected = None;
        self.sync_visuals(scene);
        self.notify_selection();
    }

    /// Uniform scale for the selected item, clamped to the allowed range.
    /// Footprint radius follows the scale so placement stays honest.
    pub fn resize_selected(&mut self, scene: &mut Scene, scale: f32) {
        let Some(id) = self.selected else {
            return;
        };
        if let Some(item) = self.item_mut(id) {
            item.base_scale = scale.clamp(MIN_SCALE, MAX_SCALE);
            item.radius = item.base_radius * item.base_scale;
        }
        self.sync_visuals(scene);
    }

    fn clear_items(&mut self, scene: &mut Scene) {
        for item in self.items.drain(..) {
            scene.remove_object(item.visuals.body);
            scene.remove_object(item.visuals.ring);
            scene.remove_object(item.visuals.handle);
        }
        self.selected = None;
    }

    /// Replaces all furniture with the built-in starter arrangement and
    /// selects the partition so the highlight affordances are visible.
    pub fn apply_default_layout(&mut self, scene: &mut Scene) {
        self.clear_items(scene);

        let quarter = Rad(std::f32::consts::FRAC_PI_2);
        let layout: [(FurnitureKind, f32, f32, Rad<f32>); 7] = [
            (FurnitureKind::Bed, -2.1, -0.45, quarter),
            (FurnitureKind::Wardrobe, -1.0, -0.35, Rad(0.0)),
            (FurnitureKind::Partition, -0.1, 0.2, quarter),
            (FurnitureKind::Rug, 1.2, 0.9, Rad(0.0)),
            (FurnitureKind::Sofa, 1.6, 0.4, Rad(0.0)),
            (FurnitureKind::CoffeeTable, 1.6, 1.3, Rad(0.0)),
            (FurnitureKind::Lamp, -2.4, 1.0, Rad(0.0)),
        ];

        let mut partition = None;
        for (kind, x, z, yaw) in layout {
            let spot = PlacementSpot { x, z, clear: true };
            let id = self.spawn(scene, catalog::blueprint(kind), spot, yaw);
            if kind == FurnitureKind::Partition {
                partition = Some(id);
            }
        }

        self.select(scene, partition);
        log::info!("applied default layout with {} items", self.items.len());
    }

    /// Writes item transforms and selection affordances into the scene.
    ///
    /// Idempotent; the app calls it after any session mutation and before
    /// rendering.
    pub fn sync_visuals(&self, scene: &mut Scene) {
        for item in &self.items {
            let selected = self.selected == Some(item.id);
            let visual_scale = item.visual_scale(selected);

            if let Some(body) = scene.object_mut(item.visuals.body) {
                body.position = item.position;
                body.yaw = item.yaw;
                body.scale = visual_scale;
            }
            if let Some(ring) = scene.object_mut(item.visuals.ring) {
                ring.position = Vector3::new(item.position.x, RING_LIFT, item.position.z);
                ring.scale = visual_scale;
                ring.visible = selected;
            }
            if let Some(handle) = scene.object_mut(item.visuals.handle) {
                handle.position = item.handle_center(selected);
                handle.scale = visual_scale;
                handle.visible = selected;
            }
        }
    }
}

impl Default for RoomSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::ViewCamera;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (Scene, RoomSession) {
        let scene = Scene::new(ViewCamera::room_view(1.5));
        let session = RoomSession::with_seed(7);
        (scene, session)
    }

    #[test]
    fn adding_furniture_selects_it_and_creates_three_objects() {
        let (mut scene, mut session) = setup();
        let before = scene.object_count();

        let id = session.add_furniture(&mut scene, FurnitureKind::Chair);

        assert_eq!(session.selected(), Some(id));
        assert_eq!(scene.object_count(), before + 3);

        let item = session.item(id).unwrap();
        assert_eq!(item.label, "Chair 1");
        assert!(scene.object(item.visuals.ring).unwrap().visible);
        assert!(scene.object(item.visuals.handle).unwrap().visible);
    }

    #[test]
    fn selection_is_exclusive() {
        let (mut scene, mut session) = setup();
        let a = session.add_furniture(&mut scene, FurnitureKind::Chair);
        let b = session.add_furniture(&mut scene, FurnitureKind::Desk);
        assert_eq!(session.selected(), Some(b));

        session.select(&mut scene, Some(a));

        let ring_a = session.item(a).unwrap().visuals.ring;
        let ring_b = session.item(b).unwrap().visuals.ring;
        assert!(scene.object(ring_a).unwrap().visible);
        assert!(!scene.object(ring_b).unwrap().visible);
    }

    #[test]
    fn selected_body_carries_highlight_scale() {
        let (mut scene, mut session) = setup();
        let id = session.add_furniture(&mut scene, FurnitureKind::Sofa);
        let item = session.item(id).unwrap();
        let body = item.visuals.body;
        let base = item.base_scale;

        let scale = scene.object(body).unwrap().scale;
        assert!((scale - base * 1.08).abs() < 1e-5);

        session.select(&mut scene, None);
        let scale = scene.object(body).unwrap().scale;
        assert!((scale - base).abs() < 1e-5);
    }

    #[test]
    fn delete_selected_removes_objects_and_clears_selection() {
        let (mut scene, mut session) = setup();
        let id = session.add_furniture(&mut scene, FurnitureKind::Lamp);
        let visuals = session.item(id).unwrap().visuals;

        session.delete_selected(&mut scene);

        assert_eq!(session.selected(), None);
        assert!(session.item(id).is_none());
        assert!(scene.object(visuals.body).is_none());
        assert!(scene.object(visuals.ring).is_none());
        assert!(scene.object(visuals.handle).is_none());

        // Deleting again with nothing selected is a no-op.
        session.delete_selected(&mut scene);
    }

    #[test]
    fn labels_use_the_item_id() {
        let (mut scene, mut session) = setup();
        let a = session.add_furniture(&mut scene, FurnitureKind::Chair);
        let b = session.add_furniture(&mut scene, FurnitureKind::Chair);
        let c = session.add_furniture(&mut scene, FurnitureKind::Rug);

        assert_eq!(session.item(a).unwrap().label, "Chair 1");
        assert_eq!(session.item(b).unwrap().label, "Chair 2");
        // Ids are global, so the first rug is number 3.
        assert_eq!(session.item(c).unwrap().label, "Rug 3");
    }

    #[test]
    fn resize_clamps_to_allowed_range() {
        let (mut scene, mut session) = setup();
        let id = session.add_furniture(&mut scene, FurnitureKind::Desk);

        session.resize_selected(&mut scene, 9.0);
        assert!((session.item(id).unwrap().base_scale - MAX_SCALE).abs() < 1e-6);

        session.resize_selected(&mut scene, 0.01);
        let item = session.item(id).unwrap();
        assert!((item.base_scale - MIN_SCALE).abs() < 1e-6);
        assert!((item.radius - item.base_radius * MIN_SCALE).abs() < 1e-6);
    }

    #[test]
    fn default_layout_resets_cleanly_twice() {
        let (mut scene, mut session) = setup();
        session.add_furniture(&mut scene, FurnitureKind::Chair);

        session.apply_default_layout(&mut scene);
        assert_eq!(session.items().len(), 7);
        assert_eq!(scene.object_count(), 7 * 3);
        assert_eq!(session.selected_item().unwrap().kind, FurnitureKind::Partition);
        let first_kinds: Vec<_> = session.items().iter().map(|i| i.kind).collect();

        session.apply_default_layout(&mut scene);
        assert_eq!(session.items().len(), 7);
        assert_eq!(scene.object_count(), 7 * 3);
        let second_kinds: Vec<_> = session.items().iter().map(|i| i.kind).collect();
        assert_eq!(first_kinds, second_kinds);
    }

    #[test]
    fn listeners_hear_every_selection_change() {
        let (mut scene, mut session) = setup();
        let heard: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = heard.clone();
        session.add_selection_listener(Box::new(move |item| {
            sink.borrow_mut().push(item.map(|i| i.label.clone()));
        }));

        session.add_furniture(&mut scene, FurnitureKind::Bed);
        session.select(&mut scene, None);
        // Re-selecting the current value does not notify.
        session.select(&mut scene, None);

        let heard = heard.borrow();
        assert_eq!(heard.as_slice(), &[Some("Bed 1".to_string()), None]);
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let (mut scene, mut session) = setup();
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = order.clone();
        session.add_selection_listener(Box::new(move |_| sink.borrow_mut().push("first")));
        let sink = order.clone();
        session.add_selection_listener(Box::new(move |_| sink.borrow_mut().push("second")));

        session.add_furniture(&mut scene, FurnitureKind::Chair);

        assert_eq!(order.borrow().as_slice(), &["first", "second"]);
    }

    #[test]
    fn body_object_maps_back_to_item() {
        let (mut scene, mut session) = setup();
        let id = session.add_furniture(&mut scene, FurnitureKind::Wardrobe);
        let visuals = session.item(id).unwrap().visuals;

        assert_eq!(session.item_for_body(visuals.body), Some(id));
        assert_eq!(session.item_for_body(visuals.ring), None);
    }
}
