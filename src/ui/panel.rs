//! The planner panel: furniture actions and group recoloring.
//!
//! The panel never mutates the session or scene directly. It reads current
//! state and returns a list of [`PanelAction`]s, which the app applies after
//! the frame. That keeps the UI closure free of mutable borrows while the
//! render encoder is live.

use imgui::Ui;

use crate::room::{FurnitureKind, RoomSession};
use crate::scene::material::MaterialGroup;
use crate::scene::MaterialRegistry;

/// A mutation requested from the panel, applied after the UI frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    AddFurniture(FurnitureKind),
    RemoveSelected,
    DefaultLayout,
    SetGroupColor(MaterialGroup, [f32; 3]),
}

/// Recolorable groups shown for a furniture kind.
fn kind_groups(kind: FurnitureKind) -> &'static [(MaterialGroup, &'static str)] {
    match kind {
        FurnitureKind::Bed => &[
            (MaterialGroup::BedMain, "Frame"),
            (MaterialGroup::BedTextile, "Bedding"),
        ],
        FurnitureKind::Desk => &[(MaterialGroup::Desk, "Desk")],
        FurnitureKind::Chair => &[(MaterialGroup::Chair, "Chair")],
        FurnitureKind::Wardrobe => &[
            (MaterialGroup::WardrobeMain, "Body"),
            (MaterialGroup::WardrobeAccent, "Front"),
            (MaterialGroup::WardrobeHandle, "Handles"),
        ],
        FurnitureKind::Sofa => &[
            (MaterialGroup::SofaBody, "Body"),
            (MaterialGroup::SofaCushionWarm, "Left cushion"),
            (MaterialGroup::SofaCushionLight, "Right cushion"),
        ],
        FurnitureKind::CoffeeTable => &[(MaterialGroup::CoffeeTable, "Table")],
        FurnitureKind::Rug => &[(MaterialGroup::Rug, "Rug")],
        FurnitureKind::Partition => &[
            (MaterialGroup::PartitionFrame, "Frame"),
            (MaterialGroup::PartitionGlass, "Glass"),
        ],
        FurnitureKind::Lamp => &[
            (MaterialGroup::LampPole, "Pole"),
            (MaterialGroup::LampShade, "Shade"),
        ],
    }
}

const ROOM_GROUPS: &[(MaterialGroup, &str)] = &[
    (MaterialGroup::Walls, "Walls"),
    (MaterialGroup::Floor, "Floor"),
];

fn color_rows(
    ui: &Ui,
    materials: &MaterialRegistry,
    groups: &[(MaterialGroup, &str)],
    actions: &mut Vec<PanelAction>,
) {
    for &(group, label) in groups {
        let Some(color) = materials.group_color(group) else {
            continue;
        };
        let mut edited = color;
        if ui.color_edit3(label, &mut edited) {
            actions.push(PanelAction::SetGroupColor(group, edited));
        }
    }
}

/// Draws the planner panel and collects requested actions.
pub fn draw_panel(
    ui: &Ui,
    session: &RoomSession,
    materials: &MaterialRegistry,
) -> Vec<PanelAction> {
    let mut actions = Vec::new();

    ui.window("Room Planner")
        .size([320.0, 560.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .build(|| {
            if ui.button("Default layout") {
                actions.push(PanelAction::DefaultLayout);
            }
            ui.same_line();
            if ui.button("Remove selected") && session.selected().is_some() {
                actions.push(PanelAction::RemoveSelected);
            }

            ui.separator();
            ui.text("Add furniture");
            for (i, kind) in FurnitureKind::ALL.iter().enumerate() {
                if i % 3 != 0 {
                    ui.same_line();
                }
                if ui.button(kind.name()) {
                    actions.push(PanelAction::AddFurniture(*kind));
                }
            }

            ui.separator();
            match session.selected_item() {
                Some(item) => {
                    ui.text(format!("Selected: {}", item.label));
                    ui.text(format!("Scale: {:.2}", item.base_scale));
                    ui.separator();
                    ui.text("Colors");
                    color_rows(ui, materials, kind_groups(item.kind), &mut actions);
                }
                None => {
                    ui.text("Nothing selected");
                    ui.separator();
                    ui.text("Room colors");
                    color_rows(ui, materials, ROOM_GROUPS, &mut actions);
                }
            }
        });

    actions
}
