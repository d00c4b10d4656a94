//! # RoomStyler Prelude
//!
//! Convenience imports for embedding the planner or driving a session from
//! code:
//!
//! ```no_run
//! use roomstyler::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let app = roomstyler::default()?;
//!     app.run()
//! }
//! ```

pub use crate::app::RoomStylerApp;
pub use crate::default;

pub use crate::gfx::camera::ViewCamera;
pub use crate::gfx::geometry::{generate_box, generate_cylinder, generate_ring, GeometryData};
pub use crate::gfx::{Aabb, Ray};

pub use crate::interaction::{DragState, PointerInteraction};
pub use crate::room::{build_room_shell, FurnitureItem, FurnitureKind, ItemId, RoomSession};
pub use crate::scene::{MaterialGroup, MaterialRegistry, Scene};
pub use crate::ui::PanelAction;

pub use cgmath::{Rad, Vector3};
