//! # Room Module
//!
//! Domain layer of the planner: the furniture catalog, spawn placement, the
//! room shell, and the session that ties items to scene objects.

pub mod catalog;
pub mod item;
pub mod placement;
pub mod session;
pub mod shell;

pub use item::{FurnitureItem, FurnitureKind, ItemId};
pub use session::RoomSession;
pub use shell::build_room_shell;
