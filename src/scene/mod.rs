//! # Scene Management
//!
//! Object storage, materials, and vertex formats for the room scene. The
//! scene is deliberately flat: furniture bodies, selection affordances, and
//! the room shell are all plain objects addressed by id, and the furnishing
//! session (in [`crate::room`]) owns the mapping between logical items and
//! their objects.

pub mod material;
pub mod object;
pub mod scene;
pub mod vertex;

pub use material::{MaterialGroup, MaterialRegistry};
pub use object::{Object, ObjectId};
pub use scene::Scene;
