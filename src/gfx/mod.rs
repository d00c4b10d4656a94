//! # Graphics Module
//!
//! Rendering stack for the room planner: a fixed camera, a single forward
//! pipeline with per-object transform and per-material uniforms, procedural
//! primitive generation, and the ray-casting math used for pointer picking.

pub mod camera;
pub mod geometry;
pub mod global_bindings;
pub mod picking;
pub mod render_engine;
pub mod texture;
pub mod uniform;

// Re-export commonly used types
pub use camera::ViewCamera;
pub use picking::{Aabb, Ray};
pub use render_engine::RenderEngine;
