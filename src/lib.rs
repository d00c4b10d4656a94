//! RoomStyler
//!
//! An interactive room furnishing planner built on wgpu and winit. Furniture
//! is added, dragged, rotated, and scaled with the pointer; material groups
//! are recolored from an imgui panel.

pub mod app;
pub mod config;
pub mod gfx;
pub mod interaction;
pub mod prelude;
pub mod room;
pub mod scene;
pub mod ui;

// Re-export main types for convenience
pub use app::RoomStylerApp;

/// Creates the planner application with the starter layout loaded.
pub fn default() -> anyhow::Result<RoomStylerApp> {
    RoomStylerApp::new()
}
