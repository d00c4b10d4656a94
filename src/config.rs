//! Scene tuning constants for the room and furniture interaction.
//!
//! Everything here is in meters (room space) or radians unless noted.

use std::f32::consts::PI;

/// Room footprint, X axis.
pub const ROOM_WIDTH: f32 = 6.0;
/// Room footprint, Z axis.
pub const ROOM_DEPTH: f32 = 6.0;
/// Wall height for the room shell.
pub const WALL_HEIGHT: f32 = 2.4;

/// Yaw applied per pixel of horizontal pointer travel while rotating.
pub const ROTATE_SENSITIVITY: f32 = PI / 360.0;

/// Pixels of horizontal drag that correspond to a 1.0 change in scale factor.
pub const SCALE_DRAG_PIXELS: f32 = 300.0;
/// Raw drag factor clamp, applied before the absolute scale clamp.
pub const DRAG_FACTOR_MIN: f32 = 0.2;
pub const DRAG_FACTOR_MAX: f32 = 3.0;

/// Absolute uniform-scale clamp for any furniture item.
pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 1.6;

/// Extra visual scale applied to the selected item.
pub const SELECTION_HIGHLIGHT_SCALE: f32 = 1.08;

/// Placement search: attempts before giving up and accepting overlap.
pub const PLACEMENT_ATTEMPTS: u32 = 25;
/// Placement search: wall margin added to the item radius.
pub const PLACEMENT_MARGIN: f32 = 0.3;
/// Placement search: required clearance between item footprints.
pub const PLACEMENT_CLEARANCE: f32 = 0.25;
/// Placement search: symmetric compression of the depth sampling range.
pub const PLACEMENT_DEPTH_BIAS: f32 = 0.7;

/// Selection ring: inner/outer radius relative to the item base radius.
pub const RING_INNER_FACTOR: f32 = 1.0;
pub const RING_OUTER_FACTOR: f32 = 1.4;
/// Height of the ring above the floor, to avoid z-fighting with it.
pub const RING_LIFT: f32 = 0.02;

/// Scale handle: XZ offset from the item center, relative to base radius.
pub const HANDLE_DISTANCE_FACTOR: f32 = 1.7;
/// Scale handle: cube edge length and rest height.
pub const HANDLE_SIZE: f32 = 0.18;
pub const HANDLE_HEIGHT: f32 = 0.15;
