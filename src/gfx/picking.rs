//! Ray-casting math for pointer picking.
//!
//! Converts mouse coordinates into world-space rays and tests them against
//! bounding boxes, the floor plane, and flat annuli. The interaction layer
//! decides what a hit means; this module only answers geometric questions.

use cgmath::{ElementWise, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::config::{ROOM_DEPTH, ROOM_WIDTH};
use crate::gfx::camera::ViewCamera;

/// A world-space ray for intersection testing.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vector3<f32>,
    /// Normalized direction.
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at distance `t`.
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    pub fn from_min_max(min: [f32; 3], max: [f32; 3]) -> Self {
        Self::new(Vector3::from(min), Vector3::from(max))
    }

    /// Smallest box containing both inputs.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    pub fn translated(&self, offset: Vector3<f32>) -> Aabb {
        Aabb::new(self.min + offset, self.max + offset)
    }

    /// Slab test. Returns the distance to the entry point (or the exit point
    /// when the ray starts inside), or `None` on a miss.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vector3::new(
            t_min.x.min(t_max.x),
            t_min.y.min(t_max.y),
            t_min.z.min(t_max.z),
        );
        let t2 = Vector3::new(
            t_min.x.max(t_max.x),
            t_min.y.max(t_max.y),
            t_min.z.max(t_max.z),
        );

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Bounds of this box after applying `matrix` to all 8 corners.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Aabb {
        let corners = [
            Vector3::new(self.min.x, self.min.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.min.z),
            Vector3::new(self.min.x, self.max.y, self.min.z),
            Vector3::new(self.min.x, self.min.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.min.z),
            Vector3::new(self.max.x, self.min.y, self.max.z),
            Vector3::new(self.min.x, self.max.y, self.max.z),
            Vector3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut min = Vector3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vector3::new(f32::MIN, f32::MIN, f32::MIN);
        for corner in corners {
            let h = matrix * Vector4::new(corner.x, corner.y, corner.z, 1.0);
            let p = Vector3::new(h.x / h.w, h.y / h.w, h.z / h.w);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Aabb::new(min, max)
    }
}

/// Converts window-space mouse coordinates into a world-space ray.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    camera: &ViewCamera,
) -> Ray {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;

    // Normalized device coordinates, Y flipped.
    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height;

    let view_proj = camera.build_view_projection_matrix();
    let inv_view_proj = view_proj.invert().unwrap_or_else(Matrix4::identity);

    let near = inv_view_proj * Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
    let far = inv_view_proj * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let near = Vector3::new(near.x / near.w, near.y / near.w, near.z / near.w);
    let far = Vector3::new(far.x / far.w, far.y / far.w, far.z / far.w);

    Ray::new(near, far - near)
}

/// Intersects the ray with the unbounded y = 0 plane. Returns `None` when
/// the ray is parallel to it or points away.
fn floor_plane_hit(ray: &Ray) -> Option<Vector3<f32>> {
    if ray.direction.y.abs() < 1e-6 {
        return None;
    }
    let t = -ray.origin.y / ray.direction.y;
    if t < 0.0 {
        return None;
    }
    Some(ray.point_at(t))
}

/// Intersects the ray with the floor plane (y = 0), bounded by the room
/// rectangle. Returns `None` when the ray is parallel, points away, or hits
/// outside the floor.
pub fn floor_hit(ray: &Ray) -> Option<Vector3<f32>> {
    let p = floor_plane_hit(ray)?;
    if p.x.abs() > ROOM_WIDTH / 2.0 || p.z.abs() > ROOM_DEPTH / 2.0 {
        return None;
    }
    Some(p)
}

/// Intersects the ray with a flat annulus at height `y`, with the given
/// center and radial band. Returns the hit distance.
pub fn annulus_hit(
    ray: &Ray,
    center: Vector3<f32>,
    y: f32,
    inner_radius: f32,
    outer_radius: f32,
) -> Option<f32> {
    if ray.direction.y.abs() < 1e-6 {
        return None;
    }
    let t = (y - ray.origin.y) / ray.direction.y;
    if t < 0.0 {
        return None;
    }
    let p = ray.point_at(t);
    let dx = p.x - center.x;
    let dz = p.z - center.z;
    let r2 = dx * dx + dz * dz;
    if r2 >= inner_radius * inner_radius && r2 <= outer_radius * outer_radius {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_and_misses_aabb() {
        let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

        let hit = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&hit).is_some());

        let miss = Ray::new(Vector3::new(5.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&miss).is_none());
    }

    #[test]
    fn transformed_aabb_follows_translation() {
        let aabb = Aabb::new(Vector3::new(-0.5, 0.0, -0.5), Vector3::new(0.5, 1.0, 0.5));
        let moved = aabb.transform(&Matrix4::from_translation(Vector3::new(2.0, 0.0, -1.0)));
        assert!((moved.min.x - 1.5).abs() < 1e-5);
        assert!((moved.max.z + 0.5).abs() < 1e-5);
    }

    #[test]
    fn floor_hit_inside_room_only() {
        let down = Ray::new(Vector3::new(1.0, 2.0, 1.0), Vector3::new(0.0, -1.0, 0.0));
        let p = floor_hit(&down).unwrap();
        assert!((p.x - 1.0).abs() < 1e-5 && p.y.abs() < 1e-5 && (p.z - 1.0).abs() < 1e-5);

        let outside = Ray::new(Vector3::new(10.0, 2.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert!(floor_hit(&outside).is_none());

        let upward = Ray::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert!(floor_hit(&upward).is_none());
    }

    #[test]
    fn annulus_band_is_exclusive() {
        let center = Vector3::new(0.0, 0.0, 0.0);
        let over_ring = Ray::new(Vector3::new(1.2, 3.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert!(annulus_hit(&over_ring, center, 0.02, 1.0, 1.4).is_some());

        let over_center = Ray::new(Vector3::new(0.0, 3.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert!(annulus_hit(&over_center, center, 0.02, 1.0, 1.4).is_none());

        let past_outer = Ray::new(Vector3::new(1.5, 3.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        assert!(annulus_hit(&past_outer, center, 0.02, 1.0, 1.4).is_none());
    }

    #[test]
    fn screen_center_ray_points_at_target() {
        let camera = ViewCamera::room_view(1.5);
        let ray = screen_to_ray((400.0, 300.0), (800.0, 600.0), &camera);
        let to_target = (camera.target - camera.eye).normalize();
        assert!(ray.direction.dot(to_target) > 0.999);
    }
}
