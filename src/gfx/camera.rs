//! Fixed room camera.
//!
//! The planner uses a single fixed viewpoint looking into the room; the
//! pointer is reserved for furniture manipulation, so there are no orbit
//! controls.

use cgmath::{perspective, Deg, Matrix4, Point3, SquareMatrix, Vector3};

/// Perspective camera with an explicit eye and target.
pub struct ViewCamera {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,

    pub uniform: CameraUniform,
}

impl ViewCamera {
    /// Camera placed at the default planner viewpoint: standing height just
    /// outside the open room side, looking at the room center.
    pub fn room_view(aspect: f32) -> Self {
        let mut camera = Self {
            eye: Vector3::new(0.0, 1.7, 5.2),
            target: Vector3::new(0.0, 1.2, 0.0),
            up: Vector3::unit_y(),
            fovy: Deg(55.0),
            aspect,
            znear: 0.1,
            zfar: 100.0,
            uniform: CameraUniform::default(),
        };
        camera.update_view_proj();
        camera
    }

    pub fn build_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::new(self.eye.x, self.eye.y, self.eye.z),
            Point3::new(self.target.x, self.target.y, self.target.z),
            self.up,
        )
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar) * self.build_view_matrix()
    }

    /// Recomputes the cached GPU uniform from the current parameters.
    pub fn update_view_proj(&mut self) {
        self.uniform = CameraUniform {
            view_position: [self.eye.x, self.eye.y, self.eye.z, 1.0],
            view_proj: self.build_view_projection_matrix().into(),
        };
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_view_proj();
    }
}

/// Camera data uploaded to the global uniform buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Eye position in homogeneous coordinates (16 byte alignment).
    pub view_position: [f32; 4],
    /// View-projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }
}
