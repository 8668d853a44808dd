//! Per-cell ray casting, intersection, shading, and glyph mapping

use nalgebra::{Matrix3, Point3, Vector3};

use crate::camera::Camera;
use crate::mesh::{Mesh, Triangle};
use crate::DENSITY_RAMP;

/// Minimum accepted value for the ray parameter and the edge coefficients.
/// Rejects hits behind (or exactly at) the ray origin.
pub const EPSILON: f32 = 1e-4;

/// Width/height ratio of a terminal character cell.
const CELL_ASPECT: f32 = 8.0 / 17.0;

/// A ray in world space. The direction is deliberately not normalized; its
/// magnitude is absorbed into the intersection parameter `t`, which is only
/// ever compared between triangles of the same cell.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }
}

/// Nearest valid intersection: which triangle, and how far along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub t: f32,
}

/// Test a ray against every triangle and keep the nearest valid hit.
///
/// Per triangle, solves `t*d + a*(v0-v1) + b*(v0-v2) = v0 - origin` for
/// `(t, a, b)`; a singular system means the direction is coplanar with the
/// triangle's edges and the candidate is skipped. A solution is valid when
/// `t` and both coefficients clear `EPSILON` and the coefficients stay at or
/// below 1. `a + b <= 1` is intentionally not required: hits anywhere in the
/// parallelogram spanned by the two edges are accepted, matching the
/// reference renderer. Ties go to the lowest triangle index.
pub fn intersect(ray: &Ray, mesh: &Mesh) -> Option<Hit> {
    let mut best: Option<Hit> = None;

    for (index, tri) in mesh.triangles.iter().enumerate() {
        let system = Matrix3::from_columns(&[ray.direction, tri.v0 - tri.v1, tri.v0 - tri.v2]);
        let rhs = tri.v0 - ray.origin;
        let Some(solved) = system.lu().solve(&rhs) else {
            continue;
        };

        let (t, a, b) = (solved.x, solved.y, solved.z);
        if t < EPSILON || a < EPSILON || b < EPSILON || a > 1.0 || b > 1.0 {
            continue;
        }
        if best.map_or(true, |hit| t < hit.t) {
            best = Some(Hit { index, t });
        }
    }

    best
}

/// Flat-shade a hit triangle against a directional light, returning an index
/// into [`DENSITY_RAMP`].
///
/// The surface normal comes from the triangle's own winding, not the stored
/// per-facet normal. Output stays in 1..=4: index 0 is reserved for misses,
/// so a face turned fully away from the light still reads as the darkest
/// shade rather than background.
pub fn shade_index(tri: &Triangle, light_dir: &Vector3<f32>) -> usize {
    let normal = -(tri.v1 - tri.v0).cross(&(tri.v2 - tri.v0)).normalize();
    let cos_theta = normal.dot(light_dir);
    let brightness = (cos_theta * 0.5 + 0.5) * 3.99;
    brightness as usize + 1
}

/// Renders full frames of density glyphs for a character grid.
pub struct Renderer {
    width: usize,
    height: usize,
    camera: Camera,
    light_dir: Vector3<f32>,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            camera: Camera::default(),
            light_dir: Vector3::new(1.0, 1.0, 0.0).normalize(),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Direction of the ray through cell `(x, y)`, relative to the camera.
    /// `CELL_ASPECT` compensates for character cells being taller than wide.
    fn ray_direction(&self, x: usize, y: usize) -> Vector3<f32> {
        let (fov_w, fov_h) = self.camera.fov;
        let px = (x as f32 - self.width as f32 / 2.0) * fov_w / self.width as f32 * CELL_ASPECT;
        let py = (y as f32 - self.height as f32 / 2.0) * fov_h / self.height as f32;
        Vector3::new(px, py, self.camera.projection_distance)
    }

    /// Render one complete frame as newline-separated rows of glyphs.
    ///
    /// Every cell is recomputed from scratch; the frame is a pure function
    /// of the camera position, the mesh, and the grid size.
    pub fn render(&self, mesh: &Mesh) -> String {
        let mut frame = String::with_capacity((self.width + 1) * self.height);

        for y in 0..self.height {
            for x in 0..self.width {
                let ray = Ray::new(self.camera.position, self.ray_direction(x, y));
                let glyph = match intersect(&ray, mesh) {
                    Some(hit) => {
                        DENSITY_RAMP[shade_index(&mesh.triangles[hit.index], &self.light_dir)]
                    }
                    None => DENSITY_RAMP[0],
                };
                frame.push(glyph);
            }
            frame.push('\n');
        }

        frame
    }
}
