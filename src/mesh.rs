//! Triangle mesh container and a built-in test model

use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("triangle/normal count mismatch: {triangles} triangles, {normals} normals")]
    LengthMismatch { triangles: usize, normals: usize },
}

/// A triangle in world space, immutable after load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Point3<f32>,
    pub v1: Point3<f32>,
    pub v2: Point3<f32>,
}

impl Triangle {
    pub fn new(v0: Point3<f32>, v1: Point3<f32>, v2: Point3<f32>) -> Self {
        Self { v0, v1, v2 }
    }
}

/// Ordered triangles plus index-aligned per-facet normals.
///
/// `normals[i]` belongs to `triangles[i]`; the lengths must match and both
/// sequences are read-only for the rest of the session.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub normals: Vec<Vector3<f32>>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>, normals: Vec<Vector3<f32>>) -> Result<Self, MeshError> {
        if triangles.len() != normals.len() {
            return Err(MeshError::LengthMismatch {
                triangles: triangles.len(),
                normals: normals.len(),
            });
        }
        Ok(Self { triangles, normals })
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Parallelepiped spanned by three edge vectors from `corner`.
    ///
    /// Six clockwise quads split into twelve triangles, three faces around
    /// `corner` and three around the opposite vertex. Used as the default
    /// model when no file is given.
    pub fn box_volume(
        corner: Point3<f32>,
        e1: Vector3<f32>,
        e2: Vector3<f32>,
        e3: Vector3<f32>,
    ) -> Self {
        let opposite = corner + e1 + e2 + e3;
        let mut triangles = Vec::with_capacity(12);
        triangles.extend(quad(corner, e1, e2));
        triangles.extend(quad(corner, e2, e3));
        triangles.extend(quad(corner, e3, e1));
        triangles.extend(quad(opposite, -e3, -e2));
        triangles.extend(quad(opposite, -e2, -e1));
        triangles.extend(quad(opposite, -e1, -e3));

        let normals = triangles.iter().map(facet_normal).collect();
        Self { triangles, normals }
    }
}

/// Split a quad (corner plus two edge vectors, clockwise) into two triangles.
fn quad(corner: Point3<f32>, u: Vector3<f32>, v: Vector3<f32>) -> [Triangle; 2] {
    let verts = [corner, corner + u, corner + u + v, corner + v];
    [
        Triangle::new(verts[0], verts[1], verts[2]),
        Triangle::new(verts[2], verts[3], verts[0]),
    ]
}

fn facet_normal(tri: &Triangle) -> Vector3<f32> {
    -(tri.v1 - tri.v0).cross(&(tri.v2 - tri.v0)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_length_invariant() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let result = Mesh::new(vec![tri], vec![]);
        assert!(matches!(
            result,
            Err(MeshError::LengthMismatch { triangles: 1, normals: 0 })
        ));
    }

    #[test]
    fn test_mesh_accepts_aligned_lengths() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let mesh = Mesh::new(vec![tri], vec![Vector3::new(0.0, 0.0, -1.0)]).unwrap();
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn test_box_volume_has_twelve_triangles() {
        let mesh = Mesh::box_volume(
            Point3::new(0.0, 0.0, 10.0),
            Vector3::new(3.0, 0.0, 0.0),
            Vector3::new(0.0, 3.0, 0.0),
            Vector3::new(0.0, 0.0, 3.0),
        );
        assert_eq!(mesh.triangles.len(), 12);
        assert_eq!(mesh.normals.len(), 12);
    }

    #[test]
    fn test_box_volume_normals_are_unit_length() {
        let mesh = Mesh::box_volume(
            Point3::new(-1.0, -1.0, -1.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
            Vector3::new(0.0, 0.0, 2.0),
        );
        for n in &mesh.normals {
            assert!((n.magnitude() - 1.0).abs() < 1e-5);
        }
    }
}
