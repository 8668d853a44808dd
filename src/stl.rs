//! Binary STL loading
//!
//! The loader owns coordinate normalization: STL files are Z-up, the
//! renderer's world frame is Y-up, so every vector is converted with
//! `(x, y, z) -> (x, -z, y)` before it reaches the mesh.

use std::fs;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use thiserror::Error;

use crate::mesh::{Mesh, MeshError, Triangle};

/// Fixed-size header preceding the facet count.
const HEADER_LEN: usize = 80;
/// Normal + three vertices (3 x f32 each) + 2-byte attribute field.
const FACET_LEN: usize = 4 * 3 * 4 + 2;

#[derive(Debug, Error)]
pub enum StlError {
    #[error("failed to read stl file")]
    Io(#[from] std::io::Error),
    #[error("stl data truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Read a binary STL file from disk.
pub fn load(path: &Path) -> Result<Mesh, StlError> {
    // this relies on SMALL models; the whole file is read at once
    let bytes = fs::read(path)?;
    parse(&bytes)
}

/// Parse binary STL: 80-byte header, little-endian u32 facet count, then
/// 50-byte facets. The per-facet attribute bytes are skipped.
pub fn parse(bytes: &[u8]) -> Result<Mesh, StlError> {
    if bytes.len() < HEADER_LEN + 4 {
        return Err(StlError::Truncated {
            expected: HEADER_LEN + 4,
            actual: bytes.len(),
        });
    }

    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    let body = &bytes[HEADER_LEN + 4..];
    if body.len() < count * FACET_LEN {
        return Err(StlError::Truncated {
            expected: HEADER_LEN + 4 + count * FACET_LEN,
            actual: bytes.len(),
        });
    }

    let mut triangles = Vec::with_capacity(count);
    let mut normals = Vec::with_capacity(count);
    for facet in body.chunks_exact(FACET_LEN).take(count) {
        normals.push(read_vec3(facet, 0));
        let v0 = read_vec3(facet, 12);
        let v1 = read_vec3(facet, 24);
        let v2 = read_vec3(facet, 36);
        triangles.push(Triangle::new(
            Point3::from(v0),
            Point3::from(v1),
            Point3::from(v2),
        ));
    }

    Ok(Mesh::new(triangles, normals)?)
}

/// Decode three little-endian f32s at `offset` and swap into the Y-up frame.
fn read_vec3(facet: &[u8], offset: usize) -> Vector3<f32> {
    let f = |i: usize| {
        let i = offset + i;
        f32::from_le_bytes([facet[i], facet[i + 1], facet[i + 2], facet[i + 3]])
    };
    let (x, y, z) = (f(0), f(4), f(8));
    Vector3::new(x, -z, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Assemble a binary STL buffer from (normal, v0, v1, v2) facets.
    fn stl_bytes(facets: &[[[f32; 3]; 4]]) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes.extend_from_slice(&(facets.len() as u32).to_le_bytes());
        for facet in facets {
            for vec in facet {
                for component in vec {
                    bytes.extend_from_slice(&component.to_le_bytes());
                }
            }
            bytes.extend_from_slice(&0u16.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_parse_single_facet_with_axis_swap() {
        let bytes = stl_bytes(&[[
            [0.0, 0.0, 1.0],
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]]);
        let mesh = parse(&bytes).unwrap();
        assert_eq!(mesh.len(), 1);
        // (x, y, z) -> (x, -z, y)
        assert_eq!(mesh.normals[0], Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(mesh.triangles[0].v0, Point3::new(1.0, -3.0, 2.0));
        assert_eq!(mesh.triangles[0].v1, Point3::new(4.0, -6.0, 5.0));
        assert_eq!(mesh.triangles[0].v2, Point3::new(7.0, -9.0, 8.0));
    }

    #[test]
    fn test_parse_empty_mesh() {
        let bytes = stl_bytes(&[]);
        let mesh = parse(&bytes).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_parse_rejects_short_header() {
        let err = parse(&[0u8; 40]).unwrap_err();
        assert!(matches!(err, StlError::Truncated { .. }));
    }

    #[test]
    fn test_parse_rejects_truncated_facets() {
        let mut bytes = stl_bytes(&[[
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]]);
        bytes.truncate(bytes.len() - 10);
        let err = parse(&bytes).unwrap_err();
        assert!(matches!(err, StlError::Truncated { .. }));
    }
}
