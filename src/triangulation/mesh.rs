// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::error::Error;
use crate::geometry::polygon::{signed_area, triangle_barycenter};
use crate::geometry::Point2;
use crate::kernel::orient2d;
use crate::triangulation::{BackgroundMesh, FaceId};

/// Indexed triangle mesh with face adjacency; the concrete background
/// triangulation used by the moment API and the tests.
#[derive(Clone, Debug)]
pub struct TriMesh {
    vertices: Vec<Point2>,
    faces: Vec<[usize; 3]>,
    neighbors: Vec<[Option<FaceId>; 3]>,
}

impl TriMesh {
    /// Builds a mesh from vertices and CCW faces and derives the
    /// shared-edge adjacency.
    ///
    /// CW or flat faces are rejected rather than reoriented: callers
    /// address per-face data (densities) by face index, and a silent flip
    /// would desynchronize the edge numbering they rely on.
    pub fn new(vertices: Vec<Point2>, faces: Vec<[usize; 3]>) -> Result<Self, Error> {
        for p in &vertices {
            if !p.is_finite() {
                return Err(Error::InvalidMesh {
                    reason: "non-finite vertex coordinate",
                });
            }
        }
        for (fi, f) in faces.iter().enumerate() {
            if f.iter().any(|&v| v >= vertices.len()) {
                return Err(Error::InvalidMesh {
                    reason: "face references a missing vertex",
                });
            }
            if orient2d(&vertices[f[0]], &vertices[f[1]], &vertices[f[2]]) != 1 {
                return Err(Error::DegenerateFace { face: fi });
            }
        }

        // Undirected edge -> incident faces with the local slot of the
        // edge in each.
        let mut edge2faces: AHashMap<(usize, usize), SmallVec<[(FaceId, usize); 2]>> =
            AHashMap::with_capacity(faces.len() * 3 / 2 + 1);
        for (fi, f) in faces.iter().enumerate() {
            for j in 0..3 {
                let a = f[(j + 1) % 3];
                let b = f[(j + 2) % 3];
                let key = if a < b { (a, b) } else { (b, a) };
                let entry = edge2faces.entry(key).or_default();
                if entry.len() == 2 {
                    return Err(Error::InvalidMesh {
                        reason: "edge shared by more than two faces",
                    });
                }
                entry.push((fi, j));
            }
        }

        let mut neighbors = vec![[None; 3]; faces.len()];
        for incident in edge2faces.values() {
            if let [(f, fj), (g, gj)] = incident[..] {
                neighbors[f][fj] = Some(g);
                neighbors[g][gj] = Some(f);
            }
        }

        Ok(TriMesh {
            vertices,
            faces,
            neighbors,
        })
    }

    /// Uniform triangulation of the unit square into `2 n^2` triangles.
    pub fn unit_square_grid(n: usize) -> TriMesh {
        assert!(n > 0, "grid resolution must be positive");
        let step = 1.0 / n as f64;
        let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            for i in 0..=n {
                vertices.push(Point2::new(i as f64 * step, j as f64 * step));
            }
        }
        let at = |i: usize, j: usize| j * (n + 1) + i;
        let mut faces = Vec::with_capacity(2 * n * n);
        for j in 0..n {
            for i in 0..n {
                faces.push([at(i, j), at(i + 1, j), at(i + 1, j + 1)]);
                faces.push([at(i, j), at(i + 1, j + 1), at(i, j + 1)]);
            }
        }
        TriMesh::new(vertices, faces).expect("grid mesh is valid by construction")
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Point2 {
        self.vertices[i]
    }

    #[inline]
    pub fn face(&self, f: FaceId) -> [usize; 3] {
        self.faces[f]
    }

    pub fn face_area(&self, f: FaceId) -> f64 {
        signed_area(&self.face_points_impl(f))
    }

    pub fn barycenter(&self, f: FaceId) -> Point2 {
        triangle_barycenter(&self.face_points_impl(f))
    }

    #[inline]
    fn face_points_impl(&self, f: FaceId) -> [Point2; 3] {
        let [a, b, c] = self.faces[f];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }
}

impl BackgroundMesh for TriMesh {
    #[inline]
    fn num_faces(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    fn face_points(&self, f: FaceId) -> [Point2; 3] {
        self.face_points_impl(f)
    }

    #[inline]
    fn neighbor(&self, f: FaceId, edge: usize) -> Option<FaceId> {
        self.neighbors[f][edge]
    }
}
