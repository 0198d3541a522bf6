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

//! The two triangulations the intersection traversal consumes, behind
//! narrow traits so callers can substitute their own containers.

pub mod mesh;
pub mod regular;

use crate::geometry::Point2;

pub use mesh::TriMesh;
pub use regular::RegularTriangulation;

/// Dense id of a weighted site, usable as an array index.
pub type SiteId = usize;

/// Dense id of a finite background-mesh face.
pub type FaceId = usize;

/// A 2D point with a scalar weight; the generator of one power cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedSite {
    pub position: Point2,
    pub weight: f64,
}

/// Background triangulation of the integration domain.
///
/// Faces are CCW triangles indexed densely by [`FaceId`]; every stored
/// face is finite. Edge `i` of a face is opposite vertex `i`, and
/// `neighbor(f, i)` is the face across it (`None` when that side borders
/// the infinite region).
pub trait BackgroundMesh {
    fn num_faces(&self) -> usize;

    fn face_points(&self, f: FaceId) -> [Point2; 3];

    fn neighbor(&self, f: FaceId, edge: usize) -> Option<FaceId>;
}

/// Power (regular) triangulation over the weighted sites; the dual power
/// diagram stays implicit.
pub trait PowerDiagram {
    fn num_sites(&self) -> usize;

    fn site(&self, v: SiteId) -> WeightedSite;

    /// Site whose closed power cell contains `q`, ties resolved to the
    /// smallest id; `None` when there are no sites.
    fn nearest_site(&self, q: &Point2) -> Option<SiteId>;

    /// Triangulation neighbors of `v` in CCW order around it, skipping
    /// infinite edges. Clipping a convex polygon against the radical axes
    /// of exactly these sites yields the polygon's intersection with
    /// `v`'s power cell.
    fn neighbors_ccw(&self, v: SiteId, out: &mut Vec<SiteId>);
}
