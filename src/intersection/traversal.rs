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

//! Joint breadth-first walk over (site, face) pairs.
//!
//! Starting from a seed pair, every nonempty `cell(v) ∩ face(f)` polygon
//! is produced exactly once. Each emitted piece propagates across the
//! boundaries it actually touches: a `Bisector(u)` edge enqueues `(u, f)`,
//! a `MeshEdge(i)` edge enqueues `(v, neighbor(i))`. Because the pieces
//! tile the domain, the walk reaches them all without testing the full
//! site-face product.

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::error::Error;
use crate::geometry::polygon::triangle_barycenter;
use crate::geometry::Point2;
use crate::intersection::clipper::CellClipper;
use crate::intersection::tagged::{EdgeSource, TaggedPolygon};
use crate::triangulation::{BackgroundMesh, FaceId, PowerDiagram, SiteId};

/// Raw-mode traversal: the sink sees each piece as a tagged edge polygon
/// plus the clipper that can materialize its vertices on demand.
///
/// The sink is called exactly once per nonempty piece; returning an error
/// aborts the walk and propagates (partial results in caller accumulators
/// should be discarded).
pub fn intersect_cells_raw<M, D, F>(mesh: &M, diagram: &D, mut sink: F) -> Result<(), Error>
where
    M: BackgroundMesh,
    D: PowerDiagram,
    F: FnMut(&TaggedPolygon, &CellClipper<'_, D>, FaceId, SiteId) -> Result<(), Error>,
{
    if mesh.num_faces() == 0 || diagram.num_sites() == 0 {
        return Ok(());
    }

    // Seed with the cell owning the first face's barycenter: an interior
    // point, so the seed pair is guaranteed nonempty.
    let seed_face: FaceId = 0;
    let bary = triangle_barycenter(&mesh.face_points(seed_face));
    let seed_site = match diagram.nearest_site(&bary) {
        Some(v) => v,
        None => return Ok(()),
    };

    let mut queue: VecDeque<(SiteId, FaceId)> = VecDeque::new();
    let mut visited: AHashSet<(SiteId, FaceId)> = AHashSet::default();
    visited.insert((seed_site, seed_face));
    queue.push_back((seed_site, seed_face));

    let mut neighbors: Vec<SiteId> = Vec::new();
    while let Some((v, f)) = queue.pop_front() {
        let mut clipper = CellClipper::new(mesh.face_points(f), diagram, v);
        diagram.neighbors_ccw(v, &mut neighbors);
        let mut nonempty = true;
        for &u in &neighbors {
            if !clipper.clip(u) {
                nonempty = false;
                break;
            }
        }
        if !nonempty {
            // A zero-area contact (the cell grazes this face along a cut
            // line) separates pieces of neighboring cells that are
            // adjacent across it without any emitted edge connecting
            // them; hand the face to every neighbor cell so the walk can
            // cross such contacts. Strictly empty pairs propagate
            // nothing.
            if clipper.cut_touched() {
                for &u in &neighbors {
                    let pair = (u, f);
                    if visited.insert(pair) {
                        queue.push_back(pair);
                    }
                }
            }
            continue;
        }

        for &tag in clipper.polygon().edges() {
            let next = match tag {
                EdgeSource::Bisector(u) => Some((u, f)),
                EdgeSource::MeshEdge(i) => mesh.neighbor(f, i).map(|g| (v, g)),
            };
            if let Some(pair) = next {
                if visited.insert(pair) {
                    queue.push_back(pair);
                }
            }
        }

        sink(clipper.polygon(), &clipper, f, v)?;
    }
    Ok(())
}

/// Geometric-mode traversal: pieces arrive as materialized CCW vertex
/// polygons. Same emission and abort contract as the raw mode.
pub fn intersect_cells<M, D, F>(mesh: &M, diagram: &D, mut sink: F) -> Result<(), Error>
where
    M: BackgroundMesh,
    D: PowerDiagram,
    F: FnMut(&[Point2], FaceId, SiteId) -> Result<(), Error>,
{
    let mut vertices: Vec<Point2> = Vec::new();
    intersect_cells_raw(mesh, diagram, |poly, clipper, f, v| {
        clipper.materialize_into(poly, &mut vertices);
        sink(&vertices, f, v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon::signed_area;
    use crate::triangulation::{RegularTriangulation, TriMesh};

    #[test]
    fn single_site_covers_every_face() {
        let mesh = TriMesh::unit_square_grid(2);
        let rt = RegularTriangulation::new(&[Point2::new(0.4, 0.6)], &[0.0]).unwrap();
        let mut count = 0;
        let mut area = 0.0;
        intersect_cells(&mesh, &rt, |poly, _f, v| {
            assert_eq!(v, 0);
            area += signed_area(poly);
            count += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(count, mesh.num_faces());
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn abort_propagates() {
        let mesh = TriMesh::unit_square_grid(2);
        let rt = RegularTriangulation::new(&[Point2::new(0.4, 0.6)], &[0.0]).unwrap();
        let mut seen = 0;
        let r = intersect_cells(&mesh, &rt, |_poly, _f, _v| {
            seen += 1;
            if seen == 3 {
                Err(Error::Aborted)
            } else {
                Ok(())
            }
        });
        assert_eq!(r, Err(Error::Aborted));
        assert_eq!(seen, 3);
    }

    #[test]
    fn empty_mesh_emits_nothing() {
        let rt = RegularTriangulation::new(&[Point2::new(0.5, 0.5)], &[0.0]).unwrap();
        let empty_mesh = TriMesh::new(Vec::new(), Vec::new()).unwrap();
        let mut calls = 0;
        intersect_cells(&empty_mesh, &rt, |_, _, _| {
            calls += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, 0);
    }
}
