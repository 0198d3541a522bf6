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

//! Clips one background triangle against the half-planes of one power
//! cell, edge by edge, preserving per-edge provenance.

use smallvec::SmallVec;

use crate::geometry::Point2;
use crate::intersection::tagged::{EdgeSource, TaggedPolygon};
use crate::kernel::line::{det2, meet, LineSpec};
use crate::kernel::meet_side;
use crate::numeric::ExactScalar;
use crate::triangulation::{PowerDiagram, SiteId, WeightedSite};

/// One (face, site) clipping context.
///
/// Holds the triangle being clipped, the focal site, and the two edge
/// buffers that are swapped between clipping steps so no step allocates.
pub struct CellClipper<'a, D: PowerDiagram> {
    tri: [Point2; 3],
    diagram: &'a D,
    focal: SiteId,
    focal_site: WeightedSite,
    poly: TaggedPolygon,
    scratch: TaggedPolygon,
    inside: SmallVec<[bool; 8]>,
    cut_touched: bool,
}

impl<'a, D: PowerDiagram> CellClipper<'a, D> {
    /// Starts from the whole triangle, its three edges tagged
    /// `MeshEdge(0..3)` with edge `i` opposite vertex `i`.
    pub fn new(tri: [Point2; 3], diagram: &'a D, focal: SiteId) -> Self {
        CellClipper {
            tri,
            diagram,
            focal,
            focal_site: diagram.site(focal),
            poly: TaggedPolygon::triangle(),
            scratch: TaggedPolygon::default(),
            inside: SmallVec::new(),
            cut_touched: false,
        }
    }

    #[inline]
    pub fn polygon(&self) -> &TaggedPolygon {
        &self.poly
    }

    #[inline]
    pub fn focal(&self) -> SiteId {
        self.focal
    }

    /// True when the clip that emptied the polygon had vertices exactly on
    /// its cut line: the cell grazes this face with zero area, and pieces
    /// of other cells may adjoin across the contact.
    #[inline]
    pub fn cut_touched(&self) -> bool {
        self.cut_touched
    }

    /// The clip line a tag stands for, rederivable in any evaluation ring.
    pub fn line_spec(&self, tag: EdgeSource) -> LineSpec {
        match tag {
            EdgeSource::MeshEdge(i) => LineSpec::Edge {
                p: self.tri[(i + 1) % 3],
                q: self.tri[(i + 2) % 3],
            },
            EdgeSource::Bisector(u) => self.bisector_with(self.diagram.site(u)),
        }
    }

    #[inline]
    fn bisector_with(&self, u: WeightedSite) -> LineSpec {
        LineSpec::Bisector {
            v: self.focal_site.position,
            vw: self.focal_site.weight,
            u: u.position,
            uw: u.weight,
        }
    }

    /// Clips the current polygon against the half-plane of the focal site
    /// w.r.t. its neighbor `u`. Returns `false` when the polygon became
    /// empty (callers stop clipping and emit nothing).
    ///
    /// Unchanged edges keep their tags; the one new edge introduced by the
    /// cut is tagged `Bisector(u)`. A vertex exactly on the radical axis
    /// counts as inside for the smaller site id, so boundary points have
    /// exactly one owner.
    pub fn clip(&mut self, u: SiteId) -> bool {
        let n = self.poly.len();
        if n == 0 {
            return false;
        }
        let cut = self.bisector_with(self.diagram.site(u));

        self.inside.clear();
        let mut inside_count = 0;
        let mut strict_count = 0;
        let mut tie_count = 0;
        for k in 0..n {
            let (e_prev, e_cur) = self.poly.vertex_edges(k);
            let s = meet_side(&self.line_spec(e_prev), &self.line_spec(e_cur), &cut);
            let inside = s < 0 || (s == 0 && self.focal < u);
            if s < 0 {
                strict_count += 1;
            } else if s == 0 {
                tie_count += 1;
            }
            if inside {
                inside_count += 1;
            }
            self.inside.push(inside);
        }

        if inside_count == n {
            return true;
        }
        // A kept set with no vertex strictly off the cut line is a
        // zero-area sliver lying on the line: empty. Either way, remember
        // whether the polygon touched the cut so the traversal can still
        // hand the face to the cell on the other side.
        if inside_count == 0 || strict_count == 0 {
            self.cut_touched = tie_count > 0;
            self.poly.clear();
            return false;
        }

        // The inside vertices form one contiguous arc (the kept set is the
        // polygon intersected with a half-plane). Keep the arc's edges,
        // then close with the new bisector edge.
        let entry = (0..n)
            .find(|&k| self.inside[k] && !self.inside[(k + n - 1) % n])
            .expect("mixed classification has an entry vertex");
        self.scratch.clear();
        self.scratch.push(self.poly.edge((entry + n - 1) % n));
        let mut k = entry;
        while self.inside[k] {
            self.scratch.push(self.poly.edge(k));
            k = (k + 1) % n;
        }
        self.scratch.push(EdgeSource::Bisector(u));
        std::mem::swap(&mut self.poly, &mut self.scratch);
        true
    }

    /// Coordinates of vertex `k` of a tagged polygon: the meet of its two
    /// defining lines, constructed in f64 with an exact-arithmetic rescue
    /// when the f64 denominator cancels to zero.
    pub fn vertex(&self, poly: &TaggedPolygon, k: usize) -> Point2 {
        let (e_prev, e_cur) = poly.vertex_edges(k);
        let l1 = self.line_spec(e_prev);
        let l2 = self.line_spec(e_cur);
        if let Some(p) = meet(&l1.coeffs(), &l2.coeffs()) {
            return p;
        }
        let x1 = l1.eval::<ExactScalar>();
        let x2 = l2.eval::<ExactScalar>();
        let d = det2(&x1, &x2);
        debug_assert!(d.sign() != 0, "adjacent polygon edges are parallel");
        let nx = x1.b.clone() * x2.c.clone() - x2.b.clone() * x1.c.clone();
        let ny = x1.c.clone() * x2.a.clone() - x2.c.clone() * x1.a.clone();
        Point2::new((nx.0 / d.0.clone()).to_f64(), (ny.0 / d.0).to_f64())
    }

    /// Resolves every vertex of `poly` into `out` (cleared first), in the
    /// polygon's CCW order.
    pub fn materialize_into(&self, poly: &TaggedPolygon, out: &mut Vec<Point2>) {
        out.clear();
        for k in 0..poly.len() {
            out.push(self.vertex(poly, k));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangulation::RegularTriangulation;

    fn unit_triangle() -> [Point2; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn no_neighbors_keeps_the_triangle() {
        let rt = RegularTriangulation::new(&[Point2::new(0.3, 0.3)], &[0.0]).unwrap();
        let clipper = CellClipper::new(unit_triangle(), &rt, 0);
        assert_eq!(clipper.polygon().len(), 3);
        let mut pts = Vec::new();
        clipper.materialize_into(clipper.polygon(), &mut pts);
        // MeshEdge(i) is opposite vertex i, so vertex 0 of the tagged
        // cycle (meet of edges 2 and 0) is triangle vertex 1.
        assert_eq!(pts[0], Point2::new(1.0, 0.0));
        assert_eq!(pts[1], Point2::new(0.0, 1.0));
        assert_eq!(pts[2], Point2::new(0.0, 0.0));
    }

    #[test]
    fn halfplane_cut_splits_the_triangle() {
        let rt = RegularTriangulation::new(
            &[Point2::new(0.0, 0.25), Point2::new(1.0, 0.25)],
            &[0.0, 0.0],
        )
        .unwrap();
        // Site 0's cell is x <= 0.5.
        let mut clipper = CellClipper::new(unit_triangle(), &rt, 0);
        assert!(clipper.clip(1));
        let tags = clipper.polygon().edges().to_vec();
        assert!(tags.contains(&EdgeSource::Bisector(1)));
        assert_eq!(tags.len(), 4);
        let mut pts = Vec::new();
        clipper.materialize_into(clipper.polygon(), &mut pts);
        let area = crate::geometry::polygon::signed_area(&pts);
        // The quad 0 <= x <= 0.5 within the triangle has area 3/8.
        assert!((area - 0.375).abs() < 1e-12);
    }

    #[test]
    fn far_cell_clips_to_nothing() {
        let rt = RegularTriangulation::new(
            &[Point2::new(5.0, 0.25), Point2::new(0.2, 0.25)],
            &[0.0, 0.0],
        )
        .unwrap();
        let mut clipper = CellClipper::new(unit_triangle(), &rt, 0);
        assert!(!clipper.clip(1));
        assert!(clipper.polygon().is_empty());
    }

    #[test]
    fn tangent_cut_through_a_vertex_keeps_one_owner() {
        // Sites symmetric about the corner (0,0): the bisector passes
        // exactly through the triangle vertex. The smaller id keeps the
        // full triangle, the larger id gets the empty side.
        let rt = RegularTriangulation::new(
            &[Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)],
            &[0.0, 0.0],
        )
        .unwrap();
        let tri = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, -0.5),
            Point2::new(2.0, 0.5),
        ];
        // Every point of this triangle except (0,0) is strictly on site
        // 1's side. Site 0's share is the zero-area corner sliver, which
        // the tie-break hands to the smaller id as an empty clip; site 1
        // keeps the full triangle (with a zero-length bisector edge at
        // the tangent corner).
        let mut c0 = CellClipper::new(tri, &rt, 0);
        assert!(!c0.clip(1));
        let mut c1 = CellClipper::new(tri, &rt, 1);
        assert!(c1.clip(0));
        assert_eq!(c1.polygon().len(), 4);
        let mut pts = Vec::new();
        c1.materialize_into(c1.polygon(), &mut pts);
        let area = crate::geometry::polygon::signed_area(&pts);
        assert!((area - 0.75).abs() < 1e-12);
    }
}
