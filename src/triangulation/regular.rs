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

//! Regular (weighted Delaunay) triangulation by incremental insertion.
//!
//! Sites are inserted in id order into a bounding super-triangle. The
//! conflict region of each new site is grown by the filtered
//! [`power_conflict`] predicate and re-triangulated as a fan; sites whose
//! power cell is empty are flagged hidden instead of inserted. Faces
//! touching the super-triangle stay in the structure so every real site
//! has a closed triangle fan, which keeps the neighbor walk branchless;
//! they are simply skipped when enumerating neighbors.

use ahash::{AHashMap, AHashSet};

use crate::error::Error;
use crate::geometry::Point2;
use crate::kernel::{orient2d, power_conflict, power_side};
use crate::triangulation::{PowerDiagram, SiteId, WeightedSite};

const SQRT_3: f64 = 1.7320508075688772;

/// How far the super-triangle vertices sit beyond the site bounding box.
/// Far enough that no bisector with a super vertex crosses the sites'
/// neighborhood for any plausible weight range.
const SUPER_SCALE: f64 = 1.0e6;

#[derive(Clone, Debug)]
struct Face {
    v: [usize; 3],
    n: [Option<usize>; 3], // across edge i, opposite vertex i
    alive: bool,
}

#[derive(Clone, Debug)]
pub struct RegularTriangulation {
    verts: Vec<Point2>, // sites 0..N, then 3 super vertices
    weights: Vec<f64>,
    hidden: Vec<bool>,
    faces: Vec<Face>,
    vert_face: Vec<Option<usize>>,
    last_face: usize,
}

impl RegularTriangulation {
    /// Builds the regular triangulation of `points` with `weights`,
    /// inserting sites in id order.
    pub fn new(points: &[Point2], weights: &[f64]) -> Result<Self, Error> {
        if points.is_empty() {
            return Err(Error::NoSites);
        }
        if points.len() != weights.len() {
            return Err(Error::SiteCountMismatch {
                points: points.len(),
                weights: weights.len(),
            });
        }
        if points.iter().any(|p| !p.is_finite()) || weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::DegenerateSites);
        }
        if points.len() > 1 && points.iter().all(|p| *p == points[0]) {
            return Err(Error::DegenerateSites);
        }

        let n = points.len();
        let (mut lo_x, mut lo_y, mut hi_x, mut hi_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for p in points {
            lo_x = lo_x.min(p.x);
            lo_y = lo_y.min(p.y);
            hi_x = hi_x.max(p.x);
            hi_y = hi_y.max(p.y);
        }
        let cx = 0.5 * (lo_x + hi_x);
        let cy = 0.5 * (lo_y + hi_y);
        let extent = (hi_x - lo_x).max(hi_y - lo_y).max(1.0);
        let m = SUPER_SCALE * extent;

        let mut verts = Vec::with_capacity(n + 3);
        verts.extend_from_slice(points);
        verts.push(Point2::new(cx, cy + 2.0 * m));
        verts.push(Point2::new(cx - SQRT_3 * m, cy - m));
        verts.push(Point2::new(cx + SQRT_3 * m, cy - m));

        let mut wts = Vec::with_capacity(n + 3);
        wts.extend_from_slice(weights);
        wts.extend_from_slice(&[0.0, 0.0, 0.0]);

        let mut rt = RegularTriangulation {
            verts,
            weights: wts,
            hidden: vec![false; n],
            faces: vec![Face {
                v: [n, n + 1, n + 2],
                n: [None; 3],
                alive: true,
            }],
            vert_face: Vec::new(),
            last_face: 0,
        };

        for i in 0..n {
            rt.insert(i);
        }

        rt.vert_face = vec![None; rt.verts.len()];
        for (fi, f) in rt.faces.iter().enumerate() {
            if f.alive {
                for &vv in &f.v {
                    rt.vert_face[vv] = Some(fi);
                }
            }
        }
        Ok(rt)
    }

    #[inline]
    fn face_conflict(&self, f: usize, q: &Point2, wq: f64) -> i8 {
        let [a, b, c] = self.faces[f].v;
        power_conflict(
            (&self.verts[a], self.weights[a]),
            (&self.verts[b], self.weights[b]),
            (&self.verts[c], self.weights[c]),
            (q, wq),
        )
    }

    /// Face whose closure contains `q`: an orientation walk from the last
    /// created face, with a linear-scan fallback bounding the walk.
    fn locate(&self, q: &Point2) -> usize {
        let mut f = self.last_face;
        let cap = 3 * self.faces.len() + 32;
        let mut steps = 0;
        loop {
            steps += 1;
            if steps > cap {
                return self.locate_scan(q);
            }
            let face = &self.faces[f];
            let mut moved = false;
            for j in 0..3 {
                let a = &self.verts[face.v[(j + 1) % 3]];
                let b = &self.verts[face.v[(j + 2) % 3]];
                if orient2d(a, b, q) < 0 {
                    match face.n[j] {
                        Some(g) => {
                            f = g;
                            moved = true;
                            break;
                        }
                        None => return self.locate_scan(q),
                    }
                }
            }
            if !moved {
                return f;
            }
        }
    }

    fn locate_scan(&self, q: &Point2) -> usize {
        for (fi, face) in self.faces.iter().enumerate() {
            if !face.alive {
                continue;
            }
            let inside = (0..3).all(|j| {
                let a = &self.verts[face.v[(j + 1) % 3]];
                let b = &self.verts[face.v[(j + 2) % 3]];
                orient2d(a, b, q) >= 0
            });
            if inside {
                return fi;
            }
        }
        unreachable!("query point lies outside the bounding triangle")
    }

    fn insert(&mut self, i: usize) {
        let q = self.verts[i];
        let wq = self.weights[i];
        let f0 = self.locate(&q);

        // A site that does not conflict with its containing face has an
        // empty power cell.
        if self.face_conflict(f0, &q, wq) <= 0 {
            self.hidden[i] = true;
            return;
        }

        // Grow the conflict region and record its rim as (face, edge).
        let mut conflict = vec![f0];
        let mut in_conflict: AHashSet<usize> = AHashSet::default();
        in_conflict.insert(f0);
        let mut stack = vec![f0];
        let mut rim_edges: Vec<(usize, usize)> = Vec::new();
        while let Some(f) = stack.pop() {
            for j in 0..3 {
                match self.faces[f].n[j] {
                    Some(g) => {
                        if in_conflict.contains(&g) {
                            continue;
                        }
                        if self.face_conflict(g, &q, wq) > 0 {
                            in_conflict.insert(g);
                            conflict.push(g);
                            stack.push(g);
                        } else {
                            rim_edges.push((f, j));
                        }
                    }
                    None => rim_edges.push((f, j)),
                }
            }
        }

        let mut cavity_verts: AHashSet<usize> = AHashSet::default();
        for &f in &conflict {
            for &vv in &self.faces[f].v {
                cavity_verts.insert(vv);
            }
            self.faces[f].alive = false;
        }

        // Fan the cavity from the new site. Sibling fan faces are stitched
        // through a directed-edge map; the rim edge reuses the surviving
        // neighbor.
        let mut half_edges: AHashMap<(usize, usize), (usize, usize)> = AHashMap::default();
        let mut rim_verts: AHashSet<usize> = AHashSet::default();
        for &(f, j) in &rim_edges {
            let a = self.faces[f].v[(j + 1) % 3];
            let b = self.faces[f].v[(j + 2) % 3];
            let outside = self.faces[f].n[j];
            debug_assert!(
                orient2d(&self.verts[a], &self.verts[b], &q) > 0,
                "cavity is star-shaped around the inserted site"
            );
            let nf = self.faces.len();
            self.faces.push(Face {
                v: [a, b, i],
                n: [None, None, outside],
                alive: true,
            });
            if let Some(o) = outside {
                let k = self.edge_slot(o, a, b);
                self.faces[o].n[k] = Some(nf);
            }
            for (from, to, slot) in [(b, i, 0usize), (i, a, 1usize)] {
                if let Some(&(g, gs)) = half_edges.get(&(to, from)) {
                    self.faces[nf].n[slot] = Some(g);
                    self.faces[g].n[gs] = Some(nf);
                } else {
                    half_edges.insert((from, to), (nf, slot));
                }
            }
            rim_verts.insert(a);
            rim_verts.insert(b);
            self.last_face = nf;
        }

        // Real vertices strictly interior to the cavity lost every
        // incident face: their cells are now empty.
        let n_real = self.num_sites();
        for &vv in &cavity_verts {
            if vv < n_real && vv != i && !rim_verts.contains(&vv) {
                self.hidden[vv] = true;
            }
        }
    }

    fn edge_slot(&self, face: usize, a: usize, b: usize) -> usize {
        let fv = self.faces[face].v;
        for k in 0..3 {
            let x = fv[(k + 1) % 3];
            let y = fv[(k + 2) % 3];
            if (x == a && y == b) || (x == b && y == a) {
                return k;
            }
        }
        unreachable!("adjacent face does not share the rim edge")
    }

    /// True when the site's power cell is empty and it takes part in no
    /// triangulation face.
    #[inline]
    pub fn is_hidden(&self, v: SiteId) -> bool {
        self.hidden[v]
    }
}

impl PowerDiagram for RegularTriangulation {
    #[inline]
    fn num_sites(&self) -> usize {
        self.verts.len() - 3
    }

    #[inline]
    fn site(&self, v: SiteId) -> WeightedSite {
        WeightedSite {
            position: self.verts[v],
            weight: self.weights[v],
        }
    }

    fn nearest_site(&self, q: &Point2) -> Option<SiteId> {
        let n = self.num_sites();
        let mut best: Option<SiteId> = None;
        for i in 0..n {
            if self.hidden[i] {
                continue;
            }
            match best {
                None => best = Some(i),
                Some(b) => {
                    // Strictly smaller power only: ties stay with the
                    // smaller id.
                    if power_side(
                        (&self.verts[b], self.weights[b]),
                        (&self.verts[i], self.weights[i]),
                        q,
                    ) > 0
                    {
                        best = Some(i);
                    }
                }
            }
        }
        best
    }

    fn neighbors_ccw(&self, v: SiteId, out: &mut Vec<SiteId>) {
        out.clear();
        if self.hidden[v] {
            return;
        }
        let n = self.num_sites();
        let start = match self.vert_face.get(v).copied().flatten() {
            Some(f) => f,
            None => return,
        };
        let mut f = start;
        loop {
            let face = &self.faces[f];
            let i = face
                .v
                .iter()
                .position(|&x| x == v)
                .expect("fan face contains its hub");
            let w = face.v[(i + 1) % 3];
            if w < n {
                out.push(w);
            }
            // Super-triangle faces close every real fan, so the walk
            // never meets a missing neighbor.
            f = face.n[(i + 1) % 3].expect("triangle fan is closed");
            if f == start {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_sites_are_mutual_neighbors() {
        let rt = RegularTriangulation::new(
            &[Point2::new(0.25, 0.5), Point2::new(0.75, 0.5)],
            &[0.0, 0.0],
        )
        .unwrap();
        let mut nbrs = Vec::new();
        rt.neighbors_ccw(0, &mut nbrs);
        assert_eq!(nbrs, vec![1]);
        rt.neighbors_ccw(1, &mut nbrs);
        assert_eq!(nbrs, vec![0]);
    }

    #[test]
    fn single_site_has_no_neighbors() {
        let rt = RegularTriangulation::new(&[Point2::new(0.5, 0.5)], &[0.0]).unwrap();
        let mut nbrs = Vec::new();
        rt.neighbors_ccw(0, &mut nbrs);
        assert!(nbrs.is_empty());
        assert_eq!(rt.nearest_site(&Point2::new(10.0, -3.0)), Some(0));
    }

    #[test]
    fn duplicate_site_is_hidden() {
        let rt = RegularTriangulation::new(
            &[
                Point2::new(0.5, 0.5),
                Point2::new(0.5, 0.5),
                Point2::new(0.25, 0.25),
            ],
            &[0.0, 0.0, 0.0],
        )
        .unwrap();
        assert!(!rt.is_hidden(0));
        assert!(rt.is_hidden(1));
        assert!(!rt.is_hidden(2));
        let mut nbrs = Vec::new();
        rt.neighbors_ccw(1, &mut nbrs);
        assert!(nbrs.is_empty());
    }

    #[test]
    fn heavy_duplicate_hides_the_earlier_site() {
        let rt = RegularTriangulation::new(
            &[
                Point2::new(0.5, 0.5),
                Point2::new(0.5, 0.5),
                Point2::new(2.0, 2.0),
            ],
            &[0.0, 0.5, 0.0],
        )
        .unwrap();
        assert!(rt.is_hidden(0));
        assert!(!rt.is_hidden(1));
    }

    #[test]
    fn dominated_site_is_hidden() {
        // The middle site's cell is swallowed by a heavy neighbor.
        let rt = RegularTriangulation::new(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(0.1, 0.0),
                Point2::new(5.0, 0.0),
            ],
            &[4.0, 0.0, 0.0],
        )
        .unwrap();
        assert!(!rt.is_hidden(0));
        assert!(rt.is_hidden(1));
        assert!(!rt.is_hidden(2));
    }

    #[test]
    fn grid_interior_site_has_four_neighbors() {
        let mut pts = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                pts.push(Point2::new(i as f64, j as f64));
            }
        }
        let rt = RegularTriangulation::new(&pts, &vec![0.0; 9]).unwrap();
        let mut nbrs = Vec::new();
        // Site 4 is the center of the 3x3 grid; its cocircular quads give
        // it 4 axis neighbors plus up to 2 diagonal ties.
        rt.neighbors_ccw(4, &mut nbrs);
        assert!(nbrs.len() >= 4, "center fan too small: {:?}", nbrs);
        for axis in [1usize, 3, 5, 7] {
            assert!(nbrs.contains(&axis));
        }
        // CCW order: the axis neighbors must appear in rotational order.
        let pos: Vec<usize> = [5usize, 7, 3, 1]
            .iter()
            .map(|a| nbrs.iter().position(|x| x == a).unwrap())
            .collect();
        let rot = pos.iter().position(|&p| p == *pos.iter().min().unwrap()).unwrap();
        let rotated: Vec<usize> = (0..4).map(|k| pos[(rot + k) % 4]).collect();
        assert!(rotated.windows(2).all(|w| w[0] < w[1]), "not CCW: {:?}", nbrs);
    }

    #[test]
    fn nearest_site_tie_breaks_to_smaller_id() {
        let rt = RegularTriangulation::new(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            &[0.0, 0.0],
        )
        .unwrap();
        assert_eq!(rt.nearest_site(&Point2::new(0.5, 3.0)), Some(0));
    }
}
