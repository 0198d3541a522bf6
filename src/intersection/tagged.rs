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

use smallvec::SmallVec;

use crate::triangulation::SiteId;

/// Provenance of one edge of an intersection polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeSource {
    /// Lies on edge `i` of the current background face (the edge opposite
    /// vertex `i`); crossing it enters `neighbor(i)` of the face.
    MeshEdge(usize),
    /// Lies on the radical axis between the focal site and site `u`;
    /// crossing it enters `u`'s power cell.
    Bisector(SiteId),
}

/// A convex polygon stored as its cyclic sequence of tagged edge lines.
///
/// Vertex `k` is the meet of edges `k-1` and `k` (cyclically); no vertex
/// coordinates are stored until a caller materializes them. This is what
/// lets one clip pass run without constructing intermediate points.
#[derive(Clone, Debug, Default)]
pub struct TaggedPolygon {
    edges: SmallVec<[EdgeSource; 8]>,
}

impl TaggedPolygon {
    pub(crate) fn triangle() -> Self {
        let mut edges = SmallVec::new();
        edges.push(EdgeSource::MeshEdge(0));
        edges.push(EdgeSource::MeshEdge(1));
        edges.push(EdgeSource::MeshEdge(2));
        TaggedPolygon { edges }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn edges(&self) -> &[EdgeSource] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, k: usize) -> EdgeSource {
        self.edges[k]
    }

    /// The pair of edges whose meet is vertex `k`.
    #[inline]
    pub fn vertex_edges(&self, k: usize) -> (EdgeSource, EdgeSource) {
        let n = self.edges.len();
        (self.edges[(k + n - 1) % n], self.edges[k])
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.edges.clear();
    }

    #[inline]
    pub(crate) fn push(&mut self, e: EdgeSource) {
        self.edges.push(e);
    }
}
