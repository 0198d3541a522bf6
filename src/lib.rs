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

//! # sdot
//!
//! Semi-discrete optimal transport primitives in 2D: intersect the power
//! diagram of weighted sites with a triangulated background mesh carrying
//! a piecewise-linear density, and integrate moments of that density over
//! every intersection cell.
//!
//! The heart of the crate is a lockstep breadth-first traversal
//! ([`intersect_cells`]) that visits every nonempty
//! `power cell ∩ mesh face` polygon exactly once, clipping each
//! background triangle against the half-planes of one cell while tagging
//! every output edge with its provenance (mesh edge or power bisector).
//! The tags both drive the traversal's neighbor propagation and are
//! available to callers through the raw mode
//! ([`intersect_cells_raw`]).
//!
//! Predicates are filtered-exact (interval arithmetic with an exact
//! rational fallback), so degenerate inputs — cocircular sites, equal
//! weights, points on bisectors — resolve deterministically; geometric
//! constructions stay in f64.
//!
//! On top of the traversal sit the moment accumulators
//! ([`first_moment`], [`second_moment`]) and a [`lloyd`] relaxation step
//! for centroidal power tessellations.
//!
//! ## Example
//!
//! ```
//! use sdot::{lloyd, LinearDensity, Point2, TriMesh};
//!
//! let mesh = TriMesh::unit_square_grid(4);
//! let densities = vec![LinearDensity::constant(1.0); 32];
//! let sites = vec![Point2::new(0.25, 0.5), Point2::new(0.75, 0.5)];
//! let step = lloyd(&mesh, &densities, &sites, &[0.0, 0.0]).unwrap();
//! assert!((step.mass[0] - 0.5).abs() < 1e-9);
//! assert!((step.centroid[0][0] - 0.25).abs() < 1e-9);
//! ```

pub mod density;
pub mod error;
pub mod geometry;
pub mod intersection;
pub mod kernel;
pub mod moment;
pub mod numeric;
pub mod triangulation;

pub use density::{densities_from_vertex_values, LinearDensity};
pub use error::Error;
pub use geometry::{Point2, Vector2};
pub use intersection::{intersect_cells, intersect_cells_raw, CellClipper, EdgeSource, TaggedPolygon};
pub use moment::{first_moment, lloyd, second_moment, LloydStep, Moments, SecondMoments};
pub use triangulation::{
    BackgroundMesh, FaceId, PowerDiagram, RegularTriangulation, SiteId, TriMesh, WeightedSite,
};
