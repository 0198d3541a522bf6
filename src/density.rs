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

use crate::error::Error;
use crate::geometry::Point2;
use crate::triangulation::{BackgroundMesh, TriMesh};

/// Affine density `rho(q) = a*q.x + b*q.y + c` over one mesh face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearDensity {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LinearDensity {
    #[inline]
    pub fn constant(value: f64) -> Self {
        LinearDensity {
            a: 0.0,
            b: 0.0,
            c: value,
        }
    }

    /// The affine function interpolating the three vertex samples, or
    /// `None` when the triangle is degenerate.
    pub fn from_vertex_samples(tri: &[Point2; 3], values: [f64; 3]) -> Option<Self> {
        let [p, q, r] = *tri;
        let [fp, fq, fr] = values;
        let d = (q.x - p.x) * (r.y - p.y) - (r.x - p.x) * (q.y - p.y);
        if d == 0.0 {
            return None;
        }
        let a = ((fq - fp) * (r.y - p.y) - (fr - fp) * (q.y - p.y)) / d;
        let b = ((fr - fp) * (q.x - p.x) - (fq - fp) * (r.x - p.x)) / d;
        let c = fp - a * p.x - b * p.y;
        Some(LinearDensity { a, b, c })
    }

    #[inline]
    pub fn eval(&self, q: &Point2) -> f64 {
        self.a * q.x + self.b * q.y + self.c
    }
}

/// Per-face linear densities interpolating one sample per mesh vertex,
/// the piecewise representation a rasterized density (an image) reduces
/// to on a grid mesh.
pub fn densities_from_vertex_values(
    mesh: &TriMesh,
    values: &[f64],
) -> Result<Vec<LinearDensity>, Error> {
    if values.len() != mesh.num_vertices() {
        return Err(Error::ValueCountMismatch {
            values: values.len(),
            vertices: mesh.num_vertices(),
        });
    }
    let mut out = Vec::with_capacity(mesh.num_faces());
    for f in 0..mesh.num_faces() {
        let [i, j, k] = mesh.face(f);
        let tri = [mesh.vertex(i), mesh.vertex(j), mesh.vertex(k)];
        let rho = LinearDensity::from_vertex_samples(&tri, [values[i], values[j], values[k]])
            .ok_or(Error::DegenerateFace { face: f })?;
        out.push(rho);
    }
    Ok(out)
}
