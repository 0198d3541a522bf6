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

use crate::geometry::Point2;

/// Integrates a vector-valued function over a convex CCW polygon.
///
/// The polygon is fanned from its first vertex; each fan triangle uses
/// the three-point edge-midpoint rule, exact for integrands of total
/// degree <= 2 (linear density times a linear moment weight, or constant
/// density times a quadratic one).
pub fn integrate_fan<const K: usize>(
    vertices: &[Point2],
    f: impl Fn(&Point2) -> [f64; K],
) -> [f64; K] {
    let mut acc = [0.0; K];
    if vertices.len() < 3 {
        return acc;
    }
    let q0 = vertices[0];
    for i in 1..vertices.len() - 1 {
        let qi = vertices[i];
        let qj = vertices[i + 1];
        let area = 0.5 * (qi - q0).cross(&(qj - q0));
        if area == 0.0 {
            continue;
        }
        let s01 = f(&q0.midpoint(&qi));
        let s12 = f(&qi.midpoint(&qj));
        let s20 = f(&qj.midpoint(&q0));
        let w = area / 3.0;
        for k in 0..K {
            acc[k] += w * (s01[k] + s12[k] + s20[k]);
        }
    }
    acc
}
