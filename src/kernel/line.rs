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
use crate::numeric::Scalar;

/// Homogeneous line coefficients: `L(q) = a*q.x + b*q.y + c`.
///
/// Clip lines are always oriented so the kept half-plane is `L(q) <= 0`.
#[derive(Clone, Debug)]
pub struct Line<T> {
    pub a: T,
    pub b: T,
    pub c: T,
}

/// Symbolic description of a clip line, carrying the primitive f64 inputs
/// it is derived from. Coefficients are re-derived per evaluation ring, so
/// the exact predicate stage never sees rounded intermediates.
#[derive(Clone, Copy, Debug)]
pub enum LineSpec {
    /// Directed edge `p -> q` of a CCW polygon; the interior (left side)
    /// evaluates negative.
    Edge { p: Point2, q: Point2 },
    /// Radical axis between the focal site `v` and a neighbor `u`:
    /// `L(q) = pow_v(q) - pow_u(q)`, negative strictly inside v's cell.
    Bisector {
        v: Point2,
        vw: f64,
        u: Point2,
        uw: f64,
    },
}

impl LineSpec {
    pub fn eval<T: Scalar>(&self) -> Line<T> {
        match *self {
            LineSpec::Edge { p, q } => {
                let px = T::from(p.x);
                let py = T::from(p.y);
                let qx = T::from(q.x);
                let qy = T::from(q.y);
                // L(q) = (q.x - p.x)(Qy - Py) - (q.y - p.y)(Qx - Px),
                // expanded into homogeneous form.
                Line {
                    a: qy.clone() - py.clone(),
                    b: px.clone() - qx.clone(),
                    c: py * qx - px * qy,
                }
            }
            LineSpec::Bisector { v, vw, u, uw } => {
                let two = T::from(2.0);
                let vx = T::from(v.x);
                let vy = T::from(v.y);
                let ux = T::from(u.x);
                let uy = T::from(u.y);
                let lift_v = vx.clone() * vx.clone() + vy.clone() * vy.clone() - T::from(vw);
                let lift_u = ux.clone() * ux.clone() + uy.clone() * uy.clone() - T::from(uw);
                Line {
                    a: two.clone() * (ux - vx),
                    b: two * (uy - vy),
                    c: lift_v - lift_u,
                }
            }
        }
    }

    /// f64 coefficients, for constructions.
    #[inline]
    pub fn coeffs(&self) -> Line<f64> {
        self.eval::<f64>()
    }
}

/// `a1*b2 - a2*b1`; zero iff the lines are parallel.
pub fn det2<T: Scalar>(l1: &Line<T>, l2: &Line<T>) -> T {
    l1.a.clone() * l2.b.clone() - l2.a.clone() * l1.b.clone()
}

/// Determinant of the 3x3 coefficient matrix; zero iff the three lines
/// are concurrent (or some pair is parallel).
pub fn det3<T: Scalar>(l1: &Line<T>, l2: &Line<T>, l3: &Line<T>) -> T {
    let minor_a = l1.b.clone() * l2.c.clone() - l2.b.clone() * l1.c.clone();
    let minor_b = l1.a.clone() * l2.c.clone() - l2.a.clone() * l1.c.clone();
    let minor_c = l1.a.clone() * l2.b.clone() - l2.a.clone() * l1.b.clone();
    let mut acc = T::zero();
    acc = acc + l3.a.clone() * minor_a;
    acc = acc - l3.b.clone() * minor_b;
    acc = acc + l3.c.clone() * minor_c;
    acc
}

/// Intersection point of two lines (Cramer's rule, inexact), or `None`
/// when the f64 denominator vanishes.
pub fn meet(l1: &Line<f64>, l2: &Line<f64>) -> Option<Point2> {
    let d = l1.a * l2.b - l2.a * l1.b;
    if d == 0.0 {
        return None;
    }
    Some(Point2::new(
        (l1.b * l2.c - l2.b * l1.c) / d,
        (l1.c * l2.a - l2.c * l1.a) / d,
    ))
}
