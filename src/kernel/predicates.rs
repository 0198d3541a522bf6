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

//! Filtered-exact predicates.
//!
//! Each predicate evaluates its polynomial twice at most: once in
//! [`Interval`] arithmetic, and again in [`ExactScalar`] only when the
//! interval straddles zero. Both stages share one generic evaluation
//! function, so they cannot drift apart.

use crate::geometry::Point2;
use crate::kernel::line::{det2, det3, LineSpec};
use crate::numeric::{ExactScalar, Interval, Scalar};

/// Orientation of the triple (a, b, c): +1 counter-clockwise, -1
/// clockwise, 0 collinear. The sign is exact.
pub fn orient2d(a: &Point2, b: &Point2, c: &Point2) -> i8 {
    fn eval<T: Scalar>(a: &Point2, b: &Point2, c: &Point2) -> T {
        let abx = T::from(b.x) - T::from(a.x);
        let aby = T::from(b.y) - T::from(a.y);
        let acx = T::from(c.x) - T::from(a.x);
        let acy = T::from(c.y) - T::from(a.y);
        abx * acy - aby * acx
    }
    if let Some(s) = eval::<Interval>(a, b, c).sign_if_certain() {
        return s;
    }
    eval::<ExactScalar>(a, b, c).sign()
}

/// Weighted in-circle test for regular-triangulation insertion.
///
/// For a CCW face (a, b, c), returns +1 when the weighted point `d`
/// conflicts with the face (negative power w.r.t. the face's
/// orthocircle), -1 when it does not, 0 in the equipower case. The sign
/// is exact.
pub fn power_conflict(
    a: (&Point2, f64),
    b: (&Point2, f64),
    c: (&Point2, f64),
    d: (&Point2, f64),
) -> i8 {
    fn lift<T: Scalar>(p: &Point2, w: f64) -> T {
        T::from(p.x) * T::from(p.x) + T::from(p.y) * T::from(p.y) - T::from(w)
    }
    fn eval<T: Scalar>(
        a: (&Point2, f64),
        b: (&Point2, f64),
        c: (&Point2, f64),
        d: (&Point2, f64),
    ) -> T {
        let dx = T::from(d.0.x);
        let dy = T::from(d.0.y);
        let ld = lift::<T>(d.0, d.1);
        let row = |p: (&Point2, f64)| {
            (
                T::from(p.0.x) - dx.clone(),
                T::from(p.0.y) - dy.clone(),
                lift::<T>(p.0, p.1) - ld.clone(),
            )
        };
        let (ax, ay, al) = row(a);
        let (bx, by, bl) = row(b);
        let (cx, cy, cl) = row(c);
        ax.clone() * (by.clone() * cl.clone() - cy.clone() * bl.clone())
            - ay.clone() * (bx.clone() * cl - cx.clone() * bl)
            + al * (bx * cy - cx * by)
    }
    if let Some(s) = eval::<Interval>(a, b, c, d).sign_if_certain() {
        return s;
    }
    eval::<ExactScalar>(a, b, c, d).sign()
}

/// Sign of `pow_v(q) - pow_u(q)` for weighted sites v, u at the f64 query
/// point `q`: -1 when v is strictly closer in power distance, +1 when u
/// is, 0 on the radical axis. The sign is exact.
pub fn power_side(v: (&Point2, f64), u: (&Point2, f64), q: &Point2) -> i8 {
    fn eval<T: Scalar>(v: (&Point2, f64), u: (&Point2, f64), q: &Point2) -> T {
        let l = LineSpec::Bisector {
            v: *v.0,
            vw: v.1,
            u: *u.0,
            uw: u.1,
        }
        .eval::<T>();
        l.a * T::from(q.x) + l.b * T::from(q.y) + l.c
    }
    if let Some(s) = eval::<Interval>(v, u, q).sign_if_certain() {
        return s;
    }
    eval::<ExactScalar>(v, u, q).sign()
}

/// Side of the line `l3` on which the meet of `l1` and `l2` lies.
///
/// The meet is never constructed: the sign equals
/// `sign(det3(l1,l2,l3)) * sign(det2(l1,l2))`, evaluated from the
/// primitive inputs of each [`LineSpec`]. Returns 0 when the meet lies
/// exactly on `l3`.
///
/// `l1` and `l2` must not be parallel (the meet must exist); this holds
/// for consecutive edges of a nondegenerate convex polygon.
pub fn meet_side(l1: &LineSpec, l2: &LineSpec, l3: &LineSpec) -> i8 {
    {
        let i1 = l1.eval::<Interval>();
        let i2 = l2.eval::<Interval>();
        let i3 = l3.eval::<Interval>();
        let m = det3(&i1, &i2, &i3).sign_if_certain();
        if m == Some(0) {
            // Certified concurrent regardless of det2's sign: on the line.
            return 0;
        }
        let d = det2(&i1, &i2).sign_if_certain();
        if let (Some(sm), Some(sd)) = (m, d) {
            return sm * sd;
        }
    }
    let e1 = l1.eval::<ExactScalar>();
    let e2 = l2.eval::<ExactScalar>();
    let e3 = l3.eval::<ExactScalar>();
    let sd = det2(&e1, &e2).sign();
    debug_assert!(sd != 0, "meet_side called on parallel lines");
    det3(&e1, &e2, &e3).sign() * sd
}
