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

use std::ops::{Add, Mul, Neg, Sub};

use num_traits::Zero;

/// Midpoint-radius interval used as the fast stage of the filtered
/// predicates: the represented value lies in `[mid - rad, mid + rad]`.
///
/// Rounding of each operation is absorbed into the radius through
/// error-free transformations, so a sign that clears the radius is a
/// proven sign and no exact fallback is needed.
#[derive(Copy, Clone, Debug)]
pub struct Interval {
    mid: f64,
    rad: f64,
}

// The radius itself is computed in rounded f64 arithmetic; every bound
// below is widened by this factor to absorb those few roundings.
const SLACK: f64 = 1.0 + 4.0 * f64::EPSILON;

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = f64::mul_add(a, b, -p);
    (p, err)
}

impl Interval {
    #[inline]
    pub fn exact(x: f64) -> Self {
        Interval { mid: x, rad: 0.0 }
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        self.mid
    }

    /// Sign of the represented value, or `None` when the interval
    /// straddles zero and the exact stage must decide.
    #[inline]
    pub fn sign_if_certain(&self) -> Option<i8> {
        if !self.rad.is_finite() {
            return None;
        }
        if self.mid > self.rad {
            Some(1)
        } else if self.mid < -self.rad {
            Some(-1)
        } else if self.mid == 0.0 && self.rad == 0.0 {
            Some(0)
        } else {
            None
        }
    }
}

impl From<f64> for Interval {
    #[inline]
    fn from(x: f64) -> Self {
        Interval::exact(x)
    }
}

impl Add for Interval {
    type Output = Interval;
    #[inline]
    fn add(self, rhs: Interval) -> Interval {
        let (s, e) = two_sum(self.mid, rhs.mid);
        Interval {
            mid: s,
            rad: (self.rad + rhs.rad + e.abs()) * SLACK,
        }
    }
}

impl Sub for Interval {
    type Output = Interval;
    #[inline]
    fn sub(self, rhs: Interval) -> Interval {
        self + (-rhs)
    }
}

impl Mul for Interval {
    type Output = Interval;
    #[inline]
    fn mul(self, rhs: Interval) -> Interval {
        let (p, e) = two_prod(self.mid, rhs.mid);
        let rad = self.mid.abs() * rhs.rad
            + rhs.mid.abs() * self.rad
            + self.rad * rhs.rad
            + e.abs();
        Interval {
            mid: p,
            rad: rad * SLACK,
        }
    }
}

impl Neg for Interval {
    type Output = Interval;
    #[inline]
    fn neg(self) -> Interval {
        Interval {
            mid: -self.mid,
            rad: self.rad,
        }
    }
}

impl Zero for Interval {
    #[inline]
    fn zero() -> Self {
        Interval::exact(0.0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.mid == 0.0 && self.rad == 0.0
    }
}
