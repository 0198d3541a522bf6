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

use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::Zero;
use rug::Rational;

/// Exact rational scalar for the slow stage of the filtered predicates.
///
/// Every f64 input is exactly representable as a rational, so the sign of a
/// polynomial evaluated in this type is the true sign of the expression.
#[derive(Clone, Debug, PartialEq)]
pub struct ExactScalar(pub Rational);

impl ExactScalar {
    /// Returns -1, 0, or +1.
    #[inline]
    pub fn sign(&self) -> i8 {
        match self.0.cmp0() {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}

impl From<f64> for ExactScalar {
    fn from(v: f64) -> Self {
        // Inputs are validated finite at the API boundary; a non-finite
        // value reaching a predicate is an internal invariant violation.
        ExactScalar(Rational::from_f64(v).expect("non-finite input to exact predicate"))
    }
}

impl Add for ExactScalar {
    type Output = ExactScalar;
    fn add(self, rhs: ExactScalar) -> ExactScalar {
        let mut result = self.0;
        result += &rhs.0;
        ExactScalar(result)
    }
}

impl Sub for ExactScalar {
    type Output = ExactScalar;
    fn sub(self, rhs: ExactScalar) -> ExactScalar {
        let mut result = self.0;
        result -= &rhs.0;
        ExactScalar(result)
    }
}

impl Mul for ExactScalar {
    type Output = ExactScalar;
    fn mul(self, rhs: ExactScalar) -> ExactScalar {
        let mut result = self.0;
        result *= &rhs.0;
        ExactScalar(result)
    }
}

impl Neg for ExactScalar {
    type Output = ExactScalar;
    fn neg(self) -> ExactScalar {
        ExactScalar(-self.0)
    }
}

impl Zero for ExactScalar {
    fn zero() -> Self {
        ExactScalar(Rational::new())
    }

    fn is_zero(&self) -> bool {
        self.0.cmp0() == Ordering::Equal
    }
}
