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

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("background mesh has no finite faces")]
    EmptyMesh,

    #[error("invalid background mesh: {reason}")]
    InvalidMesh { reason: &'static str },

    #[error("face {face} of the background mesh is degenerate")]
    DegenerateFace { face: usize },

    #[error("no sites supplied")]
    NoSites,

    #[error("{points} site positions but {weights} weights")]
    SiteCountMismatch { points: usize, weights: usize },

    #[error("site input is degenerate (non-finite values or all positions collocated)")]
    DegenerateSites,

    #[error("{densities} densities supplied for {faces} mesh faces")]
    DensityCountMismatch { densities: usize, faces: usize },

    #[error("{values} vertex samples for {vertices} mesh vertices")]
    ValueCountMismatch { values: usize, vertices: usize },

    #[error("site {site} has an empty power cell")]
    EmptyCell { site: usize },

    #[error("accumulated mass of site {site} is not finite")]
    NonFiniteMass { site: usize },

    #[error("traversal aborted by caller")]
    Aborted,
}
