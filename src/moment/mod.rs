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

//! Moment integration of a piecewise-linear density over power cells,
//! and the Lloyd step it drives.
//!
//! Each public entry point builds the regular triangulation of the
//! weighted sites, runs the intersection traversal and accumulates the
//! requested polynomial moments per site.

pub mod quadrature;

use crate::density::LinearDensity;
use crate::error::Error;
use crate::geometry::Point2;
use crate::intersection::intersect_cells;
use crate::triangulation::{BackgroundMesh, RegularTriangulation};

pub use quadrature::integrate_fan;

/// Per-site mass and raw (unnormalized) first moments.
#[derive(Clone, Debug, PartialEq)]
pub struct Moments {
    pub mass: Vec<f64>,
    pub first: Vec<[f64; 2]>,
}

/// [`Moments`] plus the three second-moment columns (xx, yy, xy).
#[derive(Clone, Debug, PartialEq)]
pub struct SecondMoments {
    pub mass: Vec<f64>,
    pub first: Vec<[f64; 2]>,
    pub inertia: Vec<[f64; 3]>,
}

/// One Lloyd relaxation step: masses and power-cell centroids.
#[derive(Clone, Debug, PartialEq)]
pub struct LloydStep {
    pub mass: Vec<f64>,
    pub centroid: Vec<[f64; 2]>,
}

fn validate<M: BackgroundMesh>(
    mesh: &M,
    densities: &[LinearDensity],
    points: &[Point2],
    weights: &[f64],
) -> Result<RegularTriangulation, Error> {
    if mesh.num_faces() == 0 {
        return Err(Error::EmptyMesh);
    }
    if densities.len() != mesh.num_faces() {
        return Err(Error::DensityCountMismatch {
            densities: densities.len(),
            faces: mesh.num_faces(),
        });
    }
    RegularTriangulation::new(points, weights)
}

fn check_masses(mass: &[f64]) -> Result<(), Error> {
    for (site, &m) in mass.iter().enumerate() {
        if !m.is_finite() {
            return Err(Error::NonFiniteMass { site });
        }
    }
    Ok(())
}

/// Mass and first moment of `densities` over every site's power cell.
///
/// Sites whose cell misses the mesh report zeros; dividing is left to
/// [`lloyd`].
pub fn first_moment<M: BackgroundMesh>(
    mesh: &M,
    densities: &[LinearDensity],
    points: &[Point2],
    weights: &[f64],
) -> Result<Moments, Error> {
    let rt = validate(mesh, densities, points, weights)?;
    let mut mass = vec![0.0; points.len()];
    let mut first = vec![[0.0; 2]; points.len()];
    intersect_cells(mesh, &rt, |poly, f, v| {
        let rho = &densities[f];
        let m = integrate_fan(poly, |q| {
            let d = rho.eval(q);
            [d, d * q.x, d * q.y]
        });
        mass[v] += m[0];
        first[v][0] += m[1];
        first[v][1] += m[2];
        Ok(())
    })?;
    check_masses(&mass)?;
    Ok(Moments { mass, first })
}

/// First and second moments; inertia columns are (xx, yy, xy).
pub fn second_moment<M: BackgroundMesh>(
    mesh: &M,
    densities: &[LinearDensity],
    points: &[Point2],
    weights: &[f64],
) -> Result<SecondMoments, Error> {
    let rt = validate(mesh, densities, points, weights)?;
    let mut mass = vec![0.0; points.len()];
    let mut first = vec![[0.0; 2]; points.len()];
    let mut inertia = vec![[0.0; 3]; points.len()];
    intersect_cells(mesh, &rt, |poly, f, v| {
        let rho = &densities[f];
        let m = integrate_fan(poly, |q| {
            let d = rho.eval(q);
            [
                d,
                d * q.x,
                d * q.y,
                d * q.x * q.x,
                d * q.y * q.y,
                d * q.x * q.y,
            ]
        });
        mass[v] += m[0];
        first[v][0] += m[1];
        first[v][1] += m[2];
        inertia[v][0] += m[3];
        inertia[v][1] += m[4];
        inertia[v][2] += m[5];
        Ok(())
    })?;
    check_masses(&mass)?;
    Ok(SecondMoments {
        mass,
        first,
        inertia,
    })
}

/// One Lloyd step: first moments rescaled into power-cell centroids.
///
/// A site with zero mass has no centroid; that is reported as
/// [`Error::EmptyCell`] so the caller can perturb or drop the site.
pub fn lloyd<M: BackgroundMesh>(
    mesh: &M,
    densities: &[LinearDensity],
    points: &[Point2],
    weights: &[f64],
) -> Result<LloydStep, Error> {
    let moments = first_moment(mesh, densities, points, weights)?;
    let mut centroid = Vec::with_capacity(points.len());
    for (site, (&m, f)) in moments.mass.iter().zip(&moments.first).enumerate() {
        if m == 0.0 {
            return Err(Error::EmptyCell { site });
        }
        centroid.push([f[0] / m, f[1] / m]);
    }
    Ok(LloydStep {
        mass: moments.mass,
        centroid,
    })
}
