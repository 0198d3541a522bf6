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

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sdot::{
    first_moment, lloyd, second_moment, Error, LinearDensity, Point2, TriMesh,
};

fn single_triangle() -> TriMesh {
    TriMesh::new(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap()
}

fn unit_square() -> TriMesh {
    TriMesh::new(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
    .unwrap()
}

#[test]
fn single_site_on_a_triangle() {
    // One site at the centroid, density 1: the whole triangle is its cell.
    let mesh = single_triangle();
    let densities = vec![LinearDensity::constant(1.0)];
    let x = vec![Point2::new(1.0 / 3.0, 1.0 / 3.0)];
    let step = lloyd(&mesh, &densities, &x, &[0.0]).unwrap();
    assert_relative_eq!(step.mass[0], 0.5, max_relative = 1e-9);
    assert_relative_eq!(step.centroid[0][0], 1.0 / 3.0, max_relative = 1e-9);
    assert_relative_eq!(step.centroid[0][1], 1.0 / 3.0, max_relative = 1e-9);
}

#[test]
fn two_symmetric_sites_split_the_square() {
    let mesh = unit_square();
    let densities = vec![LinearDensity::constant(1.0); 2];
    let x = vec![Point2::new(0.25, 0.5), Point2::new(0.75, 0.5)];
    let step = lloyd(&mesh, &densities, &x, &[0.0, 0.0]).unwrap();
    assert_relative_eq!(step.mass[0], 0.5, max_relative = 1e-9);
    assert_relative_eq!(step.mass[1], 0.5, max_relative = 1e-9);
    assert_relative_eq!(step.centroid[0][0], 0.25, max_relative = 1e-9);
    assert_relative_eq!(step.centroid[0][1], 0.5, max_relative = 1e-9);
    assert_relative_eq!(step.centroid[1][0], 0.75, max_relative = 1e-9);
}

#[test]
fn weight_shifts_the_bisector() {
    // w = [0.04, 0] moves the cut to x = 0.5 + 0.04/(2*0.5) = 0.54.
    let mesh = unit_square();
    let densities = vec![LinearDensity::constant(1.0); 2];
    let x = vec![Point2::new(0.25, 0.5), Point2::new(0.75, 0.5)];
    let m = first_moment(&mesh, &densities, &x, &[0.04, 0.0]).unwrap();
    assert_relative_eq!(m.mass[0], 0.54, max_relative = 1e-9);
    assert_relative_eq!(m.mass[1], 0.46, max_relative = 1e-9);
}

#[test]
fn linear_density_on_a_triangle() {
    // Density x: mass = ∫x = 1/6, first_x = ∫x² = 1/12, centroid_x = 1/2.
    let mesh = single_triangle();
    let densities = vec![LinearDensity {
        a: 1.0,
        b: 0.0,
        c: 0.0,
    }];
    let x = vec![Point2::new(1.0 / 3.0, 1.0 / 3.0)];
    let m = first_moment(&mesh, &densities, &x, &[0.0]).unwrap();
    assert_relative_eq!(m.mass[0], 1.0 / 6.0, max_relative = 1e-9);
    assert_relative_eq!(m.first[0][0], 1.0 / 12.0, max_relative = 1e-9);
    let step = lloyd(&mesh, &densities, &x, &[0.0]).unwrap();
    assert_relative_eq!(step.centroid[0][0], 0.5, max_relative = 1e-9);
}

#[test]
fn corner_sites_take_quadrants() {
    let mesh = unit_square();
    let densities = vec![LinearDensity::constant(1.0); 2];
    let x = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ];
    let step = lloyd(&mesh, &densities, &x, &[0.0; 4]).unwrap();
    let expected = [
        [0.25, 0.25],
        [0.75, 0.25],
        [0.75, 0.75],
        [0.25, 0.75],
    ];
    for i in 0..4 {
        assert_relative_eq!(step.mass[i], 0.25, max_relative = 1e-9);
        assert_relative_eq!(step.centroid[i][0], expected[i][0], max_relative = 1e-9);
        assert_relative_eq!(step.centroid[i][1], expected[i][1], max_relative = 1e-9);
    }
}

#[test]
fn hexagon_sites_on_a_disk_mesh_share_equally() {
    // 12-gon fan mesh approximating the disk, six equal-weight sites on a
    // concentric hexagon: symmetry forces equal masses, and the symbolic
    // tie-breaking keeps the run deterministic.
    let mut vertices = vec![Point2::new(0.0, 0.0)];
    for k in 0..12 {
        let t = (k as f64) * std::f64::consts::PI / 6.0;
        vertices.push(Point2::new(t.cos(), t.sin()));
    }
    let mut faces = Vec::new();
    for k in 0..12 {
        faces.push([0, 1 + k, 1 + (k + 1) % 12]);
    }
    let mesh = TriMesh::new(vertices, faces).unwrap();
    let densities = vec![LinearDensity::constant(1.0); 12];
    let mut sites = Vec::new();
    for k in 0..6 {
        let t = (k as f64) * std::f64::consts::PI / 3.0;
        sites.push(Point2::new(0.5 * t.cos(), 0.5 * t.sin()));
    }
    let w = vec![0.0; 6];

    let m1 = first_moment(&mesh, &densities, &sites, &w).unwrap();
    for i in 1..6 {
        assert_relative_eq!(m1.mass[i], m1.mass[0], max_relative = 1e-9);
    }
    // Deterministic across runs: bit-identical accumulators.
    let m2 = first_moment(&mesh, &densities, &sites, &w).unwrap();
    for i in 0..6 {
        assert_eq!(m1.mass[i].to_bits(), m2.mass[i].to_bits());
        assert_eq!(m1.first[i][0].to_bits(), m2.first[i][0].to_bits());
    }
}

#[test]
fn masses_sum_to_the_density_integral() {
    // Partition of unity over random sites and weights.
    let mesh = TriMesh::unit_square_grid(4);
    let rho = LinearDensity {
        a: 1.0,
        b: 2.0,
        c: 0.5,
    };
    let densities = vec![rho; 32];
    // ∫ over the unit square: 1/2 + 2/2 + 1/2 = 2.
    let total = 2.0;
    let mut rng = StdRng::seed_from_u64(7);
    for trial in 0..5 {
        let n = 5 + 7 * trial;
        let x: Vec<Point2> = (0..n)
            .map(|_| Point2::new(rng.gen::<f64>(), rng.gen::<f64>()))
            .collect();
        let w: Vec<f64> = (0..n).map(|_| rng.gen::<f64>() * 0.01).collect();
        let m = first_moment(&mesh, &densities, &x, &w).unwrap();
        let sum: f64 = m.mass.iter().sum();
        assert_relative_eq!(sum, total, max_relative = 1e-9);
    }
}

#[test]
fn swapping_equal_sites_permutes_the_output() {
    let mesh = TriMesh::unit_square_grid(3);
    let rho = LinearDensity {
        a: 1.0,
        b: 0.0,
        c: 0.25,
    };
    let densities = vec![rho; 18];
    let a = Point2::new(0.3, 0.4);
    let b = Point2::new(0.7, 0.6);
    let c = Point2::new(0.5, 0.2);
    let m_abc = first_moment(&mesh, &densities, &[a, b, c], &[0.0; 3]).unwrap();
    let m_bac = first_moment(&mesh, &densities, &[b, a, c], &[0.0; 3]).unwrap();
    assert_relative_eq!(m_abc.mass[0], m_bac.mass[1], max_relative = 1e-9);
    assert_relative_eq!(m_abc.mass[1], m_bac.mass[0], max_relative = 1e-9);
    assert_relative_eq!(m_abc.mass[2], m_bac.mass[2], max_relative = 1e-9);
    assert_relative_eq!(m_abc.first[0][0], m_bac.first[1][0], max_relative = 1e-9);
    assert_relative_eq!(m_abc.first[0][1], m_bac.first[1][1], max_relative = 1e-9);
}

#[test]
fn lloyd_fixed_point_is_stable() {
    // Four sites at quadrant centers of the unit square are the centroids
    // of their own cells; one Lloyd step must return them unchanged.
    let mesh = TriMesh::unit_square_grid(4);
    let densities = vec![LinearDensity::constant(1.0); 32];
    let x = vec![
        Point2::new(0.25, 0.25),
        Point2::new(0.75, 0.25),
        Point2::new(0.25, 0.75),
        Point2::new(0.75, 0.75),
    ];
    let step = lloyd(&mesh, &densities, &x, &[0.0; 4]).unwrap();
    for i in 0..4 {
        assert_relative_eq!(step.centroid[i][0], x[i].x, max_relative = 1e-9);
        assert_relative_eq!(step.centroid[i][1], x[i].y, max_relative = 1e-9);
    }
}

#[test]
fn second_moments_of_the_reference_triangle() {
    let mesh = single_triangle();
    let densities = vec![LinearDensity::constant(1.0)];
    let x = vec![Point2::new(0.25, 0.25)];
    let m = second_moment(&mesh, &densities, &x, &[0.0]).unwrap();
    assert_relative_eq!(m.mass[0], 0.5, max_relative = 1e-9);
    assert_relative_eq!(m.inertia[0][0], 1.0 / 12.0, max_relative = 1e-9);
    assert_relative_eq!(m.inertia[0][1], 1.0 / 12.0, max_relative = 1e-9);
    assert_relative_eq!(m.inertia[0][2], 1.0 / 24.0, max_relative = 1e-9);
}

#[test]
fn hidden_site_fails_lloyd_but_not_moments() {
    // The duplicate site has an empty cell: moments report mass 0, the
    // Lloyd step refuses to divide by it.
    let mesh = unit_square();
    let densities = vec![LinearDensity::constant(1.0); 2];
    let x = vec![
        Point2::new(0.5, 0.5),
        Point2::new(0.5, 0.5),
        Point2::new(0.25, 0.25),
    ];
    let w = [0.0; 3];
    let m = first_moment(&mesh, &densities, &x, &w).unwrap();
    // The surviving sites split the square along x + y = 0.75.
    assert_relative_eq!(m.mass[0], 1.0 - 0.28125, max_relative = 1e-9);
    assert_eq!(m.mass[1], 0.0);
    assert_relative_eq!(m.mass[2], 0.28125, max_relative = 1e-9);
    assert_eq!(
        lloyd(&mesh, &densities, &x, &w),
        Err(Error::EmptyCell { site: 1 })
    );
}

#[test]
fn input_validation() {
    let mesh = unit_square();
    let densities = vec![LinearDensity::constant(1.0); 2];
    let x = vec![Point2::new(0.25, 0.5), Point2::new(0.75, 0.5)];

    assert_eq!(
        first_moment(&mesh, &densities, &x, &[0.0]),
        Err(Error::SiteCountMismatch {
            points: 2,
            weights: 1
        })
    );
    assert_eq!(
        first_moment(&mesh, &densities, &[], &[]),
        Err(Error::NoSites)
    );
    assert_eq!(
        first_moment(&mesh, &densities[..1], &x, &[0.0, 0.0]),
        Err(Error::DensityCountMismatch {
            densities: 1,
            faces: 2
        })
    );
    assert_eq!(
        first_moment(
            &mesh,
            &densities,
            &[Point2::new(f64::NAN, 0.0), Point2::new(0.5, 0.5)],
            &[0.0, 0.0]
        ),
        Err(Error::DegenerateSites)
    );
    let empty = TriMesh::new(Vec::new(), Vec::new()).unwrap();
    assert_eq!(
        first_moment(&empty, &[], &x, &[0.0, 0.0]),
        Err(Error::EmptyMesh)
    );
}
