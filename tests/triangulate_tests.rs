// Host-side tests for polygon triangulation and torus geometry.

#![allow(dead_code)]
mod geometry {
    include!("../src/core/geometry.rs");
}
mod triangulate {
    include!("../src/core/triangulate.rs");
}

use geometry::Geometry;
use glam::{Vec2, Vec3};
use triangulate::*;

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn covered_area(points: &[Vec2], tris: &[[u32; 3]]) -> f32 {
    tris.iter()
        .map(|[a, b, c]| {
            let (a, b, c) = (points[*a as usize], points[*b as usize], points[*c as usize]);
            (b - a).perp_dot(c - a) * 0.5
        })
        .sum()
}

fn all_ccw(points: &[Vec2], tris: &[[u32; 3]]) -> bool {
    tris.iter().all(|[a, b, c]| {
        let (a, b, c) = (points[*a as usize], points[*b as usize], points[*c as usize]);
        (b - a).perp_dot(c - a) > 0.0
    })
}

#[test]
fn convex_square() {
    let square = vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)];
    let tris = triangulate(&square, &[]);
    assert_eq!(tris.len(), 2);
    assert!((covered_area(&square, &tris) - 1.0).abs() < 1e-6);
    assert!(all_ccw(&square, &tris));
}

#[test]
fn clockwise_outer_is_rewound() {
    let square = vec![v(0.0, 0.0), v(0.0, 1.0), v(1.0, 1.0), v(1.0, 0.0)];
    assert!(is_clockwise(&square));
    let tris = triangulate(&square, &[]);
    assert!((covered_area(&square, &tris) - 1.0).abs() < 1e-6);
    assert!(all_ccw(&square, &tris));
}

#[test]
fn concave_l_shape() {
    let l = vec![
        v(0.0, 0.0),
        v(2.0, 0.0),
        v(2.0, 1.0),
        v(1.0, 1.0),
        v(1.0, 2.0),
        v(0.0, 2.0),
    ];
    assert!((signed_area(&l) - 3.0).abs() < 1e-6);
    let tris = triangulate(&l, &[]);
    assert_eq!(tris.len(), 4);
    assert!((covered_area(&l, &tris) - 3.0).abs() < 1e-5);
    assert!(all_ccw(&l, &tris));
}

#[test]
fn square_with_hole() {
    let outer = vec![v(0.0, 0.0), v(4.0, 0.0), v(4.0, 4.0), v(0.0, 4.0)];
    let hole = vec![v(1.0, 1.0), v(1.0, 3.0), v(3.0, 3.0), v(3.0, 1.0)];
    let tris = triangulate(&outer, &[hole.clone()]);
    let mut points = outer.clone();
    points.extend_from_slice(&hole);
    assert!((covered_area(&points, &tris) - 12.0).abs() < 1e-4);
    assert!(all_ccw(&points, &tris));
    // nothing covers the hole's centre
    let centre = v(2.0, 2.0);
    for [a, b, c] in &tris {
        let tri = [points[*a as usize], points[*b as usize], points[*c as usize]];
        assert!(!contains_point(&tri, centre));
    }
}

#[test]
fn two_holes() {
    let outer = vec![v(0.0, 0.0), v(6.0, 0.0), v(6.0, 3.0), v(0.0, 3.0)];
    let h1 = vec![v(1.0, 1.0), v(1.0, 2.0), v(2.0, 2.0), v(2.0, 1.0)];
    let h2 = vec![v(4.0, 1.0), v(4.0, 2.0), v(5.0, 2.0), v(5.0, 1.0)];
    let tris = triangulate(&outer, &[h1.clone(), h2.clone()]);
    let mut points = outer.clone();
    points.extend_from_slice(&h1);
    points.extend_from_slice(&h2);
    assert!((covered_area(&points, &tris) - 16.0).abs() < 1e-4);
}

#[test]
fn degenerate_input_yields_nothing() {
    assert!(triangulate(&[v(0.0, 0.0), v(1.0, 0.0)], &[]).is_empty());
    let square = vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)];
    // holes with fewer than three points are ignored
    let tris = triangulate(&square, &[vec![v(0.5, 0.5)]]);
    assert_eq!(tris.len(), 2);
}

#[test]
fn torus_counts_and_indices() {
    let g = Geometry::torus(0.3, 0.2, 20, 45);
    assert_eq!(g.vertex_count(), 21 * 46);
    assert_eq!(g.indices.len(), 20 * 45 * 6);
    assert_eq!(g.triangle_count(), 20 * 45 * 2);
    let n = g.vertex_count() as u32;
    assert!(g.indices.iter().all(|&i| i < n));
}

#[test]
fn torus_surface_shape() {
    let g = Geometry::torus(0.3, 0.2, 20, 45);
    for (p, nrm) in g.positions.iter().zip(&g.normals) {
        assert!((nrm.length() - 1.0).abs() < 1e-4);
        let ring = Vec3::new(p.x, p.y, 0.0).normalize_or_zero() * 0.3;
        assert!(((*p - ring).length() - 0.2).abs() < 1e-4);
    }
    let bb = g.bounding_box().expect("finite bounds");
    assert!((bb.max.x - 0.5).abs() < 1e-4);
    assert!((bb.max.z - 0.2).abs() < 1e-3);
}

#[test]
fn centring_moves_bounds_to_origin() {
    let mut g = Geometry::new();
    g.push_flat_triangle(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 1.0, 1.0), Vec3::new(1.0, 5.0, 2.0));
    let offset = g.center().expect("finite bounds");
    assert_eq!(offset, Vec3::new(-2.0, -3.0, -1.5));
    let bb = g.bounding_box().expect("finite bounds");
    assert!(bb.center().length() < 1e-6);
}
