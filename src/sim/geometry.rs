//! Planar geometry helpers
//!
//! Pure functions over `Vec2`: projection, segment side test, line-line
//! intersection, triangle sampling and polygon area. No state.

use glam::Vec2;
use rand::Rng;

use crate::consts::PARALLEL_EPSILON;
use crate::error::{Result, SimError};

/// Where a point lies relative to a segment `a -> b`, measured along it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSide {
    /// Behind `a` (or exactly on `a`)
    Before,
    /// Within the span of the segment
    Within,
    /// Past `b`
    Beyond,
}

impl SegmentSide {
    /// -1 / 0 / +1 encoding
    pub fn signum(self) -> i32 {
        match self {
            SegmentSide::Before => -1,
            SegmentSide::Within => 0,
            SegmentSide::Beyond => 1,
        }
    }
}

/// Orthogonal projection of `p` onto the infinite line through `origin`
/// with unit direction `dir`
#[inline]
pub fn project_point_on_line(origin: Vec2, dir: Vec2, p: Vec2) -> Vec2 {
    origin + dir * (p - origin).dot(dir)
}

/// Classify `p` against segment `a -> b`.
///
/// `p` is expected to lie on the segment's line; only its position along
/// the line is tested.
pub fn side_of_segment(a: Vec2, b: Vec2, p: Vec2) -> SegmentSide {
    let seg = b - a;
    let to_p = p - a;
    if to_p.dot(seg) > 0.0 {
        if to_p.length() <= seg.length() {
            SegmentSide::Within
        } else {
            SegmentSide::Beyond
        }
    } else {
        SegmentSide::Before
    }
}

/// Projection of `p` onto segment `a -> b`, clamped to the endpoints
pub fn project_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let projected = project_point_on_line(a, (b - a).normalize_or_zero(), p);
    match side_of_segment(a, b, projected) {
        SegmentSide::Within => projected,
        SegmentSide::Before => a,
        SegmentSide::Beyond => b,
    }
}

/// Intersect the lines `p1 + t*d1` and `p2 + u*d2`.
///
/// Returns [`SimError::ParallelLines`] when the directions are (nearly)
/// parallel or degenerate.
pub fn line_line_intersection(p1: Vec2, d1: Vec2, p2: Vec2, d2: Vec2) -> Result<Vec2> {
    let cross = d1.perp_dot(d2);
    if !(cross.abs() >= PARALLEL_EPSILON) {
        return Err(SimError::ParallelLines);
    }
    let t = (p2 - p1).perp_dot(d2) / cross;
    Ok(p1 + d1 * t)
}

/// Uniform random point inside triangle `abc`
pub fn random_point_in_triangle<R: Rng + ?Sized>(rng: &mut R, a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    let mut u: f32 = rng.random();
    let mut v: f32 = rng.random();
    // Fold the far half of the parallelogram back into the triangle
    if u + v > 1.0 {
        u = 1.0 - u;
        v = 1.0 - v;
    }
    a + (b - a) * u + (c - a) * v
}

/// Unsigned polygon area (shoelace). Zero for fewer than 3 points.
pub fn polygon_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].perp_dot(points[j]);
    }
    (sum * 0.5).abs()
}
