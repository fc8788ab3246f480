//! Planar polygon area and convex clipping.
//!
//! Gamut triangles are compared by intersecting them. The subject polygon is
//! clipped against each edge of a convex clip polygon in turn
//! (Sutherland-Hodgman), and the surviving polygon's area is taken with the
//! shoelace formula.
//!
//! ```rust
//! use hdrcal_math::{DVec2, clip_convex, polygon_area};
//!
//! let a = [DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0), DVec2::new(0.0, 2.0)];
//! let b = [DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0), DVec2::new(0.0, 1.0)];
//!
//! let inter = clip_convex(&a, &b);
//! assert!((polygon_area(&inter) - 1.0).abs() < 1e-12);
//! ```

use glam::DVec2;

/// Areas below this are treated as zero.
pub const AREA_EPSILON: f64 = 1e-15;

/// Zero-area threshold for u'v' gamut triangles.
pub const AREA_EPSILON_UV: f64 = 1e-9;

/// Signed shoelace area: positive for counter-clockwise winding.
pub fn signed_area(points: &[DVec2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum();
    twice * 0.5
}

/// Unsigned shoelace area.
#[inline]
pub fn polygon_area(points: &[DVec2]) -> f64 {
    signed_area(points).abs()
}

/// Clips `subject` against the convex polygon `clip`.
///
/// Either winding is accepted for `clip`. Returns an empty polygon when the
/// two do not overlap or `clip` has no area.
pub fn clip_convex(subject: &[DVec2], clip: &[DVec2]) -> Vec<DVec2> {
    let orientation = signed_area(clip);
    if orientation.abs() < AREA_EPSILON || subject.len() < 3 {
        return Vec::new();
    }
    let sign = orientation.signum();

    let mut output: Vec<DVec2> = subject.to_vec();
    let n = clip.len();
    for i in 0..n {
        if output.is_empty() {
            break;
        }
        let a = clip[i];
        let b = clip[(i + 1) % n];
        let edge = b - a;
        let inside = |p: DVec2| sign * edge.perp_dot(p - a) >= 0.0;

        let input = std::mem::take(&mut output);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            match (inside(prev), inside(cur)) {
                (true, true) => output.push(cur),
                (true, false) => output.push(intersect(prev, cur, a, edge)),
                (false, true) => {
                    output.push(intersect(prev, cur, a, edge));
                    output.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
    }
    output
}

// Point where segment s->e crosses the infinite line through `a` along `edge`.
fn intersect(s: DVec2, e: DVec2, a: DVec2, edge: DVec2) -> DVec2 {
    let d = e - s;
    let denom = edge.perp_dot(d);
    if denom.abs() < f64::EPSILON {
        return s;
    }
    let t = edge.perp_dot(a - s) / denom;
    s + d * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tri(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> [DVec2; 3] {
        [DVec2::new(a.0, a.1), DVec2::new(b.0, b.1), DVec2::new(c.0, c.1)]
    }

    #[test]
    fn test_area_winding() {
        let ccw = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let cw = tri((0.0, 0.0), (0.0, 1.0), (1.0, 0.0));
        assert_abs_diff_eq!(signed_area(&ccw), 0.5);
        assert_abs_diff_eq!(signed_area(&cw), -0.5);
        assert_abs_diff_eq!(polygon_area(&cw), 0.5);
    }

    #[test]
    fn test_area_too_few_points() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[DVec2::ZERO, DVec2::ONE]), 0.0);
    }

    #[test]
    fn test_clip_self() {
        let t = tri((0.1, 0.1), (0.9, 0.2), (0.3, 0.8));
        let inter = clip_convex(&t, &t);
        assert_abs_diff_eq!(polygon_area(&inter), polygon_area(&t), epsilon = 1e-12);
    }

    #[test]
    fn test_clip_contained() {
        let big = tri((0.0, 0.0), (10.0, 0.0), (0.0, 10.0));
        let small = tri((1.0, 1.0), (2.0, 1.0), (1.0, 2.0));
        let inter = clip_convex(&small, &big);
        assert_abs_diff_eq!(polygon_area(&inter), 0.5, epsilon = 1e-12);
        let inter = clip_convex(&big, &small);
        assert_abs_diff_eq!(polygon_area(&inter), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_clip_disjoint() {
        let a = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let b = tri((5.0, 5.0), (6.0, 5.0), (5.0, 6.0));
        assert_eq!(polygon_area(&clip_convex(&a, &b)), 0.0);
    }

    #[test]
    fn test_clip_shared_edge_only() {
        let a = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let b = tri((1.0, 0.0), (0.0, 1.0), (1.0, 1.0));
        assert_abs_diff_eq!(polygon_area(&clip_convex(&a, &b)), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clip_clockwise_clip_polygon() {
        let subject = tri((0.0, 0.0), (2.0, 0.0), (0.0, 2.0));
        let square_cw = [
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
        ];
        assert_abs_diff_eq!(
            polygon_area(&clip_convex(&subject, &square_cw)),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_clip_degenerate_clip() {
        let subject = tri((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));
        let line = tri((0.0, 0.0), (1.0, 1.0), (2.0, 2.0));
        assert!(clip_convex(&subject, &line).is_empty());
    }
}
