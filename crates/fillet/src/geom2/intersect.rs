//! Corner location for two lines.
//!
//! Two phases:
//! 1. A real crossing of the lines as drawn (segment against segment).
//! 2. Otherwise the crossing of the infinite lines through each line's first and
//!    last point (closed form, relative to the first point).
//!
//! Phase 2 is what makes "almost touching" selections work: users rarely draw the
//! two lines so they meet exactly. No distance cap is put on the phase-2 point.

use super::types::{FilletError, GeomCfg, Point, Polyline};
use super::util::cross;

/// Crossing of the closed segments `[p1, p2]` and `[p3, p4]`.
///
/// Parallel (including colinear overlapping) segments yield None.
pub fn segment_intersection(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
    eps: f64,
) -> Option<Point> {
    let r = p2 - p1;
    let s = p4 - p3;
    let rxs = cross(r, s);
    let scale = r.norm() * s.norm();
    if scale == 0.0 || rxs.abs() <= eps * scale {
        return None;
    }
    let qp = p3 - p1;
    let t = cross(qp, s) / rxs;
    let u = cross(qp, r) / rxs;
    // Small slack so endpoint-on-endpoint touches count as crossings.
    let slack = 1e-12;
    if !((-slack..=1.0 + slack).contains(&t) && (-slack..=1.0 + slack).contains(&u)) {
        return None;
    }
    // Touches at a vertex return that vertex exactly.
    let p = if t.abs() <= slack {
        p1
    } else if (t - 1.0).abs() <= slack {
        p2
    } else if u.abs() <= slack {
        p3
    } else if (u - 1.0).abs() <= slack {
        p4
    } else {
        p1 + r * t
    };
    Some(p)
}

/// Crossing of the infinite lines through `(p1, p2)` and `(p3, p4)`.
///
/// Solved in coordinates relative to `p1`, so map-sized coordinates do not
/// cancel. Returns None when the determinant vanishes relative to the chord
/// lengths.
pub fn extended_intersection(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
    eps: f64,
) -> Option<Point> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = cross(d1, d2);
    let scale = d1.norm() * d2.norm();
    if denom == 0.0 || denom.abs() <= eps * scale {
        return None;
    }
    let t = cross(p3 - p1, d2) / denom;
    let p = p1 + d1 * t;
    if p.x.is_finite() && p.y.is_finite() {
        Some(p)
    } else {
        None
    }
}

/// First real crossing between the two polylines, scanning line 1 from its start.
fn first_crossing(l1: &Polyline, l2: &Polyline, eps: f64) -> Option<Point> {
    l1.segments().find_map(|(a, b)| {
        l2.segments()
            .find_map(|(c, d)| segment_intersection(a, b, c, d, eps))
    })
}

/// Corner point of two lines: real crossing first, extended chords second.
pub fn corner(l1: &Polyline, l2: &Polyline, cfg: &GeomCfg) -> Result<Point, FilletError> {
    if let Some(p) = first_crossing(l1, l2, cfg.eps_det) {
        return Ok(p);
    }
    tracing::debug!("no drawn crossing; intersecting extended chords");
    extended_intersection(l1.first(), l1.last(), l2.first(), l2.last(), cfg.eps_det)
        .ok_or(FilletError::NoIntersection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn crossing_segments_meet_in_the_middle() {
        let p = segment_intersection(
            vector![-1.0, 0.0],
            vector![1.0, 0.0],
            vector![0.0, -1.0],
            vector![0.0, 1.0],
            1e-12,
        )
        .expect("crossing");
        assert!(p.norm() < 1e-12);
    }

    #[test]
    fn disjoint_segments_do_not_cross() {
        assert!(segment_intersection(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![2.0, -1.0],
            vector![2.0, 1.0],
            1e-12,
        )
        .is_none());
    }

    #[test]
    fn shared_endpoint_counts_as_crossing() {
        let p = segment_intersection(
            vector![0.0, 0.0],
            vector![3.0, 0.0],
            vector![3.0, 0.0],
            vector![3.0, 4.0],
            1e-12,
        )
        .expect("touch");
        assert!((p - vector![3.0, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn extended_lines_cross_outside_both_segments() {
        let p = extended_intersection(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![5.0, 2.0],
            vector![5.0, 7.0],
            1e-12,
        )
        .expect("lines cross");
        assert!((p - vector![5.0, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn extended_crossing_at_map_coordinates() {
        let c = vector![512345.25, 4512345.75];
        let (a1, a2) = (0.7f64, 2.1f64);
        let u1 = vector![a1.cos(), a1.sin()];
        let u2 = vector![a2.cos(), a2.sin()];
        let p = extended_intersection(
            c + u1 * 3.0,
            c + u1 * 100.0,
            c + u2 * 2.0,
            c + u2 * 80.0,
            1e-12,
        )
        .expect("lines cross");
        assert!((p - c).norm() < 1e-7, "corner off by {}", (p - c).norm());
    }

    #[test]
    fn parallel_extended_lines_have_no_crossing() {
        assert!(extended_intersection(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![0.0, 1.0],
            vector![4.0, 1.0],
            1e-12,
        )
        .is_none());
    }

    #[test]
    fn corner_prefers_real_crossing() {
        let l1 = Polyline::new(vec![vector![-2.0, 1.0], vector![4.0, 1.0]]).unwrap();
        let l2 = Polyline::new(vec![vector![1.0, -3.0], vector![1.0, 5.0]]).unwrap();
        let p = corner(&l1, &l2, &GeomCfg::default()).unwrap();
        assert!((p - vector![1.0, 1.0]).norm() < 1e-12);
    }

    #[test]
    fn corner_on_multi_segment_line() {
        // Second segment of l1 is crossed by l2.
        let l1 = Polyline::new(vec![
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 4.0],
        ])
        .unwrap();
        let l2 = Polyline::new(vec![vector![0.0, 3.0], vector![5.0, 3.0]]).unwrap();
        let p = corner(&l1, &l2, &GeomCfg::default()).unwrap();
        assert!((p - vector![2.0, 3.0]).norm() < 1e-12);
    }
}
