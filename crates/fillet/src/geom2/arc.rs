//! Tangent points, center, and arc sampling for a corner of two lines.
//!
//! With unit directions `u1`, `u2` leaving the corner along each line and the
//! angle `θ` between them:
//! - tangent length `t = r / tan(θ/2)`, tangent points `corner + u_i t`;
//! - center on the bisector `u1 + u2` at distance `r / sin(θ/2)`.
//!
//! The arc always takes the non-reflex way round (sweep ≤ π).

use nalgebra::Vector2;

use super::types::{FilletError, FilletResult, GeomCfg, Point, Polyline};
use super::util::{angle_of, coincidence_tol, unit_towards, wrap_angle};

/// Unit direction leaving `corner` along `line`, taken at the end nearer the corner.
///
/// When that end sits on the corner, the next vertex inward that does not is used.
pub(crate) fn end_direction(
    line: &Polyline,
    corner: Point,
    tol: f64,
) -> Result<Vector2<f64>, FilletError> {
    let from_first = (line.first() - corner).norm() < (line.last() - corner).norm();
    let pts = line.points();
    let found = if from_first {
        pts.iter().find_map(|p| unit_towards(corner, *p, tol))
    } else {
        pts.iter().rev().find_map(|p| unit_towards(corner, *p, tol))
    };
    found.ok_or(FilletError::DegenerateGeometry { points: 1 })
}

/// Sample `segments + 1` points on the circle `(center, radius)` from `from` to `to`,
/// sweeping the short way. Endpoints are emitted exactly.
pub fn sample_arc(
    center: Point,
    from: Point,
    to: Point,
    radius: f64,
    segments: usize,
) -> Vec<Point> {
    let n = segments.max(1);
    let a0 = angle_of(from - center);
    let sweep = wrap_angle(angle_of(to - center) - a0);
    let mut arc: Vec<Point> = (0..=n)
        .map(|i| {
            let a = a0 + sweep * (i as f64) / (n as f64);
            center + Vector2::new(a.cos(), a.sin()) * radius
        })
        .collect();
    arc[0] = from;
    arc[n] = to;
    arc
}

/// Fillet of radius `radius` at `corner` between `l1` and `l2`.
pub fn solve(
    l1: &Polyline,
    l2: &Polyline,
    corner: Point,
    radius: f64,
    cfg: &GeomCfg,
) -> Result<FilletResult, FilletError> {
    let tol = coincidence_tol(corner, cfg.eps_len);
    let u1 = end_direction(l1, corner, tol)?;
    let u2 = end_direction(l2, corner, tol)?;

    let dot = u1.dot(&u2);
    if (dot.abs() - 1.0).abs() < cfg.eps_angle {
        tracing::debug!(dot, "corner angle is 0 or π");
        return Err(FilletError::DegenerateAngle);
    }
    let angle = dot.clamp(-1.0, 1.0).acos();
    if angle == 0.0 {
        return Err(FilletError::DegenerateAngle);
    }
    let half = 0.5 * angle;

    let tan_len = radius / half.tan();
    let tp1 = corner + u1 * tan_len;
    let tp2 = corner + u2 * tan_len;

    let bisector = angle_of(u1 + u2);
    let center_dist = radius / half.sin();
    let center = corner + Vector2::new(bisector.cos(), bisector.sin()) * center_dist;

    let arc = sample_arc(center, tp1, tp2, radius, cfg.arc_segments);
    Ok(FilletResult {
        arc,
        tp1,
        tp2,
        center,
        radius,
        corner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::angular_span;
    use nalgebra::vector;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn end_direction_points_toward_nearer_end() {
        let l = Polyline::new(vec![vector![10.0, 0.0], vector![2.0, 0.0]]).unwrap();
        let u = end_direction(&l, vector![0.0, 0.0], 1e-12).unwrap();
        assert!((u - vector![1.0, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn end_direction_skips_vertex_on_corner() {
        let l =
            Polyline::new(vec![vector![0.0, 0.0], vector![0.0, 3.0], vector![5.0, 9.0]]).unwrap();
        let u = end_direction(&l, vector![0.0, 0.0], 1e-12).unwrap();
        assert!((u - vector![0.0, 1.0]).norm() < 1e-12);
    }

    #[test]
    fn quarter_arc_sweeps_short_way() {
        let c = vector![0.0, 0.0];
        let arc = sample_arc(c, vector![1.0, 0.0], vector![0.0, 1.0], 1.0, 20);
        assert_eq!(arc.len(), 21);
        assert!((angular_span(&arc, c) - FRAC_PI_2).abs() < 1e-12);
        // Clockwise request still takes the short way.
        let back = sample_arc(c, vector![0.0, 1.0], vector![1.0, 0.0], 1.0, 20);
        assert!((angular_span(&back, c) - FRAC_PI_2).abs() < 1e-12);
        assert!(back.iter().all(|p| p.x >= -1e-12 && p.y >= -1e-12));
    }

    #[test]
    fn arc_across_the_branch_cut() {
        // From 170° to -170°: short way is 20° through π, not 340°.
        let c = vector![0.0, 0.0];
        let a = 170f64.to_radians();
        let arc = sample_arc(
            c,
            vector![a.cos(), a.sin()],
            vector![a.cos(), -a.sin()],
            1.0,
            8,
        );
        assert!((angular_span(&arc, c) - 20f64.to_radians()).abs() < 1e-12);
        assert!(arc.iter().all(|p| p.x < 0.0));
        assert!(angular_span(&arc, c) < PI);
    }

    #[test]
    fn zero_segments_still_emits_endpoints() {
        let c = vector![0.0, 0.0];
        let arc = sample_arc(c, vector![1.0, 0.0], vector![0.0, 1.0], 1.0, 0);
        assert_eq!(arc.len(), 2);
    }
}
