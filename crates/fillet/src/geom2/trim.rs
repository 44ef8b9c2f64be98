use super::types::{Point, Polyline};

/// Move the endpoint of `line` nearer to `p` onto `p`; interior points are kept.
///
/// Ties go to the last point. Trimming twice at the same point is a no-op the
/// second time.
pub fn trim_to_point(line: &Polyline, p: Point) -> Polyline {
    let mut pts = line.points().to_vec();
    let d_first = (line.first() - p).norm();
    let d_last = (line.last() - p).norm();
    if d_first < d_last {
        pts[0] = p;
    } else {
        let n = pts.len();
        pts[n - 1] = p;
    }
    Polyline::from_points_unchecked(pts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn trims_nearer_end_only() {
        let l =
            Polyline::new(vec![vector![0.0, 0.0], vector![5.0, 1.0], vector![10.0, 0.0]]).unwrap();
        let t = trim_to_point(&l, vector![8.0, 0.0]);
        assert_eq!(
            t.points(),
            &[vector![0.0, 0.0], vector![5.0, 1.0], vector![8.0, 0.0]]
        );
        let s = trim_to_point(&l, vector![1.0, 0.0]);
        assert_eq!(s.points()[0], vector![1.0, 0.0]);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn equidistant_trim_replaces_last() {
        let l = Polyline::new(vec![vector![-1.0, 0.0], vector![1.0, 0.0]]).unwrap();
        let t = trim_to_point(&l, vector![0.0, 2.0]);
        assert_eq!(t.first(), vector![-1.0, 0.0]);
        assert_eq!(t.last(), vector![0.0, 2.0]);
    }
}
