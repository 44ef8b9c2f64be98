use std::f64::consts::PI;

use nalgebra::Vector2;

#[inline]
pub(crate) fn angle_of(v: Vector2<f64>) -> f64 {
    v.y.atan2(v.x)
}

/// z-component of `a × b`.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Wrap an angle into (-π, π].
#[inline]
pub(crate) fn wrap_angle(a: f64) -> f64 {
    let mut x = a;
    while x <= -PI {
        x += 2.0 * PI;
    }
    while x > PI {
        x -= 2.0 * PI;
    }
    x
}

/// Absolute coincidence tolerance around `p` for a relative `eps`.
#[inline]
pub(crate) fn coincidence_tol(p: Vector2<f64>, eps: f64) -> f64 {
    eps * (1.0 + p.amax())
}

/// Unit vector `a → b`, or None if the points coincide within `eps`.
#[inline]
pub(crate) fn unit_towards(a: Vector2<f64>, b: Vector2<f64>, eps: f64) -> Option<Vector2<f64>> {
    let d = b - a;
    let n = d.norm();
    if !n.is_finite() || n <= eps {
        return None;
    }
    Some(d / n)
}

/// Euclidean distance from `p` to the closed segment `[a, b]`.
pub fn distance_to_segment(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Total signed sweep of a sampled arc around `center`, in absolute value.
///
/// Consecutive samples are assumed to be less than π apart.
pub fn angular_span(arc: &[Vector2<f64>], center: Vector2<f64>) -> f64 {
    arc.windows(2)
        .map(|w| wrap_angle(angle_of(w[1] - center) - angle_of(w[0] - center)))
        .sum::<f64>()
        .abs()
}
