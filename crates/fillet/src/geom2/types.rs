//! Basic types and tolerances for the fillet engine.
//!
//! - `GeomCfg`: centralizes epsilons and the arc resolution.
//! - `LineGeometry`: raw host geometry (single or multi-part).
//! - `Polyline`: one ordered point chain, ≥2 finite points.
//! - `FilletResult`: sampled arc plus the tangent points it joins.
//! - `FilletError`: the three ways a fillet can be impossible.

use std::fmt;

use nalgebra::Vector2;

use super::util::coincidence_tol;

/// Planar point in map units.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances and sampling).
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Relative threshold on the 2×2 determinant below which lines count as parallel.
    pub eps_det: f64,
    /// Threshold on `||u1·u2| - 1|` below which the corner angle counts as 0 or π.
    pub eps_angle: f64,
    /// Points closer than `eps_len * (1 + |p|∞)` are treated as coincident.
    pub eps_len: f64,
    /// Number of arc segments (points emitted = segments + 1).
    pub arc_segments: usize,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_det: 1e-12,
            eps_angle: 1e-6,
            eps_len: 1e-12,
            arc_segments: 20,
        }
    }
}

/// Raw line geometry as handed over by a host.
#[derive(Clone, Debug, PartialEq)]
pub enum LineGeometry {
    Single(Vec<Point>),
    Multi(Vec<Vec<Point>>),
}

impl LineGeometry {
    /// First part (or the single part), if any.
    pub fn first_part(&self) -> Option<&[Point]> {
        match self {
            LineGeometry::Single(pts) => Some(pts.as_slice()),
            LineGeometry::Multi(parts) => parts.first().map(Vec::as_slice),
        }
    }
}

impl From<Polyline> for LineGeometry {
    fn from(line: Polyline) -> Self {
        LineGeometry::Single(line.into_points())
    }
}

/// Ordered point chain of one line.
///
/// Invariants:
/// - At least two points.
/// - All coordinates finite.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pts: Vec<Point>,
}

impl Polyline {
    /// Build from points; fails with `DegenerateGeometry` on <2 points or non-finite input.
    pub fn new(pts: Vec<Point>) -> Result<Self, FilletError> {
        if pts.len() < 2 {
            return Err(FilletError::DegenerateGeometry { points: pts.len() });
        }
        if pts.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(FilletError::DegenerateGeometry { points: pts.len() });
        }
        Ok(Self { pts })
    }

    /// Single line from a possibly multi-part geometry (first part only).
    ///
    /// Additionally rejects lines whose points all coincide: no direction can be
    /// derived from them.
    pub fn from_geometry(geom: &LineGeometry, eps_len: f64) -> Result<Self, FilletError> {
        let part = geom
            .first_part()
            .ok_or(FilletError::DegenerateGeometry { points: 0 })?;
        let line = Self::new(part.to_vec())?;
        let first = line.first();
        let tol = coincidence_tol(first, eps_len);
        if line.pts.iter().all(|p| (p - first).norm() <= tol) {
            return Err(FilletError::DegenerateGeometry { points: 1 });
        }
        Ok(line)
    }

    /// Internal constructor for callers that keep the invariants by construction.
    #[inline]
    pub(crate) fn from_points_unchecked(pts: Vec<Point>) -> Self {
        debug_assert!(pts.len() >= 2);
        Self { pts }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.pts
    }
    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.pts
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }
    /// Always false: a polyline holds at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }
    #[inline]
    pub fn first(&self) -> Point {
        self.pts[0]
    }
    #[inline]
    pub fn last(&self) -> Point {
        self.pts[self.pts.len() - 1]
    }
    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.pts.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Sampled fillet arc and the tangent points it joins.
#[derive(Clone, Debug, PartialEq)]
pub struct FilletResult {
    /// Arc samples; starts at `tp1`, ends at `tp2`, sweeps at most π.
    pub arc: Vec<Point>,
    /// Tangent point on line 1.
    pub tp1: Point,
    /// Tangent point on line 2.
    pub tp2: Point,
    pub center: Point,
    pub radius: f64,
    /// Intersection of the two lines (real or extended).
    pub corner: Point,
}

impl FilletResult {
    /// Distance from the corner to either tangent point.
    #[inline]
    pub fn tangent_length(&self) -> f64 {
        (self.tp1 - self.corner).norm()
    }
    /// Distance from the corner to the arc center.
    #[inline]
    pub fn center_distance(&self) -> f64 {
        (self.center - self.corner).norm()
    }
}

/// Reasons why no fillet exists for a pair of lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilletError {
    /// A line has fewer than two usable points (`points` = usable count found).
    DegenerateGeometry { points: usize },
    /// The lines' infinite extensions are parallel or coincident.
    NoIntersection,
    /// The lines meet at an angle of 0 or π; no finite-radius arc fits.
    DegenerateAngle,
}

impl fmt::Display for FilletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilletError::DegenerateGeometry { points } => write!(
                f,
                "line geometry is degenerate ({} usable point(s), need ≥2 distinct)",
                points
            ),
            FilletError::NoIntersection => {
                write!(f, "lines are parallel or coincident (no intersection)")
            }
            FilletError::DegenerateAngle => {
                write!(f, "lines are colinear (angle 0 or π); no finite fillet exists")
            }
        }
    }
}

impl std::error::Error for FilletError {}
