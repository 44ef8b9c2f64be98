//! Planar fillet geometry.
//!
//! Purpose
//! - Join two lines with a tangent arc of radius `r` and trim them back to the
//!   tangent points.
//! - Keep every step a pure function of its inputs, with tolerances explicit in
//!   `GeomCfg`.
//!
//! Pipeline
//! - `Polyline::from_geometry`: first part of a (multi-)line → ordered points.
//! - `intersect::corner`: real segment crossing, else crossing of the chords'
//!   infinite lines.
//! - `arc::solve`: end directions, tangent points, center, non-reflex sampling.
//! - `trim::trim_to_point`: move the nearer endpoint onto a tangent point.
//!
//! Precondition
//! - Only the end of each line nearer the corner is used to derive its direction.
//!   This is exact for two-point lines and for polylines whose last segment near
//!   the joint is straight; interior vertices are never filleted.

pub mod arc;
pub mod intersect;
pub mod rand;
mod trim;
mod types;
mod util;

pub use arc::solve as solve_arc;
pub use intersect::{corner, extended_intersection, segment_intersection};
pub use trim::trim_to_point;
pub use types::{FilletError, FilletResult, GeomCfg, LineGeometry, Point, Polyline};
pub use util::{angular_span, distance_to_segment};
