//! Fillet geometry engine.
//!
//! Joins two 2D lines with a tangent circular arc of a given radius and trims
//! both lines back to the tangent points.
//!
//! Layout
//! - `geom2`: the engine (line extraction, intersection, tangent/arc solve, trim).
//! - `api`: the call boundary used by hosts (CLI, Python bindings, editors).
//! - `host`: thin adapter for editor-like hosts (nearest-line pick, two-click tool).
//!
//! API Policy
//! - Workspace-internal. Breaking changes are fine when they improve clarity.

pub mod api;
pub mod geom2;
pub mod host;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{FilletError, FilletResult, GeomCfg, LineGeometry, Polyline};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{
        compute_fillet, compute_fillet_with, extract_line, fillet_with_trim, fillet_with_trim_cfg,
        trim_to_point, FilletEdit,
    };
    pub use crate::geom2::rand::{draw_corner, CornerCfg, ReplayToken};
    pub use crate::geom2::{FilletError, FilletResult, GeomCfg, LineGeometry, Point, Polyline};
    pub use crate::host::{FeatureId, FilletTool, LineFeature, NewLine, PressOutcome};
    pub use nalgebra::Vector2 as Vec2;
}
