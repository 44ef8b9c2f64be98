//! Call boundary for hosts.
//!
//! Hosts (the CLI, the Python bindings, an editor adapter) only need these four
//! calls. Each is a pure function: inputs are borrowed, outputs are fresh values,
//! and a failed call returns the error and nothing else.

use crate::geom2::{self, FilletError, FilletResult, GeomCfg, LineGeometry, Point, Polyline};

/// Outcome of a fillet-with-trim edit: the arc plus both trimmed lines.
#[derive(Clone, Debug, PartialEq)]
pub struct FilletEdit {
    pub fillet: FilletResult,
    pub trimmed1: Polyline,
    pub trimmed2: Polyline,
}

/// Normalize raw (possibly multi-part) geometry to one polyline (first part).
pub fn extract_line(raw: &LineGeometry) -> Result<Polyline, FilletError> {
    Polyline::from_geometry(raw, GeomCfg::default().eps_len)
}

/// Fillet of `radius` between two lines with default tolerances.
///
/// Pre: `radius` is finite and > 0 (hosts validate it).
pub fn compute_fillet(
    line1: &Polyline,
    line2: &Polyline,
    radius: f64,
) -> Result<FilletResult, FilletError> {
    compute_fillet_with(line1, line2, radius, GeomCfg::default())
}

/// Fillet of `radius` between two lines with explicit tolerances and arc resolution.
pub fn compute_fillet_with(
    line1: &Polyline,
    line2: &Polyline,
    radius: f64,
    cfg: GeomCfg,
) -> Result<FilletResult, FilletError> {
    let corner = geom2::corner(line1, line2, &cfg)?;
    geom2::solve_arc(line1, line2, corner, radius, &cfg)
}

/// Move the endpoint of `line` nearer to `point` onto `point`.
pub fn trim_to_point(line: &Polyline, point: Point) -> Polyline {
    geom2::trim_to_point(line, point)
}

/// Extract, fillet, and trim both lines in one call.
pub fn fillet_with_trim(
    raw1: &LineGeometry,
    raw2: &LineGeometry,
    radius: f64,
) -> Result<FilletEdit, FilletError> {
    fillet_with_trim_cfg(raw1, raw2, radius, GeomCfg::default())
}

/// Same as `fillet_with_trim` with explicit configuration.
pub fn fillet_with_trim_cfg(
    raw1: &LineGeometry,
    raw2: &LineGeometry,
    radius: f64,
    cfg: GeomCfg,
) -> Result<FilletEdit, FilletError> {
    let line1 = Polyline::from_geometry(raw1, cfg.eps_len)?;
    let line2 = Polyline::from_geometry(raw2, cfg.eps_len)?;
    let fillet = compute_fillet_with(&line1, &line2, radius, cfg).inspect_err(|err| {
        tracing::debug!(%err, radius, "fillet not possible");
    })?;
    let trimmed1 = trim_to_point(&line1, fillet.tp1);
    let trimmed2 = trim_to_point(&line2, fillet.tp2);
    Ok(FilletEdit {
        fillet,
        trimmed1,
        trimmed2,
    })
}
