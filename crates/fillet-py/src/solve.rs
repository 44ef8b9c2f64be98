//! Fillet bindings.

use crate::common::{
    geometry_from_parts, map_fillet_err, polyline_from_py, polyline_to_py, validate_radius,
    PyFillet, Xy,
};
use fillet::api;
use pyo3::prelude::*;

/// Fillet of `radius` between two point lists.
#[pyfunction]
pub fn compute_fillet(line1: Vec<Xy>, line2: Vec<Xy>, radius: f64) -> PyResult<PyFillet> {
    let radius = validate_radius(radius)?;
    let l1 = polyline_from_py(line1)?;
    let l2 = polyline_from_py(line2)?;
    let f = api::compute_fillet(&l1, &l2, radius).map_err(map_fillet_err)?;
    Ok(PyFillet::from(&f))
}

/// Extract, fillet, and trim: returns `(fillet, trimmed1, trimmed2)`.
#[pyfunction]
pub fn fillet_with_trim(
    parts1: Vec<Vec<Xy>>,
    parts2: Vec<Vec<Xy>>,
    radius: f64,
) -> PyResult<(PyFillet, Vec<Xy>, Vec<Xy>)> {
    let radius = validate_radius(radius)?;
    let edit = api::fillet_with_trim(
        &geometry_from_parts(parts1),
        &geometry_from_parts(parts2),
        radius,
    )
    .map_err(map_fillet_err)?;
    Ok((
        PyFillet::from(&edit.fillet),
        polyline_to_py(&edit.trimmed1),
        polyline_to_py(&edit.trimmed2),
    ))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_class::<PyFillet>()?;
    m.add_function(wrap_pyfunction!(compute_fillet, m)?)?;
    m.add_function(wrap_pyfunction!(fillet_with_trim, m)?)?;
    Ok(())
}
