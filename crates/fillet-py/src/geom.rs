//! Line extraction and trimming bindings.

use crate::common::{
    geometry_from_parts, map_fillet_err, polyline_from_py, polyline_to_py, to_vec2, Xy,
};
use fillet::api;
use pyo3::prelude::*;

/// First part of a (multi-)line as a point list; raises on degenerate input.
#[pyfunction]
pub fn extract_line(parts: Vec<Vec<Xy>>) -> PyResult<Vec<Xy>> {
    let line = api::extract_line(&geometry_from_parts(parts)).map_err(map_fillet_err)?;
    Ok(polyline_to_py(&line))
}

/// Move the endpoint nearer to `point` onto `point`.
#[pyfunction]
pub fn trim_to_point(line: Vec<Xy>, point: Xy) -> PyResult<Vec<Xy>> {
    let line = polyline_from_py(line)?;
    Ok(polyline_to_py(&api::trim_to_point(&line, to_vec2(point))))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(extract_line, m)?)?;
    m.add_function(wrap_pyfunction!(trim_to_point, m)?)?;
    Ok(())
}
