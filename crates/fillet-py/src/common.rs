use fillet::{FilletError, FilletResult, LineGeometry, Polyline};
use nalgebra::Vector2;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub type Xy = (f64, f64);

#[inline]
pub fn to_vec2(p: Xy) -> Vector2<f64> {
    Vector2::new(p.0, p.1)
}

#[inline]
pub fn to_xy(p: &Vector2<f64>) -> Xy {
    (p.x, p.y)
}

/// Python parts list → host geometry (one part → single line).
pub fn geometry_from_parts(parts: Vec<Vec<Xy>>) -> LineGeometry {
    let mut parts: Vec<Vec<Vector2<f64>>> = parts
        .into_iter()
        .map(|part| part.into_iter().map(to_vec2).collect())
        .collect();
    if parts.len() == 1 {
        LineGeometry::Single(parts.remove(0))
    } else {
        LineGeometry::Multi(parts)
    }
}

pub fn polyline_from_py(points: Vec<Xy>) -> PyResult<Polyline> {
    Polyline::new(points.into_iter().map(to_vec2).collect()).map_err(map_fillet_err)
}

pub fn polyline_to_py(line: &Polyline) -> Vec<Xy> {
    line.points().iter().map(to_xy).collect()
}

pub fn validate_radius(radius: f64) -> PyResult<f64> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(PyValueError::new_err("invalid radius: expected a positive number"))
    }
}

pub fn map_fillet_err(err: FilletError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Fillet as seen from Python.
#[pyclass(name = "FilletResult", get_all, frozen)]
#[derive(Clone)]
pub struct PyFillet {
    pub arc: Vec<Xy>,
    pub tp1: Xy,
    pub tp2: Xy,
    pub center: Xy,
    pub corner: Xy,
    pub radius: f64,
}

impl From<&FilletResult> for PyFillet {
    fn from(f: &FilletResult) -> Self {
        Self {
            arc: f.arc.iter().map(to_xy).collect(),
            tp1: to_xy(&f.tp1),
            tp2: to_xy(&f.tp2),
            center: to_xy(&f.center),
            corner: to_xy(&f.corner),
            radius: f.radius,
        }
    }
}
