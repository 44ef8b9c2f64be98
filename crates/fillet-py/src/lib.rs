//! PyO3 bindings for the `fillet` engine.
//!
//! Notes
//! - Keep bindings thin: points cross the boundary as `(x, y)` tuples, lines as
//!   lists of them, multi-part lines as lists of lines.
//! - Engine errors and invalid radii raise `ValueError`.

use pyo3::prelude::*;

mod common;
mod geom;
mod solve;

#[pymodule]
fn fillet_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", fillet::VERSION)?;
    geom::register(m)?;
    solve::register(m)?;
    Ok(())
}
