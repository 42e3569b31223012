//! Python bindings for openscr
//!
//! Exposes the likelihood engines to the model-fitting layer as the
//! `_openscr` extension module. Flat capture buffers arrive in the same
//! (mesh, state, occasion) column-major order the capture-probability
//! builder emits, so no per-element reshuffling happens at the boundary.

mod convert;
mod ops;

use numpy::{PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::errors::LikelihoodError;
use crate::types::CaptureCube;

use convert::{numpy_to_dmatrix, numpy_to_vec};

impl From<LikelihoodError> for PyErr {
    fn from(err: LikelihoodError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Total log-likelihood over all individuals.
///
/// # Arguments
/// * `n` - Number of individuals
/// * `j` - Number of survey occasions
/// * `m` - Number of mesh points
/// * `pr0` - Initial distribution, m x 3
/// * `pr_capture` - One flattened capture buffer per individual, each of
///   length m * 3 * j in (mesh, state, occasion) column-major order
/// * `tpms` - j - 1 transition matrices, each 3 x 3
/// * `num_cores` - Worker count for the per-individual fan-out (>= 1)
#[pyfunction]
#[allow(clippy::too_many_arguments)]
pub fn calc_llk(
    n: usize,
    j: usize,
    m: usize,
    pr0: PyReadonlyArray2<'_, f64>,
    pr_capture: Vec<PyReadonlyArray1<'_, f64>>,
    tpms: Vec<PyReadonlyArray2<'_, f64>>,
    num_cores: i64,
) -> PyResult<f64> {
    if num_cores < 1 {
        return Err(PyValueError::new_err(format!(
            "num_cores must be >= 1, got {}",
            num_cores
        )));
    }
    if pr_capture.len() != n {
        return Err(LikelihoodError::dims(n, pr_capture.len(), "capture buffer count").into());
    }

    let pr0 = numpy_to_dmatrix(pr0);
    let captures = pr_capture
        .into_iter()
        .map(|buf| CaptureCube::from_vec(numpy_to_vec(buf), m, j))
        .collect::<Result<Vec<_>, _>>()?;
    let tpms: Vec<_> = tpms.into_iter().map(numpy_to_dmatrix).collect();

    let llk = crate::likelihood::total_log_likelihood(&pr0, &captures, &tpms, num_cores as usize)?;
    Ok(llk)
}

/// Probability that a generic individual is detected at least once.
///
/// # Arguments
/// * `j` - Number of survey occasions
/// * `pr0` - Initial distribution, m x 3
/// * `pr_captures` - j miss (no-capture) matrices, each m x 3
/// * `tpms` - j - 1 transition matrices, each 3 x 3
#[pyfunction]
pub fn calc_pdet(
    j: usize,
    pr0: PyReadonlyArray2<'_, f64>,
    pr_captures: Vec<PyReadonlyArray2<'_, f64>>,
    tpms: Vec<PyReadonlyArray2<'_, f64>>,
) -> PyResult<f64> {
    if pr_captures.len() != j {
        return Err(LikelihoodError::dims(j, pr_captures.len(), "miss matrix count").into());
    }

    let pr0 = numpy_to_dmatrix(pr0);
    let miss: Vec<_> = pr_captures.into_iter().map(numpy_to_dmatrix).collect();
    let tpms: Vec<_> = tpms.into_iter().map(numpy_to_dmatrix).collect();

    let pdet = crate::detection::detection_probability(&pr0, &miss, &tpms)?;
    Ok(pdet)
}

/// Python module definition
#[pymodule]
fn _openscr(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(calc_llk, m)?)?;
    m.add_function(wrap_pyfunction!(calc_pdet, m)?)?;

    // Low-level operations (for testing)
    ops::register_ops(m)?;

    // Version
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
