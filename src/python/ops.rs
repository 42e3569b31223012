//! Low-level operations exposed for testing.
//!
//! These are private/internal APIs primarily used for fixture equivalence
//! testing against the reference implementation's per-individual output.

use numpy::{PyReadonlyArray1, PyReadonlyArray2};
use pyo3::prelude::*;

use super::convert::{numpy_to_dmatrix, numpy_to_vec};
use crate::types::CaptureCube;

/// Log-likelihood contribution of a single individual (internal).
#[pyfunction]
#[pyo3(name = "_individual_llk")]
pub fn py_individual_llk(
    j: usize,
    m: usize,
    pr0: PyReadonlyArray2<'_, f64>,
    pr_capture: PyReadonlyArray1<'_, f64>,
    tpms: Vec<PyReadonlyArray2<'_, f64>>,
) -> PyResult<f64> {
    let pr0 = numpy_to_dmatrix(pr0);
    let cube = CaptureCube::from_vec(numpy_to_vec(pr_capture), m, j)?;
    let tpms: Vec<_> = tpms.into_iter().map(numpy_to_dmatrix).collect();

    crate::types::validate_initial_distribution(&pr0)?;
    crate::types::validate_transition_matrices(&tpms, j)?;
    if cube.mesh_points() != pr0.nrows() {
        return Err(crate::errors::LikelihoodError::dims(
            pr0.nrows(),
            cube.mesh_points(),
            "capture cube mesh size",
        )
        .into());
    }

    Ok(crate::likelihood::individual_log_likelihood(
        &pr0, &cube, &tpms,
    ))
}

/// Register low-level operations with the Python module.
pub fn register_ops(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_individual_llk, m)?)?;
    Ok(())
}
