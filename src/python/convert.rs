//! Internal numpy <-> nalgebra conversion utilities.
//!
//! These are NOT exposed to Python - purely internal helpers. Conversions go
//! through `as_array`, so non-contiguous inputs (slices, transposes) work
//! without an extra copy on the Python side.

use nalgebra::DMatrix;
use numpy::{PyReadonlyArray1, PyReadonlyArray2};

/// Convert numpy 2D array to nalgebra DMatrix
pub(crate) fn numpy_to_dmatrix(arr: PyReadonlyArray2<'_, f64>) -> DMatrix<f64> {
    let view = arr.as_array();
    DMatrix::from_fn(view.nrows(), view.ncols(), |i, j| view[[i, j]])
}

/// Convert numpy 1D array to an owned Vec
pub(crate) fn numpy_to_vec(arr: PyReadonlyArray1<'_, f64>) -> Vec<f64> {
    arr.as_array().iter().copied().collect()
}
