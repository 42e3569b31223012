//! Core types for the open-population SCR likelihood engine
//!
//! A state distribution is an M x 3 matrix: one row per mesh point, one
//! column per life state. Capture probabilities arrive from the builder layer
//! as flat buffers and are wrapped in [`CaptureCube`], a bounds-checked
//! three-axis container (mesh x state x occasion).

use nalgebra::{DMatrix, DMatrixView};

use crate::errors::{LikelihoodError, LikelihoodResult};

/// Number of life states in the open-population model
/// (not-yet-entered / alive / departed). Fixed by the model structure.
pub const LIFE_STATES: usize = 3;

/// Probability distribution over (mesh point, life state), shape M x 3.
///
/// Rows index mesh points, columns index life states. Total mass sums to 1
/// when properly normalized; the forward recursion renormalizes each step.
pub type StateDistribution = DMatrix<f64>;

/// Life-state transition matrix for one inter-occasion interval, shape 3 x 3.
///
/// Row-stochastic after combination with survival/recruitment parameters.
/// The recursion computes `pr * tpm`, so the matrix acts on the state axis.
pub type TransitionMatrix = DMatrix<f64>;

/// Per-individual capture probabilities indexed by (mesh point, life state,
/// occasion).
///
/// Owns a dense buffer laid out as J consecutive column-major M x 3 blocks,
/// i.e. entry (i, s, j) lives at `i + s * M + j * M * 3`. This matches the
/// flat-buffer layout produced by the capture-probability builder, so cubes
/// can be constructed from those buffers without copying per element.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureCube {
    data: Vec<f64>,
    mesh_points: usize,
    occasions: usize,
}

impl CaptureCube {
    /// Wrap a flat buffer as an M x 3 x J cube.
    ///
    /// # Errors
    /// Returns [`LikelihoodError::DimensionMismatch`] if the buffer length
    /// is not `mesh_points * 3 * occasions`, and
    /// [`LikelihoodError::NoOccasions`] if `occasions` is zero.
    pub fn from_vec(
        data: Vec<f64>,
        mesh_points: usize,
        occasions: usize,
    ) -> LikelihoodResult<Self> {
        if occasions == 0 {
            return Err(LikelihoodError::NoOccasions);
        }
        let expected = mesh_points * LIFE_STATES * occasions;
        if data.len() != expected {
            return Err(LikelihoodError::dims(
                expected,
                data.len(),
                "capture cube buffer length",
            ));
        }
        Ok(Self {
            data,
            mesh_points,
            occasions,
        })
    }

    /// Build a cube by evaluating `f(mesh_point, state, occasion)` at every
    /// index. Mainly useful in tests and small examples.
    pub fn from_fn<F>(mesh_points: usize, occasions: usize, mut f: F) -> LikelihoodResult<Self>
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        if occasions == 0 {
            return Err(LikelihoodError::NoOccasions);
        }
        let mut data = Vec::with_capacity(mesh_points * LIFE_STATES * occasions);
        for j in 0..occasions {
            for s in 0..LIFE_STATES {
                for i in 0..mesh_points {
                    data.push(f(i, s, j));
                }
            }
        }
        Ok(Self {
            data,
            mesh_points,
            occasions,
        })
    }

    /// Number of mesh points (M)
    pub fn mesh_points(&self) -> usize {
        self.mesh_points
    }

    /// Number of survey occasions (J)
    pub fn occasions(&self) -> usize {
        self.occasions
    }

    /// Borrow occasion `j` as an M x 3 matrix view.
    ///
    /// # Panics
    /// Panics if `j >= occasions`. Engine code validates J against the cube
    /// before entering the recursion, so in-recursion indexing never panics.
    pub fn occasion(&self, j: usize) -> DMatrixView<'_, f64> {
        assert!(j < self.occasions, "occasion index {} out of range", j);
        let block = self.mesh_points * LIFE_STATES;
        DMatrixView::from_slice(
            &self.data[j * block..(j + 1) * block],
            self.mesh_points,
            LIFE_STATES,
        )
    }

    /// Bounds-checked single-entry access.
    pub fn get(&self, mesh_point: usize, state: usize, occasion: usize) -> Option<f64> {
        if mesh_point >= self.mesh_points || state >= LIFE_STATES || occasion >= self.occasions {
            return None;
        }
        let idx = mesh_point + state * self.mesh_points + occasion * self.mesh_points * LIFE_STATES;
        Some(self.data[idx])
    }
}

/// Check that an initial distribution has one column per life state.
pub(crate) fn validate_initial_distribution(pr0: &StateDistribution) -> LikelihoodResult<()> {
    if pr0.ncols() != LIFE_STATES {
        return Err(LikelihoodError::dims(
            LIFE_STATES,
            pr0.ncols(),
            "initial distribution life-state columns",
        ));
    }
    Ok(())
}

/// Check that exactly J - 1 transition matrices were supplied and that each
/// is square over the life states.
pub(crate) fn validate_transition_matrices(
    tpms: &[TransitionMatrix],
    occasions: usize,
) -> LikelihoodResult<()> {
    if tpms.len() != occasions - 1 {
        return Err(LikelihoodError::dims(
            occasions - 1,
            tpms.len(),
            "transition matrix count",
        ));
    }
    for tpm in tpms {
        if tpm.nrows() != LIFE_STATES || tpm.ncols() != LIFE_STATES {
            return Err(LikelihoodError::dims(
                LIFE_STATES,
                tpm.nrows().max(tpm.ncols()),
                "transition matrix dimension",
            ));
        }
    }
    Ok(())
}

/// Convenience constructor for an all-certain (unit) capture cube.
#[cfg(test)]
pub(crate) fn unit_cube(mesh_points: usize, occasions: usize) -> CaptureCube {
    CaptureCube::from_fn(mesh_points, occasions, |_, _, _| 1.0).unwrap()
}
