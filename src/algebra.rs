//! State-vector algebra shared by the forward recursions
//!
//! One scaled-forward step is: fold an observation factor into the working
//! distribution, propagate through the transition matrix, then rescale the
//! distribution to unit mass and bank the log of the scaling factor. The
//! accumulated logs are exactly the log-likelihood (standard scaled forward
//! algorithm identity).

use nalgebra::storage::Storage;
use nalgebra::{Dyn, Matrix};

use crate::types::{StateDistribution, TransitionMatrix};

/// Elementwise fold-in of an observation factor: `pr <- pr .* factor`.
///
/// `factor` must have the same shape as `pr`; both are M x 3. Accepts owned
/// matrices and borrowed cube views alike.
#[inline]
pub fn fold_observation<S>(pr: &mut StateDistribution, factor: &Matrix<f64, Dyn, Dyn, S>)
where
    S: Storage<f64, Dyn, Dyn>,
{
    pr.component_mul_assign(factor);
}

/// Propagate the distribution through one inter-occasion interval:
/// `pr <- pr * tpm`.
///
/// `tpm` is 3 x 3 and acts on the life-state axis (each mesh-point row of
/// `pr` is multiplied by the transition matrix).
#[inline]
pub fn propagate(pr: &mut StateDistribution, tpm: &TransitionMatrix) {
    *pr = &*pr * tpm;
}

/// Total probability mass of the working distribution.
#[inline]
pub fn total_mass(pr: &StateDistribution) -> f64 {
    pr.sum()
}

/// Rescale `pr` to unit mass and return the log of the scaling factor.
///
/// If the mass is exactly zero (an impossible observation under the current
/// parameters), the division produces NaN entries and the returned log is
/// negative infinity. The log is never clamped here; callers check it and
/// stop the recursion, so the NaN working distribution is never consumed.
#[inline]
pub fn rescale(pr: &mut StateDistribution) -> f64 {
    let mass = total_mass(pr);
    *pr /= mass;
    mass.ln()
}
