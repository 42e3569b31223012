//! Forward-algorithm log-likelihood for the open-population SCR model
//!
//! Each individual contributes an independent scaled forward recursion over
//! its (mesh point x life state) distribution: fold in the occasion's capture
//! probabilities, propagate through the interval's transition matrix, rescale
//! and bank the log scaling factor. The final occasion folds in its capture
//! probabilities with no further transition. The total log-likelihood is the
//! sum of per-individual contributions.
//!
//! Individuals share no mutable state, so the per-individual loop fans out
//! across a caller-sized worker pool; results are collected in individual
//! order and summed sequentially, keeping the reduction deterministic.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::algebra::{fold_observation, propagate, rescale, total_mass};
use crate::errors::{LikelihoodError, LikelihoodResult};
use crate::types::{
    validate_initial_distribution, validate_transition_matrices, CaptureCube, StateDistribution,
    TransitionMatrix,
};

/// Log-likelihood contribution of a single individual.
///
/// Runs the scaled forward recursion over `capture.occasions()` occasions.
/// With a single occasion the transition loop is skipped and only the final
/// fold-in executes. A zero-mass step (impossible observation) ends the
/// recursion immediately with a `-inf` return value, which callers pass
/// through to the optimizer; continuing past the dead step would only fold
/// NaN into an already infinite log-likelihood.
///
/// Shapes are assumed validated by [`total_log_likelihood`]; this function
/// expects `tpms.len() == capture.occasions() - 1` and matching mesh sizes.
pub fn individual_log_likelihood(
    pr0: &StateDistribution,
    capture: &CaptureCube,
    tpms: &[TransitionMatrix],
) -> f64 {
    let last = capture.occasions() - 1;
    let mut pr = pr0.clone();
    let mut llk = 0.0;

    for (j, tpm) in tpms.iter().enumerate() {
        fold_observation(&mut pr, &capture.occasion(j));
        propagate(&mut pr, tpm);
        let log_mass = rescale(&mut pr);
        if log_mass == f64::NEG_INFINITY {
            // Zero mass: the observation sequence is impossible from here
            // on, and the working distribution is no longer usable.
            return f64::NEG_INFINITY;
        }
        llk += log_mass;
    }

    fold_observation(&mut pr, &capture.occasion(last));
    llk + total_mass(&pr).ln()
}

/// Total log-likelihood over all individuals.
///
/// # Arguments
/// * `pr0` - Initial distribution over (mesh point, life state), M x 3
/// * `captures` - One capture cube per individual, each M x 3 x J
/// * `tpms` - J - 1 transition matrices, each 3 x 3
/// * `num_cores` - Worker count for the per-individual fan-out; 1 runs
///   strictly sequentially
///
/// # Errors
/// Rejects `num_cores < 1`, missing occasions, and any M/S/J disagreement
/// between `pr0`, the cubes and the transition matrices. Degenerate
/// zero-mass recursions are not errors: they surface as a non-finite total.
pub fn total_log_likelihood(
    pr0: &StateDistribution,
    captures: &[CaptureCube],
    tpms: &[TransitionMatrix],
    num_cores: usize,
) -> LikelihoodResult<f64> {
    if num_cores < 1 {
        return Err(LikelihoodError::InvalidCoreCount {
            requested: num_cores,
        });
    }
    validate_initial_distribution(pr0)?;

    // No individuals means an empty product of likelihoods.
    let Some(first) = captures.first() else {
        return Ok(0.0);
    };

    let occasions = first.occasions();
    validate_transition_matrices(tpms, occasions)?;
    for cube in captures {
        if cube.occasions() != occasions {
            return Err(LikelihoodError::dims(
                occasions,
                cube.occasions(),
                "capture cube occasion count",
            ));
        }
        if cube.mesh_points() != pr0.nrows() {
            return Err(LikelihoodError::dims(
                pr0.nrows(),
                cube.mesh_points(),
                "capture cube mesh size",
            ));
        }
    }

    log::debug!(
        "forward likelihood: n={} J={} M={} cores={}",
        captures.len(),
        occasions,
        pr0.nrows(),
        num_cores
    );

    let per_individual = if num_cores == 1 {
        sequential_llks(pr0, captures, tpms)
    } else {
        parallel_llks(pr0, captures, tpms, num_cores)?
    };

    // Sequential in-order sum keeps the reduction deterministic.
    Ok(per_individual.iter().sum())
}

/// Per-individual contributions, computed on the calling thread.
fn sequential_llks(
    pr0: &StateDistribution,
    captures: &[CaptureCube],
    tpms: &[TransitionMatrix],
) -> Vec<f64> {
    captures
        .iter()
        .map(|cube| individual_log_likelihood(pr0, cube, tpms))
        .collect()
}

/// Per-individual contributions, fanned out across `num_cores` workers.
#[cfg(feature = "rayon")]
fn parallel_llks(
    pr0: &StateDistribution,
    captures: &[CaptureCube],
    tpms: &[TransitionMatrix],
    num_cores: usize,
) -> LikelihoodResult<Vec<f64>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cores)
        .build()
        .map_err(|e| LikelihoodError::ThreadPool {
            description: e.to_string(),
        })?;

    Ok(pool.install(|| {
        captures
            .par_iter()
            .map(|cube| individual_log_likelihood(pr0, cube, tpms))
            .collect()
    }))
}

/// Sequential fallback when the crate is built without the rayon feature.
#[cfg(not(feature = "rayon"))]
fn parallel_llks(
    pr0: &StateDistribution,
    captures: &[CaptureCube],
    tpms: &[TransitionMatrix],
    _num_cores: usize,
) -> LikelihoodResult<Vec<f64>> {
    Ok(sequential_llks(pr0, captures, tpms))
}
