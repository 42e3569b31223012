//! Probability of being detected at least once
//!
//! Runs the same scaled forward recursion as the likelihood engine, but over
//! the complement ("missed on this occasion") capture matrices for a single
//! generic individual. The accumulated log mass is log P(never detected);
//! the returned value is its complement.
//!
//! Unlike the likelihood recursion there is no per-individual axis: the miss
//! matrices depend only on model parameters, so one evaluation serves every
//! individual sharing the same design inputs.

use nalgebra::DMatrix;

use crate::algebra::{fold_observation, propagate, rescale, total_mass};
use crate::errors::LikelihoodResult;
use crate::types::{
    validate_initial_distribution, validate_transition_matrices, StateDistribution,
    TransitionMatrix,
};

/// Probability that a generic individual is detected at least once over the
/// full occasion sequence.
///
/// # Arguments
/// * `pr0` - Initial distribution over (mesh point, life state), M x 3
/// * `miss_matrices` - One M x 3 matrix per occasion giving the probability
///   of the empty (no-capture) outcome at each mesh point and state; their
///   count defines J
/// * `tpms` - J - 1 transition matrices, each 3 x 3
///
/// The final occasion's miss matrix is indexed explicitly as
/// `miss_matrices[J - 1]`, so a single-occasion study (J = 1, no transition
/// matrices) is well-defined: the result is `1 - sum(pr0 .* miss[0])`.
///
/// A zero miss mass mid-sequence means the individual is certainly detected
/// by that occasion; the recursion stops there and returns exactly 1.
///
/// # Errors
/// Rejects an empty `miss_matrices` list and any shape disagreement between
/// `pr0`, the miss matrices and the transition matrices.
pub fn detection_probability(
    pr0: &StateDistribution,
    miss_matrices: &[DMatrix<f64>],
    tpms: &[TransitionMatrix],
) -> LikelihoodResult<f64> {
    validate_initial_distribution(pr0)?;
    validate_shapes(pr0, miss_matrices, tpms)?;

    let occasions = miss_matrices.len();
    log::debug!(
        "detection probability: J={} M={}",
        occasions,
        pr0.nrows()
    );

    let mut pr = pr0.clone();
    let mut log_miss = 0.0;

    for (j, tpm) in tpms.iter().enumerate() {
        fold_observation(&mut pr, &miss_matrices[j]);
        propagate(&mut pr, tpm);
        let log_mass = rescale(&mut pr);
        if log_mass == f64::NEG_INFINITY {
            // Zero miss mass: detection is certain by this occasion.
            return Ok(1.0);
        }
        log_miss += log_mass;
    }

    fold_observation(&mut pr, &miss_matrices[occasions - 1]);
    log_miss += total_mass(&pr).ln();

    Ok(1.0 - log_miss.exp())
}

/// Boundary shape checks for the detection recursion.
fn validate_shapes(
    pr0: &StateDistribution,
    miss_matrices: &[DMatrix<f64>],
    tpms: &[TransitionMatrix],
) -> LikelihoodResult<()> {
    use crate::errors::LikelihoodError;
    use crate::types::LIFE_STATES;

    if miss_matrices.is_empty() {
        return Err(LikelihoodError::NoOccasions);
    }
    validate_transition_matrices(tpms, miss_matrices.len())?;
    for miss in miss_matrices {
        if miss.nrows() != pr0.nrows() {
            return Err(LikelihoodError::dims(
                pr0.nrows(),
                miss.nrows(),
                "miss matrix mesh size",
            ));
        }
        if miss.ncols() != LIFE_STATES {
            return Err(LikelihoodError::dims(
                LIFE_STATES,
                miss.ncols(),
                "miss matrix life-state columns",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LikelihoodError;
    use crate::types::LIFE_STATES;

    fn alive_at_single_point() -> StateDistribution {
        DMatrix::from_row_slice(1, LIFE_STATES, &[0.0, 1.0, 0.0])
    }

    #[test]
    fn test_certain_non_detection_gives_zero() {
        // All-ones miss matrices: the individual is certainly never seen.
        let pr0 = alive_at_single_point();
        let miss = vec![DMatrix::from_element(1, 3, 1.0); 3];
        let tpms = vec![DMatrix::identity(3, 3); 2];

        let pdet = detection_probability(&pr0, &miss, &tpms).unwrap();
        assert_eq!(pdet, 0.0);
    }

    #[test]
    fn test_certain_detection_gives_one() {
        // Zero miss probability in the occupied state on occasion 0.
        let pr0 = alive_at_single_point();
        let miss = vec![DMatrix::from_row_slice(1, 3, &[1.0, 0.0, 1.0])];

        let pdet = detection_probability(&pr0, &miss, &[]).unwrap();
        assert_eq!(pdet, 1.0);
    }

    #[test]
    fn test_certain_detection_midway_gives_one() {
        // Zero miss probability in the occupied state on occasion 0 of a
        // two-occasion survey: the rescaling step sees zero mass and the
        // result must be exactly 1, not NaN from the remaining fold-ins.
        let pr0 = alive_at_single_point();
        let miss = vec![
            DMatrix::from_row_slice(1, 3, &[1.0, 0.0, 1.0]),
            DMatrix::from_element(1, 3, 0.5),
        ];
        let tpms = vec![DMatrix::identity(3, 3)];

        let pdet = detection_probability(&pr0, &miss, &tpms).unwrap();
        assert_eq!(pdet, 1.0);
    }

    #[test]
    fn test_single_occasion_half_miss() {
        // J=1: pdet = 1 - sum(pr0 .* miss[0]) with no transition applied.
        let pr0 = alive_at_single_point();
        let miss = vec![DMatrix::from_row_slice(1, 3, &[1.0, 0.5, 1.0])];

        let pdet = detection_probability(&pr0, &miss, &[]).unwrap();
        assert!((pdet - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_two_occasions_independent_misses() {
        // Identity transition, miss 0.5 per occasion: never seen with
        // probability 0.25.
        let pr0 = alive_at_single_point();
        let miss = vec![DMatrix::from_row_slice(1, 3, &[1.0, 0.5, 1.0]); 2];
        let tpms = vec![DMatrix::identity(3, 3)];

        let pdet = detection_probability(&pr0, &miss, &tpms).unwrap();
        assert!((pdet - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_pdet_within_unit_interval() {
        let pr0 = DMatrix::from_row_slice(
            2,
            LIFE_STATES,
            &[0.2, 0.2, 0.1, 0.2, 0.2, 0.1],
        );
        let miss = vec![
            DMatrix::from_element(2, 3, 0.9),
            DMatrix::from_element(2, 3, 0.8),
            DMatrix::from_element(2, 3, 0.7),
        ];
        let tpm = DMatrix::from_row_slice(
            3,
            3,
            &[0.6, 0.4, 0.0, 0.0, 0.9, 0.1, 0.0, 0.0, 1.0],
        );
        let tpms = vec![tpm.clone(), tpm];

        let pdet = detection_probability(&pr0, &miss, &tpms).unwrap();
        assert!((0.0..=1.0).contains(&pdet));
    }

    #[test]
    fn test_rejects_empty_occasions() {
        let pr0 = alive_at_single_point();
        let err = detection_probability(&pr0, &[], &[]).unwrap_err();
        assert_eq!(err, LikelihoodError::NoOccasions);
    }

    #[test]
    fn test_rejects_wrong_tpm_count() {
        let pr0 = alive_at_single_point();
        let miss = vec![DMatrix::from_element(1, 3, 1.0); 2];
        let err = detection_probability(&pr0, &miss, &[]).unwrap_err();
        assert!(matches!(err, LikelihoodError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_rejects_miss_matrix_shape_mismatch() {
        let pr0 = alive_at_single_point();
        let miss = vec![DMatrix::from_element(2, 3, 1.0)];
        let err = detection_probability(&pr0, &miss, &[]).unwrap_err();
        assert!(matches!(err, LikelihoodError::DimensionMismatch { .. }));
    }
}
