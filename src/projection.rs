//! Contracts for the model-fitting collaborators
//!
//! The likelihood core consumes capture-probability cubes and transition
//! matrices but does not build them, and the fitting layer additionally
//! projects expected population size from the same design inputs. These
//! traits pin down the shapes exchanged at that seam; their implementations
//! live in the fitting layer, not in this crate.

use nalgebra::{DMatrix, DVector};

use crate::errors::LikelihoodResult;
use crate::types::{CaptureCube, StateDistribution, TransitionMatrix};

/// Projects the expected super-population count over the survey.
///
/// Shares the likelihood engines' input shapes (initial distribution and
/// J - 1 transition matrices) but is an independent sibling operation, not a
/// dependency of the recursions.
pub trait PopulationSizeProjector {
    /// Expected count per occasion for density `density`, propagating `pr0`
    /// through the `occasions - 1` transition matrices.
    fn project(
        &self,
        density: f64,
        occasions: usize,
        pr0: &StateDistribution,
        tpms: &[TransitionMatrix],
    ) -> LikelihoodResult<DVector<f64>>;
}

/// Builds per-individual capture-probability cubes from raw encounter rates.
///
/// The output cubes are M x 3 x J: entry (i, s, j) is the probability of
/// individual's observed encounter pattern on occasion `j`, conditional on
/// occupying mesh point `i` in life state `s`. The engines treat the cubes
/// as opaque dense inputs.
pub trait CaptureProbabilityBuilder {
    /// Build one cube per individual.
    ///
    /// `encounter_rates` is the detector-level rate array for `sub_occasions`
    /// sampling sub-occasions, and `usage` is the (occasion x detector)
    /// effort matrix. `num_cores` bounds the builder's own fan-out.
    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        individuals: usize,
        occasions: usize,
        sub_occasions: usize,
        mesh_points: usize,
        encounter_rates: &[f64],
        usage: &DMatrix<f64>,
        num_cores: usize,
    ) -> LikelihoodResult<Vec<CaptureCube>>;
}

/// Builds the J - 1 life-state transition matrices from survival and
/// recruitment parameters.
pub trait TransitionMatrixBuilder {
    /// Build one row-stochastic 3 x 3 matrix per inter-occasion interval.
    fn build(&self, occasions: usize) -> LikelihoodResult<Vec<TransitionMatrix>>;
}
