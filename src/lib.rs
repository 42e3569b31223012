/*!
# openscr - open-population SCR likelihood engine

Rust implementation of the forward-algorithm likelihood core for
open-population spatial capture-recapture (Jolly-Seber) models.

## Features

- Scaled forward recursion over (mesh point x life state) distributions,
  with per-step rescaling so long occasion sequences never underflow
- Per-individual parallel fan-out with a deterministic sum reduction
- Companion recursion for the probability of being detected at least once
- Optional Python bindings exposing `calc_llk` / `calc_pdet`

## Modules

- [`likelihood`] - total and per-individual log-likelihood
- [`detection`] - detection probability (seen at least once)
- [`algebra`] - shared state-vector operations
- [`types`] - state distributions, transition matrices, capture cubes
- [`projection`] - contracts for the fitting-layer collaborators

## Example

```rust
use nalgebra::DMatrix;
use openscr::{total_log_likelihood, CaptureCube};

// One individual, certainly alive at the only mesh point.
let pr0 = DMatrix::from_row_slice(1, 3, &[0.0, 1.0, 0.0]);

// Two occasions, capture probability 0.5 each, no state transitions.
let cube = CaptureCube::from_fn(1, 2, |_, _, _| 0.5).unwrap();
let tpms = vec![DMatrix::identity(3, 3)];

let llk = total_log_likelihood(&pr0, &[cube], &tpms, 1).unwrap();
assert!((llk - 0.25_f64.ln()).abs() < 1e-12);
```
*/

// ============================================================================
// Python bindings (optional)
// ============================================================================

#[cfg(feature = "python")]
pub mod python;

// ============================================================================
// Core modules
// ============================================================================

/// Shared state-vector algebra (fold, propagate, rescale)
pub mod algebra;

/// Probability of being detected at least once
pub mod detection;

/// Error types
pub mod errors;

/// Forward-algorithm log-likelihood
pub mod likelihood;

/// Collaborator contracts (capture-probability builder, tpm builder,
/// population-size projector)
pub mod projection;

/// State distributions, transition matrices, capture cubes
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// Core types
pub use types::{CaptureCube, StateDistribution, TransitionMatrix, LIFE_STATES};

// Errors
pub use errors::{LikelihoodError, LikelihoodResult};

// Engines
pub use detection::detection_probability;
pub use likelihood::{individual_log_likelihood, total_log_likelihood};

// Collaborator contracts
pub use projection::{CaptureProbabilityBuilder, PopulationSizeProjector, TransitionMatrixBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
