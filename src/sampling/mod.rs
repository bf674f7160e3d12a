// src/sampling/mod.rs

//! Collapses a [`StateVector`] to one basis index, either stochastically
//! (inverse-CDF draw against the probability distribution) or
//! deterministically (arg-max). Both are pure reads; neither mutates the
//! vector.

use crate::core::{QvecError, StateVector};
use rand::{Rng, RngExt};

/// Draws one basis index from the vector's probability distribution.
///
/// Probabilities are renormalized by their sum before sampling, which absorbs
/// the floating drift accumulated by long gate pipelines as well as the
/// deliberate 1/2^n shrink of the inverse transform. The draw is a uniform
/// value in [0, 1); the result is the smallest index whose cumulative
/// probability exceeds it.
///
/// # Errors
/// `ArithmeticDomain` when the vector carries no probability mass at all.
pub fn measure<R: Rng + ?Sized>(state: &StateVector, rng: &mut R) -> Result<usize, QvecError> {
    let total = state.total_probability();
    if total <= 0.0 {
        return Err(QvecError::ArithmeticDomain {
            message: "cannot sample a zero-mass state vector".to_string(),
        });
    }

    let draw: f64 = rng.random::<f64>();
    let mut cumulative = 0.0;
    for (i, amp) in state.amplitudes().iter().enumerate() {
        cumulative += amp.norm_sqr() / total;
        if draw < cumulative {
            return Ok(i);
        }
    }
    // Cumulative rounding can leave the final bucket fractionally short of
    // 1.0; the draw then belongs to the last index.
    Ok(state.dim() - 1)
}

/// Deterministic variant: the index of maximal probability, first index on
/// ties. Used where a reproducible readout is wanted instead of a sample.
pub fn argmax(state: &StateVector) -> usize {
    let mut max_index = 0;
    let mut max_probability = 0.0;
    for (i, amp) in state.amplitudes().iter().enumerate() {
        let probability = amp.norm_sqr();
        if probability > max_probability {
            max_probability = probability;
            max_index = i;
        }
    }
    max_index
}
