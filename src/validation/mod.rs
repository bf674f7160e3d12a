// src/validation/mod.rs

//! Checks the soft invariants of a [`StateVector`] that gates are expected to
//! maintain but the engine never enforces on its own.

use crate::core::{NORM_TOLERANCE, QvecError, StateVector};

/// Checks that the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QvecError::ArithmeticDomain)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), QvecError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let mass = state.total_probability();
    if (mass - 1.0).abs() > effective_tolerance {
        Err(QvecError::ArithmeticDomain {
            message: format!(
                "state vector normalization failed: Sum(|c_i|^2) = {} (deviation > {})",
                mass, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}
