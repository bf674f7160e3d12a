// src/gates/mod.rs

//! In-place unitary (and deliberately non-unitary) operators over a
//! [`StateVector`]: the single-qubit superposition gate, the controlled
//! phase rotation, and the Grover reflection pair.
//!
//! Qubit convention: qubit `q` is bit `q` of the basis index, so qubit 0 is
//! the least significant bit. All operators mutate the vector in place and
//! reject out-of-range qubit or basis indices before touching any amplitude.

use crate::core::{QvecError, StateVector};
use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

/// Applies the superposition (Hadamard) gate to one qubit.
///
/// For every pair of basis states differing only in bit `qubit`, the pair of
/// amplitudes (a0, a1) becomes ((a0 + a1)/sqrt(2), (a0 - a1)/sqrt(2)).
/// Applied once per qubit of |0...0> this produces the uniform superposition
/// over all 2^n states.
pub fn apply_hadamard(state: &mut StateVector, qubit: usize) -> Result<(), QvecError> {
    state.check_qubit(qubit)?;
    let mask = 1usize << qubit;
    let dim = state.dim();
    let amps = state.amplitudes_mut();

    for i in 0..dim {
        // Visit each (bit=0, bit=1) pair exactly once, from its bit=0 member.
        if i & mask == 0 {
            let a0 = amps[i];
            let a1 = amps[i | mask];
            amps[i] = (a0 + a1) * FRAC_1_SQRT_2;
            amps[i | mask] = (a0 - a1) * FRAC_1_SQRT_2;
        }
    }
    Ok(())
}

/// Applies a controlled phase rotation of `theta` radians.
///
/// Every basis state whose `control` and `target` bits are both set has its
/// amplitude multiplied by e^(i*theta). This is the textbook diagonal form;
/// it permutes no amplitudes and therefore preserves the total probability
/// mass for any `theta`.
pub fn apply_controlled_phase(
    state: &mut StateVector,
    control: usize,
    target: usize,
    theta: f64,
) -> Result<(), QvecError> {
    state.check_qubit(control)?;
    state.check_qubit(target)?;
    if control == target {
        return Err(QvecError::InvalidOperation {
            message: format!("control and target qubits must differ (both {})", control),
        });
    }

    let phase = Complex::new(theta.cos(), theta.sin());
    let control_mask = 1usize << control;
    let target_mask = 1usize << target;
    let both = control_mask | target_mask;

    for (i, amp) in state.amplitudes_mut().iter_mut().enumerate() {
        if i & both == both {
            *amp *= phase;
        }
    }
    Ok(())
}

/// Reflects every amplitude about the mean amplitude: a <- 2S - a where
/// S = (sum of amplitudes) / 2^n. This is the second half of a Grover
/// iteration and is its own inverse.
pub fn apply_diffusion(state: &mut StateVector) -> Result<(), QvecError> {
    let dim = state.dim();
    let sum: Complex<f64> = state.amplitudes().iter().sum();
    let twice_mean = sum * (2.0 / dim as f64);

    for amp in state.amplitudes_mut() {
        *amp = twice_mean - *amp;
    }
    Ok(())
}

/// Oracle phase flip: negates the real part of the amplitude at
/// `target_index`, leaving the imaginary part untouched.
///
/// A full phase flip would negate both components; acting on the real part
/// alone matches the reference oracle this engine models, and coincides with
/// the full flip for the purely real states Grover circuits run on.
pub fn invert_phase(state: &mut StateVector, target_index: usize) -> Result<(), QvecError> {
    state.check_index(target_index)?;
    let amp = state.amplitude(target_index)?;
    state.set_amplitude(target_index, Complex::new(-amp.re, amp.im))
}

/// One amplitude-amplification step: oracle flip of `target_index` followed
/// by reflection about the mean.
pub fn grover_iteration(state: &mut StateVector, target_index: usize) -> Result<(), QvecError> {
    invert_phase(state, target_index)?;
    apply_diffusion(state)
}

/// Iteration count used by the amplitude-amplification demo circuits:
/// floor(pi/4 * sqrt(dim)) - 1, never below zero.
pub fn optimal_grover_iterations(dim: usize) -> usize {
    let ideal = (std::f64::consts::PI / 4.0 * (dim as f64).sqrt()) as usize;
    ideal.saturating_sub(1)
}

/// Computes the mean amplitude of a vector. Exposed for callers that want to
/// inspect the reflection axis used by [`apply_diffusion`].
pub fn mean_amplitude(state: &StateVector) -> Complex<f64> {
    let sum: Complex<f64> = state.amplitudes().iter().sum();
    sum / state.dim() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NORM_TOLERANCE;

    #[test]
    fn hadamard_on_every_qubit_yields_uniform_superposition() -> Result<(), QvecError> {
        for n in 1..=4 {
            let mut state = StateVector::new(n)?;
            for q in 0..n {
                apply_hadamard(&mut state, q)?;
            }
            let expected = 1.0 / (state.dim() as f64).sqrt();
            for i in 0..state.dim() {
                let amp = state.amplitude(i)?;
                assert!(
                    (amp.re - expected).abs() < NORM_TOLERANCE && amp.im.abs() < NORM_TOLERANCE,
                    "n={}, index {}: got {}, expected {}",
                    n, i, amp, expected
                );
            }
            assert!((state.total_probability() - 1.0).abs() < NORM_TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn hadamard_is_self_inverse() -> Result<(), QvecError> {
        let mut state = StateVector::new(2)?;
        apply_hadamard(&mut state, 1)?;
        apply_hadamard(&mut state, 1)?;
        assert!((state.probability(0)? - 1.0).abs() < NORM_TOLERANCE);
        Ok(())
    }

    #[test]
    fn controlled_phase_rejects_bad_qubits() -> Result<(), QvecError> {
        let mut state = StateVector::new(2)?;
        assert_eq!(
            apply_controlled_phase(&mut state, 0, 5, 0.1),
            Err(QvecError::QubitOutOfRange { qubit: 5, num_qubits: 2 })
        );
        assert!(matches!(
            apply_controlled_phase(&mut state, 1, 1, 0.1),
            Err(QvecError::InvalidOperation { .. })
        ));
        Ok(())
    }

    #[test]
    fn controlled_phase_only_touches_the_11_subspace() -> Result<(), QvecError> {
        let mut state = StateVector::uniform(2)?;
        apply_controlled_phase(&mut state, 0, 1, std::f64::consts::PI)?;
        // |11> is index 3; its amplitude picks up e^(i*pi) = -1.
        assert!((state.amplitude(3)?.re + 0.5).abs() < NORM_TOLERANCE);
        for i in 0..3 {
            assert!((state.amplitude(i)?.re - 0.5).abs() < NORM_TOLERANCE);
        }
        assert!((state.total_probability() - 1.0).abs() < NORM_TOLERANCE);
        Ok(())
    }

    #[test]
    fn diffusion_is_an_involution() -> Result<(), QvecError> {
        let mut state = StateVector::uniform(3)?;
        invert_phase(&mut state, 5)?;
        let before = state.clone();
        apply_diffusion(&mut state)?;
        apply_diffusion(&mut state)?;
        for i in 0..state.dim() {
            let diff = state.amplitude(i)? - before.amplitude(i)?;
            assert!(diff.norm() < NORM_TOLERANCE, "index {} diverged by {}", i, diff);
        }
        Ok(())
    }

    #[test]
    fn invert_phase_negates_only_the_real_part() -> Result<(), QvecError> {
        let mut state = StateVector::new(2)?;
        state.set_amplitude(2, Complex::new(0.6, 0.8))?;
        invert_phase(&mut state, 2)?;
        assert_eq!(state.amplitude(2)?, Complex::new(-0.6, 0.8));
        Ok(())
    }

    #[test]
    fn grover_iteration_count_matches_reference_values() {
        assert_eq!(optimal_grover_iterations(8), 1);
        assert_eq!(optimal_grover_iterations(4), 0);
        assert_eq!(optimal_grover_iterations(1), 0);
    }
}
