// src/lib.rs

//! `qvec` - A classical state-vector engine for simulating small quantum circuits
//!
//! The engine models an n-qubit register as a flat vector of 2^n complex
//! amplitudes and provides the recurring machinery the toy circuits share:
//! in-place gate application, a discrete Fourier-type transform backed by a
//! shared twiddle cache, a phase-estimation schedule, probabilistic and
//! deterministic measurement, and a worker-thread harness that aggregates
//! measurement outcomes under a single lock.

pub mod core;
pub mod gates;
pub mod transform;
pub mod phase;
pub mod sampling;
pub mod parallel;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{QvecError, StateVector};
pub use parallel::{MeasurementTable, ParallelExecutor};
pub use phase::{PhaseEstimator, phase_expectation};
pub use sampling::{argmax, measure};
pub use transform::{TransformEngine, TwiddleCache};
pub use validation::check_normalization;

// Example 1: Amplitude amplification
// Starts from the uniform superposition, phase-flips a marked index, reflects
// about the mean, and reads the amplified index back deterministically.
/// ```
/// use qvec::{QvecError, StateVector, argmax};
/// use qvec::gates::{grover_iteration, optimal_grover_iterations};
///
/// let mut state = StateVector::uniform(3)?; // 8 basis states
/// let target = 3;
///
/// for _ in 0..optimal_grover_iterations(state.dim()) {
///     grover_iteration(&mut state, target)?;
/// }
///
/// // One iteration is enough to make the marked index the most likely one.
/// assert_eq!(argmax(&state), target);
/// assert!(state.probability(target)? > 1.0 / 8.0);
/// # Ok::<(), QvecError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Parallel phase-estimation trials
// Each worker runs the estimation circuit against its own private vector and
// samples one outcome; the executor merges the outcomes into a histogram.
/// ```
/// use qvec::{ParallelExecutor, PhaseEstimator, QvecError, StateVector, measure};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let estimator = PhaseEstimator::new();
/// let executor = ParallelExecutor::new(4)?;
///
/// let table = executor.run(16, |trial| {
///     // Private copy per trial: no shared vector, no vector-level locking.
///     let mut state = StateVector::new(4)?;
///     estimator.estimate(&mut state, 7, 15)?;
///     let mut rng = StdRng::seed_from_u64(trial as u64);
///     Ok(measure(&state, &mut rng)? as u64)
/// })?;
///
/// assert_eq!(table.total(), 16);
/// println!("{}", table);
/// # Ok::<(), QvecError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
