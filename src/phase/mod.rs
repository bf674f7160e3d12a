// src/phase/mod.rs

//! Phase estimation: a schedule of controlled phase rotations parameterized by
//! a generator and a modulus, followed by the inverse Fourier-type transform.
//!
//! Like [`TwiddleCache`](crate::transform::TwiddleCache), the angle schedules
//! are lazily built once per (generator, modulus, qubit count) key and shared
//! read-only afterwards, so one estimator can serve every worker thread of a
//! run.

use crate::core::{AMPLITUDE_TOLERANCE, QvecError, StateVector};
use crate::gates::apply_controlled_phase;
use crate::transform::TransformEngine;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{Arc, Mutex};

/// Cache key for one angle schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ScheduleKey {
    generator: u64,
    modulus: u64,
    num_qubits: usize,
}

/// Composes the controlled-phase schedule with the inverse transform.
///
/// The schedule is triangular: for 0 <= j < k < n,
/// `angle[k][j] = 2*pi*generator^j / modulus^(k+1)`, applied with
/// control `n-1-j` and target `n-1-k`.
#[derive(Debug, Default)]
pub struct PhaseEstimator {
    schedules: Mutex<HashMap<ScheduleKey, Arc<Vec<Vec<f64>>>>>,
    transform: TransformEngine,
}

impl PhaseEstimator {
    /// Creates an estimator with empty schedule and twiddle caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the estimation circuit against `state` in place: every scheduled
    /// controlled phase rotation in (k, j) order, then the inverse transform.
    ///
    /// # Errors
    /// `ArithmeticDomain` for a zero modulus or a schedule angle that
    /// overflows to a non-finite value; any gate or transform error is
    /// propagated unchanged.
    pub fn estimate(
        &self,
        state: &mut StateVector,
        generator: u64,
        modulus: u64,
    ) -> Result<(), QvecError> {
        let n = state.num_qubits();
        let schedule = self.schedule(generator, modulus, n)?;

        for k in 0..n {
            for j in 0..k {
                // j < k guarantees control != target.
                apply_controlled_phase(state, n - 1 - j, n - 1 - k, schedule[k][j])?;
            }
        }

        self.transform.inverse_transform(state)
    }

    /// Returns the angle schedule for the given parameters, computing it on
    /// first use.
    fn schedule(
        &self,
        generator: u64,
        modulus: u64,
        num_qubits: usize,
    ) -> Result<Arc<Vec<Vec<f64>>>, QvecError> {
        if modulus == 0 {
            return Err(QvecError::ArithmeticDomain {
                message: "phase estimation modulus must be non-zero".to_string(),
            });
        }

        let key = ScheduleKey { generator, modulus, num_qubits };
        let mut schedules = self.schedules.lock().map_err(|_| QvecError::WorkerFailure {
            message: "phase schedule lock poisoned by a panicked thread".to_string(),
        })?;
        if let Some(schedule) = schedules.get(&key) {
            return Ok(Arc::clone(schedule));
        }

        let generator = generator as f64;
        let modulus = modulus as f64;
        let mut angles = Vec::with_capacity(num_qubits);
        for k in 0..num_qubits {
            let denominator = modulus.powi(k as i32 + 1);
            let mut row = Vec::with_capacity(k);
            for j in 0..k {
                let angle = 2.0 * PI * generator.powi(j as i32) / denominator;
                if !angle.is_finite() {
                    return Err(QvecError::ArithmeticDomain {
                        message: format!(
                            "schedule angle overflowed for generator^{} / modulus^{}",
                            j,
                            k + 1
                        ),
                    });
                }
                row.push(angle);
            }
            angles.push(row);
        }

        let schedule = Arc::new(angles);
        schedules.insert(key, Arc::clone(&schedule));
        Ok(schedule)
    }

    /// The transform engine (and its twiddle cache) backing this estimator.
    pub fn transform(&self) -> &TransformEngine {
        &self.transform
    }
}

/// Reads a phase expectation off one qubit: the sum of arg(amplitude) over
/// basis states whose `qubit` bit is set, normalized by 2^(n-1).
///
/// Amplitudes below the amplitude tolerance are skipped, because the argument
/// of a zero amplitude is undefined. If no amplitude in the qubit's "set"
/// subspace is significant the whole expectation is undefined and an
/// `ArithmeticDomain` error is returned instead of a silent 0.
pub fn phase_expectation(state: &StateVector, qubit: usize) -> Result<f64, QvecError> {
    state.check_qubit(qubit)?;
    let mask = 1usize << qubit;

    let mut sum = 0.0;
    let mut significant = 0usize;
    for (i, amp) in state.amplitudes().iter().enumerate() {
        if i & mask != 0 && amp.norm_sqr() > AMPLITUDE_TOLERANCE {
            sum += amp.arg();
            significant += 1;
        }
    }

    if significant == 0 {
        return Err(QvecError::ArithmeticDomain {
            message: format!("phase of qubit {} is undefined: no significant amplitude has its bit set", qubit),
        });
    }

    let half_dim = (state.dim() / 2) as f64;
    Ok(sum / half_dim)
}
