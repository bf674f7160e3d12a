// src/transform/mod.rs

//! The discrete Fourier-type transform and its shared table of rotation
//! factors.
//!
//! [`TwiddleCache`] is an explicit service object rather than a process-wide
//! static: construct one (cheap, empty) at startup and hand it by shared
//! reference to everything that transforms. Tables are built lazily, once per
//! size, under a mutex, so concurrent first use from many worker threads sees
//! exactly one winner compute the table while the rest wait on the lock.

use crate::core::{QvecError, StateVector};
use num_complex::Complex;
use num_traits::Zero;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{Arc, Mutex};

/// Lazily computed, immutable tables of rotation factors, keyed by qubit
/// count. For size n, entry j holds e^(-2*pi*i*j/2^n) / 2^n.
///
/// The 1/2^n scaling folds the transform's normalization into the table, as
/// the reference implementation does; it is why the transform below is not
/// norm-preserving.
#[derive(Debug, Default)]
pub struct TwiddleCache {
    tables: Mutex<HashMap<usize, Arc<[Complex<f64>]>>>,
}

impl TwiddleCache {
    /// Creates an empty cache. No table is computed until first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the factor table for `num_qubits`, computing it on first use.
    pub fn table(&self, num_qubits: usize) -> Result<Arc<[Complex<f64>]>, QvecError> {
        let dim = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or(QvecError::DimensionOverflow { num_qubits })?;

        let mut tables = self.tables.lock().map_err(|_| QvecError::WorkerFailure {
            message: "twiddle cache lock poisoned by a panicked thread".to_string(),
        })?;
        if let Some(table) = tables.get(&num_qubits) {
            return Ok(Arc::clone(table));
        }

        let scale = 1.0 / dim as f64;
        let mut factors = Vec::new();
        factors.try_reserve_exact(dim).map_err(|e| QvecError::AllocationFailure {
            message: format!("failed to reserve {} twiddle factors: {}", dim, e),
        })?;
        for j in 0..dim {
            let theta = -2.0 * PI * j as f64 / dim as f64;
            factors.push(Complex::new(theta.cos(), theta.sin()) * scale);
        }

        let table: Arc<[Complex<f64>]> = factors.into();
        tables.insert(num_qubits, Arc::clone(&table));
        Ok(table)
    }

    /// Single-factor lookup. `index` is reduced modulo 2^n, so products of
    /// basis indices can be passed directly.
    pub fn factor(&self, num_qubits: usize, index: usize) -> Result<Complex<f64>, QvecError> {
        let table = self.table(num_qubits)?;
        Ok(table[index % table.len()])
    }
}

/// Applies the direct (not fast) inverse Fourier-type transform using a
/// shared [`TwiddleCache`].
#[derive(Debug, Default)]
pub struct TransformEngine {
    twiddles: TwiddleCache,
}

impl TransformEngine {
    /// Creates an engine with its own empty twiddle cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transforms the vector in place:
    /// out[i] = sum over j of in[j] * factor[(i*j) mod 2^n].
    ///
    /// This is the O(4^n) direct sum, acceptable only for the small registers
    /// this engine targets. The factor index is taken modulo 2^n, the
    /// textbook convention for the inverse transform. Because the factors
    /// carry a 1/2^n scale, the output mass shrinks by 2^n; callers that
    /// sample afterwards rely on the sampler's renormalization.
    pub fn inverse_transform(&self, state: &mut StateVector) -> Result<(), QvecError> {
        let n = state.num_qubits();
        let dim = state.dim();
        let table = self.twiddles.table(n)?;

        let mut out = Vec::new();
        out.try_reserve_exact(dim).map_err(|e| QvecError::AllocationFailure {
            message: format!("failed to reserve {} transform outputs: {}", dim, e),
        })?;

        for i in 0..dim {
            let mut sum = Complex::zero();
            for (j, amp) in state.amplitudes().iter().enumerate() {
                sum += amp * table[(i * j) % dim];
            }
            out.push(sum);
        }

        state.replace_amplitudes(out)
    }

    /// Shared access to the underlying factor cache.
    pub fn twiddles(&self) -> &TwiddleCache {
        &self.twiddles
    }
}
