// src/core/state.rs

use crate::core::QvecError;
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// A basis-indexed vector of complex amplitudes for an n-qubit register.
///
/// The vector has fixed length 2^n; index `i` is the basis state whose bit
/// pattern is `i`. The norm invariant (sum of squared magnitudes ≈ 1) is soft:
/// every gate is expected to maintain it, but the engine never enforces it,
/// and the transform in [`crate::transform`] deliberately shrinks it.
///
/// Ownership: a `StateVector` belongs to the circuit run that created it.
/// Worker threads that need one take a private clone rather than sharing.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    /// Amplitudes, one per basis state, in basis-index order.
    amplitudes: Vec<Complex<f64>>,
    /// Number of qubits n, with `amplitudes.len() == 2^n`.
    num_qubits: usize,
}

impl StateVector {
    /// Creates the vector |0...0> for `num_qubits` qubits: amplitude 1 at
    /// index 0, zero elsewhere.
    ///
    /// # Errors
    /// * `InvalidOperation` for a zero-qubit register.
    /// * `DimensionOverflow` when 2^n does not fit in `usize`.
    /// * `AllocationFailure` when the amplitude buffer cannot be reserved.
    pub fn new(num_qubits: usize) -> Result<Self, QvecError> {
        let mut state = Self::zeroed(num_qubits)?;
        state.amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(state)
    }

    /// Creates the uniform superposition: every amplitude equal to 1/sqrt(2^n).
    ///
    /// Equivalent to applying the superposition gate to every qubit of a fresh
    /// vector, without the 2^n log(2^n) gate applications.
    pub fn uniform(num_qubits: usize) -> Result<Self, QvecError> {
        let mut state = Self::zeroed(num_qubits)?;
        let amp = Complex::new(1.0 / (state.dim() as f64).sqrt(), 0.0);
        state.amplitudes.fill(amp);
        Ok(state)
    }

    /// Allocates a zeroed amplitude buffer, surfacing every failure mode
    /// explicitly rather than letting the allocator abort.
    fn zeroed(num_qubits: usize) -> Result<Self, QvecError> {
        if num_qubits == 0 {
            return Err(QvecError::InvalidOperation {
                message: "cannot build a state vector for zero qubits".to_string(),
            });
        }
        let dim = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or(QvecError::DimensionOverflow { num_qubits })?;

        let mut amplitudes = Vec::new();
        amplitudes.try_reserve_exact(dim).map_err(|e| QvecError::AllocationFailure {
            message: format!("failed to reserve {} amplitudes: {}", dim, e),
        })?;
        amplitudes.resize(dim, Complex::zero());

        Ok(Self { amplitudes, num_qubits })
    }

    /// Number of qubits n represented by this vector.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension of the vector (2^n basis states).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Returns the amplitude at basis index `index`.
    pub fn amplitude(&self, index: usize) -> Result<Complex<f64>, QvecError> {
        self.check_index(index)?;
        Ok(self.amplitudes[index])
    }

    /// Overwrites the amplitude at basis index `index`.
    pub fn set_amplitude(&mut self, index: usize, value: Complex<f64>) -> Result<(), QvecError> {
        self.check_index(index)?;
        self.amplitudes[index] = value;
        Ok(())
    }

    /// Returns |amplitude[index]|^2, the probability of observing `index`.
    pub fn probability(&self, index: usize) -> Result<f64, QvecError> {
        self.check_index(index)?;
        Ok(self.amplitudes[index].norm_sqr())
    }

    /// Sum of squared magnitudes over the whole vector.
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Rescales the vector so its total probability mass is 1.
    ///
    /// # Errors
    /// `ArithmeticDomain` when the total mass is zero (the rescale would
    /// divide by zero).
    pub fn normalize(&mut self) -> Result<(), QvecError> {
        let mass = self.total_probability();
        if mass <= 0.0 {
            return Err(QvecError::ArithmeticDomain {
                message: "cannot normalize a zero-mass state vector".to_string(),
            });
        }
        let norm = mass.sqrt();
        for amp in &mut self.amplitudes {
            *amp /= norm;
        }
        Ok(())
    }

    /// Provides read-only access to the amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Mutable access for the gate and transform implementations.
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Replaces the whole amplitude buffer. Dimension must match.
    pub(crate) fn replace_amplitudes(&mut self, amplitudes: Vec<Complex<f64>>) -> Result<(), QvecError> {
        if amplitudes.len() != self.dim() {
            return Err(QvecError::InvalidOperation {
                message: format!(
                    "replacement vector has dimension {}, expected {}",
                    amplitudes.len(),
                    self.dim()
                ),
            });
        }
        self.amplitudes = amplitudes;
        Ok(())
    }

    /// Rejects a basis index outside [0, 2^n).
    pub(crate) fn check_index(&self, index: usize) -> Result<(), QvecError> {
        if index >= self.dim() {
            Err(QvecError::IndexOutOfRange { index, dim: self.dim() })
        } else {
            Ok(())
        }
    }

    /// Rejects a qubit index outside [0, n).
    pub(crate) fn check_qubit(&self, qubit: usize) -> Result<(), QvecError> {
        if qubit >= self.num_qubits {
            Err(QvecError::QubitOutOfRange { qubit, num_qubits: self.num_qubits })
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
