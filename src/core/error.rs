//! Error handling logic

use std::fmt;

/// Error types for every fallible engine operation.
///
/// Each variant corresponds to one category of failure the engine can detect
/// before it corrupts state: buffer acquisition, index arithmetic, numeric
/// domain violations, and worker-thread failures. There is deliberately no
/// variant for memory-safety faults; those are unreachable by construction.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum QvecError {
    /// A dynamic buffer request for an amplitude vector could not be satisfied.
    AllocationFailure {
        /// AllocationFailure failure message
        message: String
    },

    /// The requested qubit count produces a state dimension that overflows `usize`.
    DimensionOverflow {
        /// Requested number of qubits
        num_qubits: usize
    },

    /// A basis index falls outside the state vector's dimension.
    IndexOutOfRange {
        /// Offending basis index
        index: usize,
        /// Dimension of the state vector (2^n)
        dim: usize
    },

    /// A qubit index falls outside the register.
    QubitOutOfRange {
        /// Offending qubit index
        qubit: usize,
        /// Number of qubits in the register
        num_qubits: usize
    },

    /// Normalization, sampling, or phase arithmetic was evaluated at an
    /// undefined point (zero-mass vector, zero modulus, phase of zero amplitude).
    ArithmeticDomain {
        /// ArithmeticDomain failure message
        message: String
    },

    /// An operation's arguments are inconsistent with the current state
    /// (mismatched dimensions, control equal to target, zero workers).
    InvalidOperation {
        /// InvalidOperation failure message
        message: String
    },

    /// A worker thread could not be spawned, panicked, or returned an error.
    /// The whole run is treated as failed; no partial table is handed out.
    WorkerFailure {
        /// WorkerFailure failure message
        message: String
    },
}

impl fmt::Display for QvecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QvecError::AllocationFailure { message } => write!(f, "Allocation Failure: {}", message),
            QvecError::DimensionOverflow { num_qubits } => write!(f, "Dimension Overflow: 2^{} exceeds the addressable state space", num_qubits),
            QvecError::IndexOutOfRange { index, dim } => write!(f, "Index Out Of Range: basis index {} not in [0, {})", index, dim),
            QvecError::QubitOutOfRange { qubit, num_qubits } => write!(f, "Qubit Out Of Range: qubit {} not in [0, {})", qubit, num_qubits),
            QvecError::ArithmeticDomain { message } => write!(f, "Arithmetic Domain Error: {}", message),
            QvecError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            QvecError::WorkerFailure { message } => write!(f, "Worker Failure: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for QvecError {}
