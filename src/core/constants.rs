//! Numeric tolerances shared across the engine.

/// Floating-point tolerances used by gates, sampling, and validation.
pub mod tolerances {
    /// Allowed deviation of the total probability mass from 1.0.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Threshold below which a squared amplitude is treated as zero.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
}
