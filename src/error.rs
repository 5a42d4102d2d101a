use thiserror::Error;

/// A pair of amplitudes that does not describe a qubit state.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidStateError {
    /// `|α|² + |β|²` is farther than `tolerance` from 1.
    #[error("statevector is not normalized: |alpha|^2 + |beta|^2 = {norm_sqr} (tolerance {tolerance})")]
    NotNormalized { norm_sqr: f64, tolerance: f64 },

    #[error("statevector amplitudes must be finite")]
    NonFinite,

    /// Tolerances must be finite and lie in `[0, 1)`.
    #[error("invalid normalization tolerance {0} (expected a finite value in [0, 1))")]
    InvalidTolerance(f64),
}

/// Errors raised while reading states, gates and bases from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown state label '{0}' (expected one of 0, 1, +, -, r, l)")]
    UnknownState(String),

    #[error("unknown gate '{0}'")]
    UnknownGate(String),

    #[error("unknown measurement basis '{0}' (expected z, x or y)")]
    UnknownBasis(String),

    #[error("gate '{gate}' takes {expected} angle(s), but {actual} were given")]
    WrongArity {
        gate: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid angle '{0}'")]
    InvalidAngle(String),

    #[error("malformed gate expression '{0}'")]
    Malformed(String),
}
