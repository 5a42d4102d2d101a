//! The normalization check required by the measurement rule.

use crate::{error::InvalidStateError, Qbit};

/// Accepted deviation of `|α|² + |β|²` from 1.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Checks that `(α, β)` is normalized within [`DEFAULT_TOLERANCE`].
pub fn validate(alpha: Qbit, beta: Qbit) -> Result<(), InvalidStateError> {
    validate_with_tolerance(alpha, beta, DEFAULT_TOLERANCE)
}

/// Checks that `(α, β)` is made of finite numbers and that
/// `| |α|² + |β|² - 1 | <= tolerance`.
///
/// `tolerance` must be finite and in `[0, 1)`. The zero vector is rejected
/// whatever the tolerance.
pub fn validate_with_tolerance(
    alpha: Qbit,
    beta: Qbit,
    tolerance: f64,
) -> Result<(), InvalidStateError> {
    if !(0.0..1.0).contains(&tolerance) {
        return Err(InvalidStateError::InvalidTolerance(tolerance));
    }

    if !alpha.is_finite() || !beta.is_finite() {
        return Err(InvalidStateError::NonFinite);
    }

    let norm_sqr = alpha.norm_sqr() + beta.norm_sqr();
    if norm_sqr == 0.0 || (norm_sqr - 1.0).abs() > tolerance {
        return Err(InvalidStateError::NotNormalized {
            norm_sqr,
            tolerance,
        });
    }

    Ok(())
}
