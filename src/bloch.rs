//! Bloch-sphere coordinates of single-qubit states.
//!
//! Any normalized qubit state can be written, up to a global phase, as
//!
//! |ψ⟩ = cos(θ/2)|0⟩ + e^(iφ)sin(θ/2)|1⟩
//!
//! so `(θ, φ)` name a point on the unit sphere. Here θ ∈ [0, π] is measured
//! from the |0⟩ pole and φ ∈ (−π, π] is the relative phase `arg(β) − arg(α)`.

use std::f64::consts::PI;
use std::fmt::Display;

use log::trace;
use num_complex::Complex;

use crate::{
    error::InvalidStateError,
    observable::Pauli,
    qstate::QState,
    validate::{validate_with_tolerance, DEFAULT_TOLERANCE},
    Qbit,
};

/// Spherical coordinates of a qubit state on the Bloch sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlochAngles {
    /// Polar angle θ ∈ [0, π].
    pub theta: f64,
    /// Azimuthal angle φ ∈ (−π, π].
    pub phi: f64,
}

/// A point in the Bloch ball in cartesian coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    /// +1 is |0⟩, −1 is |1⟩.
    pub z: f64,
}

/// Converts normalized amplitudes `(α, β)` into Bloch angles.
///
/// Fails with [`InvalidStateError`] when `|α|² + |β|²` is not 1 within
/// [`DEFAULT_TOLERANCE`] or when an amplitude is not finite.
///
/// When `α` is exactly zero its phase is undefined and φ is taken to be
/// `arg(β)`. In every other case states that differ only by a global phase
/// convert to the same angles.
pub fn to_bloch_angles(alpha: Qbit, beta: Qbit) -> Result<BlochAngles, InvalidStateError> {
    to_bloch_angles_with_tolerance(alpha, beta, DEFAULT_TOLERANCE)
}

pub fn to_bloch_angles_with_tolerance(
    alpha: Qbit,
    beta: Qbit,
    tolerance: f64,
) -> Result<BlochAngles, InvalidStateError> {
    validate_with_tolerance(alpha, beta, tolerance)?;
    Ok(angles_of(alpha, beta))
}

/// Bloch angles of amplitudes that are already known to be normalized.
pub(crate) fn angles_of(alpha: Qbit, beta: Qbit) -> BlochAngles {
    // |α| can exceed 1 by up to the tolerance.
    let theta = 2.0 * alpha.norm().clamp(0.0, 1.0).acos();

    let phi = if alpha == Qbit::new(0.0, 0.0) {
        wrap_phase(beta.arg())
    } else {
        wrap_phase(beta.arg() - alpha.arg())
    };

    trace!(
        "alpha={} beta={} -> theta={:.6} phi={:.6}",
        alpha,
        beta,
        theta,
        phi
    );

    BlochAngles { theta, phi }
}

/// Maps any angle into (−π, π].
pub fn wrap_phase(phi: f64) -> f64 {
    if phi > -PI && phi <= PI {
        return phi;
    }

    // rem_euclid can round up to exactly 2π
    let wrapped = PI - (PI - phi).rem_euclid(2.0 * PI);
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

impl BlochAngles {
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// The representative statevector `(cos θ/2, e^(iφ) sin θ/2)`.
    pub fn to_amplitudes(&self) -> (Qbit, Qbit) {
        let half = self.theta / 2.0;
        (
            Complex::new(half.cos(), 0.0),
            Complex::from_polar(half.sin(), self.phi),
        )
    }

    /// Projects the angles onto a sphere of the given radius.
    pub fn to_cartesian(&self, radius: f64) -> BlochVector {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        BlochVector {
            x: radius * sin_theta * cos_phi,
            y: radius * sin_theta * sin_phi,
            z: radius * cos_theta,
        }
    }
}

impl Display for BlochAngles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "θ = {:.6}, φ = {:.6}", self.theta, self.phi)
    }
}

impl BlochVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Bloch vector of a state from its Pauli expectation values
    /// `(⟨X⟩, ⟨Y⟩, ⟨Z⟩)`.
    pub fn from_state(state: &QState) -> Self {
        Self {
            x: Pauli::X.expectation_value(state),
            y: Pauli::Y.expectation_value(state),
            z: Pauli::Z.expectation_value(state),
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Spherical angles of the vector; the zero vector maps to `(0, 0)`.
    pub fn to_angles(&self) -> BlochAngles {
        let r = self.magnitude();
        if r < 1e-12 {
            return BlochAngles::new(0.0, 0.0);
        }

        let theta = (self.z / r).clamp(-1.0, 1.0).acos();
        let phi = wrap_phase(self.y.atan2(self.x));
        BlochAngles { theta, phi }
    }
}

impl Display for BlochVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}
