use std::fmt::Display;
use std::str::FromStr;

use nalgebra::Vector2;
use num_complex::Complex;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::{
    bloch::{angles_of, BlochAngles, BlochVector},
    error::{InvalidStateError, ParseError},
    validate::{validate, validate_with_tolerance, DEFAULT_TOLERANCE},
    Qbit,
};

/// A normalized single-qubit statevector `α|0⟩ + β|1⟩`.
#[derive(Clone, Debug, PartialEq)]
pub struct QState {
    pub(crate) state: Vector2<Qbit>,
}

impl QState {
    pub fn new(alpha: Qbit, beta: Qbit) -> Result<Self, InvalidStateError> {
        validate(alpha, beta)?;
        Ok(Self {
            state: Vector2::new(alpha, beta),
        })
    }

    pub fn with_tolerance(
        alpha: Qbit,
        beta: Qbit,
        tolerance: f64,
    ) -> Result<Self, InvalidStateError> {
        validate_with_tolerance(alpha, beta, tolerance)?;
        Ok(Self {
            state: Vector2::new(alpha, beta),
        })
    }

    /// Rescales any finite, non-zero pair of amplitudes to unit norm.
    pub fn normalized(alpha: Qbit, beta: Qbit) -> Result<Self, InvalidStateError> {
        if !alpha.is_finite() || !beta.is_finite() {
            return Err(InvalidStateError::NonFinite);
        }

        let norm_sqr = alpha.norm_sqr() + beta.norm_sqr();
        if norm_sqr == 0.0 {
            return Err(InvalidStateError::NotNormalized {
                norm_sqr,
                tolerance: DEFAULT_TOLERANCE,
            });
        }

        let norm = norm_sqr.sqrt();
        Ok(Self {
            state: Vector2::new(alpha / norm, beta / norm),
        })
    }

    /// `cos(θ/2)|0⟩ + e^(iφ)sin(θ/2)|1⟩`
    ///
    /// Fails with [`InvalidStateError::NonFinite`] when an angle is not finite.
    pub fn from_bloch(angles: &BlochAngles) -> Result<Self, InvalidStateError> {
        let (alpha, beta) = angles.to_amplitudes();
        Self::new(alpha, beta)
    }

    /// Haar-random state.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let mut sample = || rng.sample::<f64, _>(StandardNormal);
            let alpha = Complex::new(sample(), sample());
            let beta = Complex::new(sample(), sample());
            if let Ok(state) = Self::normalized(alpha, beta) {
                return state;
            }
        }
    }

    pub(crate) fn from_vector(state: Vector2<Qbit>) -> Self {
        Self { state }
    }

    /// Renormalizes the result of a unitary, which drifts by rounding only.
    ///
    /// A gate built from a non-finite angle poisons the amplitudes, so those
    /// are rejected here.
    pub(crate) fn from_unitary_output(state: Vector2<Qbit>) -> Result<Self, InvalidStateError> {
        if !state.iter().all(|amp| amp.is_finite()) {
            return Err(InvalidStateError::NonFinite);
        }

        let norm = state.norm();
        let state = state.unscale(norm);
        validate(state[0], state[1])?;
        Ok(Self { state })
    }

    /// |0⟩
    pub fn zero() -> Self {
        Self::from_vector(Vector2::new(Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)))
    }

    /// |1⟩
    pub fn one() -> Self {
        Self::from_vector(Vector2::new(Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)))
    }

    /// |+⟩ = (|0⟩ + |1⟩)/√2
    pub fn plus() -> Self {
        let r = Complex::new(1.0 / 2f64.sqrt(), 0.0);
        Self::from_vector(Vector2::new(r, r))
    }

    /// |−⟩ = (|0⟩ − |1⟩)/√2
    pub fn minus() -> Self {
        let r = Complex::new(1.0 / 2f64.sqrt(), 0.0);
        Self::from_vector(Vector2::new(r, -r))
    }

    /// |+i⟩ = (|0⟩ + i|1⟩)/√2
    pub fn plus_i() -> Self {
        let r = 1.0 / 2f64.sqrt();
        Self::from_vector(Vector2::new(Complex::new(r, 0.0), Complex::new(0.0, r)))
    }

    /// |−i⟩ = (|0⟩ − i|1⟩)/√2
    pub fn minus_i() -> Self {
        let r = 1.0 / 2f64.sqrt();
        Self::from_vector(Vector2::new(Complex::new(r, 0.0), Complex::new(0.0, -r)))
    }

    pub fn alpha(&self) -> Qbit {
        self.state[0]
    }

    pub fn beta(&self) -> Qbit {
        self.state[1]
    }

    pub fn amplitudes(&self) -> (Qbit, Qbit) {
        (self.state[0], self.state[1])
    }

    pub fn bloch_angles(&self) -> BlochAngles {
        angles_of(self.alpha(), self.beta())
    }

    pub fn bloch_vector(&self) -> BlochVector {
        BlochVector::from_state(self)
    }

    /// Probabilities of reading `0` and `1` in the computational basis.
    pub fn probabilities(&self) -> (f64, f64) {
        (self.alpha().norm_sqr(), self.beta().norm_sqr())
    }

    /// `⟨self|other⟩`
    pub fn inner(&self, other: &QState) -> Qbit {
        self.state.dotc(&other.state)
    }

    /// True when the two states differ only by a global phase.
    pub fn is_global_phase_equivalent(&self, other: &QState, eps: f64) -> bool {
        (1.0 - self.inner(other).norm_sqr()).abs() < eps
    }
}

impl FromStr for QState {
    type Err = ParseError;

    /// Reads the single-qubit labels `0`, `1`, `+`, `-`, `r` (|+i⟩) and `l` (|−i⟩).
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim() {
            "0" => Ok(Self::zero()),
            "1" => Ok(Self::one()),
            "+" => Ok(Self::plus()),
            "-" => Ok(Self::minus()),
            "r" => Ok(Self::plus_i()),
            "l" => Ok(Self::minus_i()),
            other => Err(ParseError::UnknownState(other.to_string())),
        }
    }
}

impl Display for QState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, value) in self.state.iter().enumerate() {
            writeln!(f, "|{}>: {}", i, value)?;
        }

        Ok(())
    }
}

impl From<QState> for Vector2<Qbit> {
    fn from(qstate: QState) -> Self {
        qstate.state
    }
}
