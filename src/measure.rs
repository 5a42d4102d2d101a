//! The measurement rule `p(|x⟩) = |⟨x|ψ⟩|²` and sampling from it.

use std::fmt::Display;
use std::str::FromStr;

use log::debug;
use rand::Rng;

use crate::error::ParseError;
use crate::qstate::QState;

/// An orthonormal pair of states a measurement chooses between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Basis {
    /// |0⟩ / |1⟩
    #[default]
    Z,
    /// |+⟩ / |−⟩
    X,
    /// |+i⟩ / |−i⟩
    Y,
}

impl Basis {
    /// The basis states reported as outcome `0` and `1`.
    pub fn states(&self) -> (QState, QState) {
        match self {
            Basis::Z => (QState::zero(), QState::one()),
            Basis::X => (QState::plus(), QState::minus()),
            Basis::Y => (QState::plus_i(), QState::minus_i()),
        }
    }
}

impl FromStr for Basis {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "z" => Ok(Basis::Z),
            "x" => Ok(Basis::X),
            "y" => Ok(Basis::Y),
            other => Err(ParseError::UnknownBasis(other.to_string())),
        }
    }
}

impl Display for Basis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Basis::Z => "z",
            Basis::X => "x",
            Basis::Y => "y",
        };
        write!(f, "{}", name)
    }
}

/// Probability of finding `state` in `outcome`.
pub fn probability(outcome: &QState, state: &QState) -> f64 {
    outcome.inner(state).norm_sqr()
}

/// Probabilities of outcome `0` and `1` in `basis`.
pub fn outcome_probabilities(state: &QState, basis: Basis) -> (f64, f64) {
    let (zero, one) = basis.states();
    (probability(&zero, state), probability(&one, state))
}

/// Result of a single measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub outcome: u8,
    /// The state after measuring: the basis state of the outcome.
    pub collapsed: QState,
}

fn sample_outcome<R: Rng + ?Sized>(p0: f64, rng: &mut R) -> u8 {
    if rng.random::<f64>() < p0 {
        0
    } else {
        1
    }
}

/// Measures `state` once, collapsing it onto the observed basis state.
pub fn measure<R: Rng + ?Sized>(state: &QState, basis: Basis, rng: &mut R) -> Measurement {
    let (zero, one) = basis.states();
    let p0 = probability(&zero, state);
    let outcome = sample_outcome(p0, rng);

    debug!("measured {} in {} basis (p0={:.6})", outcome, basis, p0);

    let collapsed = if outcome == 0 { zero } else { one };
    Measurement { outcome, collapsed }
}

/// Histogram of outcomes over repeated shots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    counts: [usize; 2],
}

impl Counts {
    pub fn get(&self, outcome: u8) -> usize {
        self.counts.get(outcome as usize).copied().unwrap_or(0)
    }

    pub fn shots(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Outcomes that occurred at least once, as `("0", n)` / `("1", n)`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        ["0", "1"]
            .into_iter()
            .zip(self.counts.iter().copied())
            .filter(|&(_, count)| count > 0)
    }

    /// Relative frequency of `outcome`; zero when no shots were taken.
    pub fn frequency(&self, outcome: u8) -> f64 {
        match self.shots() {
            0 => 0.0,
            shots => self.get(outcome) as f64 / shots as f64,
        }
    }
}

impl Display for Counts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (label, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {}", label, count)?;
        }
        write!(f, "}}")
    }
}

/// Prepares and measures `state` `shots` times.
pub fn sample_counts<R: Rng + ?Sized>(
    state: &QState,
    basis: Basis,
    shots: usize,
    rng: &mut R,
) -> Counts {
    let (p0, _) = outcome_probabilities(state, basis);

    let mut counts = Counts::default();
    for _ in 0..shots {
        counts.counts[sample_outcome(p0, rng) as usize] += 1;
    }

    debug!(
        "sampled {} shots in {} basis (p0={:.6}): {}",
        shots, basis, p0, counts
    );
    counts
}
