use std::fmt::Display;
use std::str::FromStr;

use log::debug;
use nalgebra::Matrix2;

use crate::error::{InvalidStateError, ParseError};
use crate::gates::{parse_gate_list, Gate};
use crate::qstate::QState;
use crate::Qbit;

/// An ordered sequence of gates acting on one qubit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Circuit {
    gates: Vec<Gate>,
}

impl Circuit {
    pub fn new() -> Self {
        Self { gates: Vec::new() }
    }

    pub fn gate(mut self, gate: Gate) -> Self {
        self.add_gate(gate);
        self
    }

    pub fn add_gate(&mut self, gate: Gate) {
        self.gates.push(gate);
    }

    pub fn x(self) -> Self {
        self.gate(Gate::X)
    }

    pub fn y(self) -> Self {
        self.gate(Gate::Y)
    }

    pub fn z(self) -> Self {
        self.gate(Gate::Z)
    }

    pub fn h(self) -> Self {
        self.gate(Gate::H)
    }

    pub fn s(self) -> Self {
        self.gate(Gate::S)
    }

    pub fn sdg(self) -> Self {
        self.gate(Gate::Sdg)
    }

    pub fn t(self) -> Self {
        self.gate(Gate::T)
    }

    pub fn tdg(self) -> Self {
        self.gate(Gate::Tdg)
    }

    pub fn p(self, lambda: f64) -> Self {
        self.gate(Gate::P(lambda))
    }

    pub fn rx(self, theta: f64) -> Self {
        self.gate(Gate::RX(theta))
    }

    pub fn ry(self, theta: f64) -> Self {
        self.gate(Gate::RY(theta))
    }

    pub fn rz(self, theta: f64) -> Self {
        self.gate(Gate::RZ(theta))
    }

    pub fn u(self, theta: f64, phi: f64, lambda: f64) -> Self {
        self.gate(Gate::U { theta, phi, lambda })
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// The product of all gates, last gate leftmost.
    pub fn unitary(&self) -> Matrix2<Qbit> {
        self.gates
            .iter()
            .fold(Matrix2::identity(), |acc, gate| gate.matrix() * acc)
    }

    /// Applies the gates in order.
    ///
    /// Fails with [`InvalidStateError::NonFinite`] when a gate angle is not
    /// finite.
    pub fn apply(&self, state: &QState) -> Result<QState, InvalidStateError> {
        let mut result = state.state;
        for gate in &self.gates {
            result = gate.matrix() * result;
        }
        debug!("applied {} gate(s): {}", self.gates.len(), self);
        QState::from_unitary_output(result)
    }
}

impl Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.gates.is_empty() {
            return write!(f, "(empty)");
        }

        for (i, gate) in self.gates.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", gate)?;
        }

        Ok(())
    }
}

impl FromStr for Circuit {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            gates: parse_gate_list(text)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use crate::{assert_approx_complex_eq, assert_approx_eq, assert_approx_matrix_eq};

    use super::*;

    #[test]
    fn test_x_flips_zero() -> Result<(), InvalidStateError> {
        let result = Circuit::new().x().apply(&QState::zero())?;
        assert_approx_complex_eq!(0.0, 0.0, result.alpha());
        assert_approx_complex_eq!(1.0, 0.0, result.beta());
        Ok(())
    }

    #[test]
    fn test_hadamard_makes_plus() -> Result<(), InvalidStateError> {
        let result = Circuit::new().h().apply(&QState::zero())?;
        let r = 1.0 / 2f64.sqrt();
        assert_approx_complex_eq!(r, 0.0, result.alpha());
        assert_approx_complex_eq!(r, 0.0, result.beta());

        let result = Circuit::new().h().apply(&QState::one())?;
        assert_approx_complex_eq!(-r, 0.0, result.beta());
        Ok(())
    }

    #[test]
    fn test_y_on_zero() -> Result<(), InvalidStateError> {
        // Y|0> = i|1>
        let result = Circuit::new().y().apply(&QState::zero())?;
        assert_approx_complex_eq!(0.0, 1.0, result.beta());
        Ok(())
    }

    #[test]
    fn test_gates_cancel() -> Result<(), InvalidStateError> {
        let state = QState::plus_i();
        for circuit in [
            Circuit::new().s().sdg(),
            Circuit::new().t().tdg(),
            Circuit::new().h().h(),
            Circuit::new().x().x(),
        ] {
            let result = circuit.apply(&state)?;
            assert_approx_complex_eq!(state.alpha().re, state.alpha().im, result.alpha());
            assert_approx_complex_eq!(state.beta().re, state.beta().im, result.beta());
        }
        Ok(())
    }

    #[test]
    fn test_phase_moves_around_equator() -> Result<(), InvalidStateError> {
        let result = Circuit::new().h().p(FRAC_PI_4).apply(&QState::zero())?;
        let angles = result.bloch_angles();
        assert_approx_eq!(FRAC_PI_2, angles.theta);
        assert_approx_eq!(FRAC_PI_4, angles.phi);

        let result = Circuit::new().h().s().s().apply(&QState::zero())?;
        assert_approx_eq!(PI, result.bloch_angles().phi);
        Ok(())
    }

    #[test]
    fn test_parameterized_gate() -> Result<(), InvalidStateError> {
        let result = Circuit::new().rx(PI).apply(&QState::zero())?;
        assert_approx_complex_eq!(0.0, 0.0, result.alpha());
        assert_approx_complex_eq!(0.0, -1.0, result.beta());

        let result = Circuit::new().rx(PI / 2.0).apply(&QState::zero())?;
        assert_approx_complex_eq!(1.0 / 2f64.sqrt(), 0.0, result.alpha());
        assert_approx_complex_eq!(0.0, -1.0 / 2f64.sqrt(), result.beta());
        Ok(())
    }

    #[test]
    fn test_unitary_order() {
        // Applying H then S is the matrix S * H.
        let circuit = Circuit::new().h().s();
        let expected = Gate::S.matrix() * Gate::H.matrix();
        assert_approx_matrix_eq!(expected, circuit.unitary());
        assert_approx_matrix_eq!(Matrix2::identity(), Circuit::new().unitary());
    }

    #[test]
    fn test_apply_keeps_norm() -> Result<(), InvalidStateError> {
        let circuit = Circuit::new().h().t().rx(0.3).u(1.0, 2.0, 3.0).ry(-0.7).rz(0.1);
        let result = circuit.apply(&QState::zero())?;
        let (p0, p1) = result.probabilities();
        assert_approx_eq!(1.0, p0 + p1);
        Ok(())
    }

    #[test]
    fn test_parse_circuit() -> Result<(), ParseError> {
        let circuit: Circuit = "h, p(pi/4)".parse()?;
        assert_eq!(Circuit::new().h().p(FRAC_PI_4), circuit);
        assert_eq!("h -> p(0.7854)", circuit.to_string());
        assert_eq!("(empty)", Circuit::new().to_string());
        Ok(())
    }

    #[test]
    fn test_non_finite_angle_is_rejected() {
        let plus = QState::plus();
        for circuit in [
            Circuit::new().p(f64::NAN),
            Circuit::new().h().rx(f64::INFINITY),
            Circuit::new().u(0.0, f64::NEG_INFINITY, 0.0),
        ] {
            assert_eq!(Err(InvalidStateError::NonFinite), circuit.apply(&plus));
        }
    }
}
