use nalgebra::Matrix2;

use crate::{
    gates::{x_matrix, y_matrix, z_matrix},
    qstate::QState,
};

/// A weighted sum of single-qubit Pauli operators.
pub struct Observable {
    operators: Vec<PauliOperator>,
}

impl Observable {
    pub fn new() -> Self {
        Self {
            operators: Vec::new(),
        }
    }

    pub fn add_pauli_operator(&mut self, coefficient: f64, kind: Pauli) {
        self.operators.push(PauliOperator { coefficient, kind });
    }

    pub fn expectation_value(&self, qstate: &QState) -> f64 {
        self.operators
            .iter()
            .map(|operator| operator.coefficient * operator.kind.expectation_value(qstate))
            .sum()
    }
}

impl Default for Observable {
    fn default() -> Self {
        Self::new()
    }
}

struct PauliOperator {
    coefficient: f64,
    kind: Pauli,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    pub fn matrix(&self) -> Matrix2<crate::Qbit> {
        match self {
            Pauli::I => Matrix2::identity(),
            Pauli::X => x_matrix(),
            Pauli::Y => y_matrix(),
            Pauli::Z => z_matrix(),
        }
    }

    /// `⟨ψ|P|ψ⟩`, which is real because Pauli matrices are Hermitian.
    pub fn expectation_value(&self, qstate: &QState) -> f64 {
        let state = &qstate.state;
        state.dotc(&(self.matrix() * state)).re
    }
}
