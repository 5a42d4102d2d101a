//! The single-qubit gates and what they do to a state on the Bloch sphere.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use anyhow::{Context, Result};
use nalgebra::Complex;
use rand::{rngs::StdRng, SeedableRng};
use simple_bloch::{
    gates::{equal_up_to_global_phase, h_matrix},
    measure::sample_counts,
    Basis, Circuit, QState,
};

fn show(title: &str, circuit: &Circuit, state: &QState) -> Result<()> {
    let result = circuit
        .apply(state)
        .with_context(|| format!("failed to apply {}", circuit))?;
    println!("{} [{}]", title, circuit);
    print!("{}", result);
    println!(
        "bloch angles: {}, vector: {}\n",
        result.bloch_angles(),
        result.bloch_vector()
    );
    Ok(())
}

fn main() -> Result<()> {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
    let mut rng = StdRng::seed_from_u64(42);
    let zero = QState::zero();

    // Pauli gates
    show("X|0>", &Circuit::new().x(), &zero)?;
    show("Y|0>", &Circuit::new().y(), &zero)?;
    show("Z|0>", &Circuit::new().z(), &zero)?;

    // Hadamard
    show("H|0>", &Circuit::new().h(), &zero)?;
    show("H|1>", &Circuit::new().h(), &QState::one())?;

    // Measuring |-> in the X basis, once directly and once as H then Z.
    let minus = QState::new(
        Complex::new(1.0 / 2f64.sqrt(), 0.0),
        Complex::new(-1.0 / 2f64.sqrt(), 0.0),
    )?;
    println!(
        "|-> measured in X: {}",
        sample_counts(&minus, Basis::X, 1024, &mut rng)
    );
    let rotated = Circuit::new().h().apply(&minus)?;
    println!(
        "H|-> measured in Z: {}\n",
        sample_counts(&rotated, Basis::Z, 1024, &mut rng)
    );

    // Phase gates
    let plus = QState::plus();
    show("P(pi/4)|+>", &Circuit::new().p(FRAC_PI_4), &plus)?;
    show("S Sdg|+>", &Circuit::new().s().sdg(), &plus)?;
    show("T Tdg|+>", &Circuit::new().t().tdg(), &plus)?;

    // U(pi/2, 0, pi) is the Hadamard gate.
    let u = Circuit::new().u(FRAC_PI_2, 0.0, PI);
    show("U(pi/2, 0, pi)|0>", &u, &zero)?;
    println!(
        "U(pi/2, 0, pi) == H: {}",
        equal_up_to_global_phase(&u.unitary(), &h_matrix(), 1e-12)
    );

    Ok(())
}
