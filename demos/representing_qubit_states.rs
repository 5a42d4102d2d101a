//! Walks through statevectors, the measurement rule and the Bloch sphere
//! for a single qubit.

use std::f64::consts::FRAC_PI_2;

use anyhow::Result;
use log::info;
use nalgebra::Complex;
use rand::{rngs::StdRng, SeedableRng};
use simple_bloch::{
    measure::{measure, sample_counts},
    to_bloch_angles, Basis, BlochAngles, QState,
};

fn main() -> Result<()> {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
    let mut rng = StdRng::seed_from_u64(2021);
    let root2 = 2f64.sqrt();

    // |1>
    let state: QState = "1".parse()?;
    println!("Initial state |1>:\n{}", state);
    println!(
        "Counts: {}\n",
        sample_counts(&state, Basis::Z, 1024, &mut rng)
    );

    // |q0> = (|0> + i|1>)/√2
    let q0 = QState::new(Complex::new(1.0 / root2, 0.0), Complex::new(0.0, 1.0 / root2))?;
    println!("|q0>:\n{}", q0);
    let (p0, p1) = q0.probabilities();
    println!("p(|0>) = {:.3}, p(|1>) = {:.3}", p0, p1);
    println!("Counts: {}\n", sample_counts(&q0, Basis::Z, 1024, &mut rng));

    // Unnormalized vectors are rejected.
    let one = Complex::new(1.0, 0.0);
    match QState::new(one, one) {
        Ok(_) => println!("[1, 1] was accepted"),
        Err(err) => println!("[1, 1] is rejected: {}\n", err),
    }

    // i|1> and |1> give identical probabilities.
    let i_one = QState::new(Complex::new(0.0, 0.0), Complex::new(0.0, 1.0))?;
    println!(
        "i|1> equivalent to |1> up to global phase: {}\n",
        i_one.is_global_phase_equivalent(&QState::one(), 1e-12)
    );

    // Measuring collapses the state.
    let q = QState::new(Complex::new(0.0, 1.0 / root2), Complex::new(1.0 / root2, 0.0))?;
    info!("measuring {:?}", q.amplitudes());
    let measurement = measure(&q, Basis::Z, &mut rng);
    println!(
        "Measured {}, state of measured qubit:\n{}",
        measurement.outcome, measurement.collapsed
    );

    // |+> on the Bloch sphere
    let plus = BlochAngles::new(FRAC_PI_2, 0.0);
    println!("|+> at {} -> {}\n", plus, plus.to_cartesian(1.0));

    let states = [
        ("|0>", Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)),
        ("|1>", Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)),
        (
            "(|0> + |1>)/√2",
            Complex::new(1.0 / root2, 0.0),
            Complex::new(1.0 / root2, 0.0),
        ),
        (
            "(|0> - i|1>)/√2",
            Complex::new(1.0 / root2, 0.0),
            Complex::new(0.0, -1.0 / root2),
        ),
        (
            "[i, 1]/√2",
            Complex::new(0.0, 1.0 / root2),
            Complex::new(1.0 / root2, 0.0),
        ),
    ];
    for (label, alpha, beta) in states {
        let angles = to_bloch_angles(alpha, beta)?;
        println!(
            "{:>16}: {}  bloch vector {}",
            label,
            angles,
            angles.to_cartesian(1.0)
        );
    }

    Ok(())
}
