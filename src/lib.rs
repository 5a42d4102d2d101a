//! Single-qubit statevectors, the measurement rule and the Bloch sphere.
//!
//! The heart of the crate is [`to_bloch_angles`], which turns a normalized
//! pair of amplitudes `(α, β)` into the polar and azimuthal angles of the
//! corresponding point on the Bloch sphere:
//!
//! ```
//! use simple_bloch::{to_bloch_angles, Qbit};
//!
//! let root2 = 2f64.sqrt();
//! let plus = to_bloch_angles(Qbit::new(1.0 / root2, 0.0), Qbit::new(1.0 / root2, 0.0))?;
//! assert!((plus.theta - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
//! assert!(plus.phi.abs() < 1e-12);
//! # Ok::<(), simple_bloch::InvalidStateError>(())
//! ```

pub mod bloch;
pub mod circuit;
pub mod error;
pub mod gates;
pub mod measure;
pub mod observable;
pub mod qstate;
pub mod validate;

mod test_util;

use num_complex::Complex;

pub use bloch::{to_bloch_angles, BlochAngles, BlochVector};
pub use circuit::Circuit;
pub use error::{InvalidStateError, ParseError};
pub use gates::Gate;
pub use measure::{Basis, Counts, Measurement};
pub use qstate::QState;
pub use validate::{validate, DEFAULT_TOLERANCE};

pub type Qbit = Complex<f64>;
