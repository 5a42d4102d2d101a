use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt::Display;
use std::str::FromStr;

use nalgebra::Matrix2;
use num_complex::Complex;

use crate::{error::ParseError, Qbit};

pub fn x_matrix() -> Matrix2<Qbit> {
    let zero = Complex::new(0.0, 0.0);
    let one = Complex::new(1.0, 0.0);
    Matrix2::new(zero, one, one, zero)
}

pub fn y_matrix() -> Matrix2<Qbit> {
    let zero = Complex::new(0.0, 0.0);
    let i = Complex::new(0.0, 1.0);
    Matrix2::new(zero, -i, i, zero)
}

pub fn z_matrix() -> Matrix2<Qbit> {
    let zero = Complex::new(0.0, 0.0);
    let one = Complex::new(1.0, 0.0);
    Matrix2::new(one, zero, zero, -one)
}

pub fn h_matrix() -> Matrix2<Qbit> {
    let root2 = 2.0_f64.sqrt();
    let one = Complex::new(1.0, 0.0);
    Matrix2::new(one / root2, one / root2, one / root2, -one / root2)
}

/// Phase gate `diag(1, e^(iλ))`.
pub fn p_matrix(lambda: f64) -> Matrix2<Qbit> {
    let zero = Complex::new(0.0, 0.0);
    Matrix2::new(
        Complex::new(1.0, 0.0),
        zero,
        zero,
        Complex::from_polar(1.0, lambda),
    )
}

pub fn s_matrix() -> Matrix2<Qbit> {
    p_matrix(FRAC_PI_2)
}

pub fn sdg_matrix() -> Matrix2<Qbit> {
    p_matrix(-FRAC_PI_2)
}

pub fn t_matrix() -> Matrix2<Qbit> {
    p_matrix(FRAC_PI_4)
}

pub fn tdg_matrix() -> Matrix2<Qbit> {
    p_matrix(-FRAC_PI_4)
}

pub fn rx_matrix(theta: f64) -> Matrix2<Qbit> {
    let cos = Complex::new((theta / 2.0).cos(), 0.0);
    let sin = Complex::new(0.0, -(theta / 2.0).sin());
    Matrix2::new(cos, sin, sin, cos)
}

pub fn ry_matrix(theta: f64) -> Matrix2<Qbit> {
    let cos = Complex::new((theta / 2.0).cos(), 0.0);
    let sin = Complex::new((theta / 2.0).sin(), 0.0);
    Matrix2::new(cos, -sin, sin, cos)
}

pub fn rz_matrix(theta: f64) -> Matrix2<Qbit> {
    let zero = Complex::new(0.0, 0.0);
    Matrix2::new(
        Complex::from_polar(1.0, -theta / 2.0),
        zero,
        zero,
        Complex::from_polar(1.0, theta / 2.0),
    )
}

/// General single-qubit rotation `U(θ, φ, λ)`.
pub fn u_matrix(theta: f64, phi: f64, lambda: f64) -> Matrix2<Qbit> {
    let (sin, cos) = (theta / 2.0).sin_cos();
    Matrix2::new(
        Complex::new(cos, 0.0),
        -Complex::from_polar(sin, lambda),
        Complex::from_polar(sin, phi),
        Complex::from_polar(cos, phi + lambda),
    )
}

/// Whether `a = e^(iγ) b` for some global phase γ.
pub fn equal_up_to_global_phase(a: &Matrix2<Qbit>, b: &Matrix2<Qbit>, eps: f64) -> bool {
    // |tr(A†B)| = 2 exactly when A and B agree up to phase.
    let overlap = (a.adjoint() * b).trace().norm() / 2.0;
    (1.0 - overlap).abs() < eps
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    T,
    Tdg,
    P(f64),
    RX(f64),
    RY(f64),
    RZ(f64),
    U { theta: f64, phi: f64, lambda: f64 },
}

impl Gate {
    pub fn matrix(&self) -> Matrix2<Qbit> {
        match *self {
            Gate::I => Matrix2::identity(),
            Gate::X => x_matrix(),
            Gate::Y => y_matrix(),
            Gate::Z => z_matrix(),
            Gate::H => h_matrix(),
            Gate::S => s_matrix(),
            Gate::Sdg => sdg_matrix(),
            Gate::T => t_matrix(),
            Gate::Tdg => tdg_matrix(),
            Gate::P(lambda) => p_matrix(lambda),
            Gate::RX(theta) => rx_matrix(theta),
            Gate::RY(theta) => ry_matrix(theta),
            Gate::RZ(theta) => rz_matrix(theta),
            Gate::U { theta, phi, lambda } => u_matrix(theta, phi, lambda),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "id",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::H => "h",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::P(_) => "p",
            Gate::RX(_) => "rx",
            Gate::RY(_) => "ry",
            Gate::RZ(_) => "rz",
            Gate::U { .. } => "u",
        }
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Gate::P(angle) | Gate::RX(angle) | Gate::RY(angle) | Gate::RZ(angle) => {
                write!(f, "{}({:.4})", self.name(), angle)
            }
            Gate::U { theta, phi, lambda } => {
                write!(f, "u({:.4}, {:.4}, {:.4})", theta, phi, lambda)
            }
            _ => write!(f, "{}", self.name()),
        }
    }
}

impl FromStr for Gate {
    type Err = ParseError;

    /// Reads `h`, `sdg`, `p(pi/4)`, `u(pi/2, 0, pi)` and the like.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let (name, args) = match text.find('(') {
            Some(open) => {
                let inner = text[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| ParseError::Malformed(text.to_string()))?;
                let args = inner
                    .split(',')
                    .map(parse_angle)
                    .collect::<Result<Vec<_>, _>>()?;
                (text[..open].trim(), args)
            }
            None => (text, Vec::new()),
        };
        let name = name.to_ascii_lowercase();

        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(ParseError::WrongArity {
                    gate: name.clone(),
                    expected,
                    actual: args.len(),
                })
            }
        };

        let gate = match name.as_str() {
            "i" | "id" => arity(0).map(|_| Gate::I)?,
            "x" => arity(0).map(|_| Gate::X)?,
            "y" => arity(0).map(|_| Gate::Y)?,
            "z" => arity(0).map(|_| Gate::Z)?,
            "h" => arity(0).map(|_| Gate::H)?,
            "s" => arity(0).map(|_| Gate::S)?,
            "sdg" => arity(0).map(|_| Gate::Sdg)?,
            "t" => arity(0).map(|_| Gate::T)?,
            "tdg" => arity(0).map(|_| Gate::Tdg)?,
            "p" => arity(1).map(|_| Gate::P(args[0]))?,
            "rx" => arity(1).map(|_| Gate::RX(args[0]))?,
            "ry" => arity(1).map(|_| Gate::RY(args[0]))?,
            "rz" => arity(1).map(|_| Gate::RZ(args[0]))?,
            "u" => arity(3).map(|_| Gate::U {
                theta: args[0],
                phi: args[1],
                lambda: args[2],
            })?,
            _ => return Err(ParseError::UnknownGate(name)),
        };

        Ok(gate)
    }
}

/// Reads an angle in radians: a decimal number or a multiple of pi such as
/// `pi`, `-pi/2`, `3*pi/4` or `2pi`.
pub fn parse_angle(text: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidAngle(text.trim().to_string());

    let trimmed = text.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest.trim()),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed).trim()),
    };

    let value = match body.split_once("pi") {
        None => body.parse::<f64>().map_err(|_| invalid())?,
        Some((coefficient, rest)) => {
            let coefficient = coefficient.trim().trim_end_matches('*').trim();
            let numerator = if coefficient.is_empty() {
                1.0
            } else {
                coefficient.parse::<f64>().map_err(|_| invalid())?
            };

            let rest = rest.trim();
            let denominator = if rest.is_empty() {
                1.0
            } else {
                rest.strip_prefix('/')
                    .ok_or_else(invalid)?
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| invalid())?
            };
            if denominator == 0.0 {
                return Err(invalid());
            }

            numerator * PI / denominator
        }
    };

    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(sign * value)
}

/// Splits `h, p(pi/4), u(pi/2,0,pi)` on the commas outside parentheses.
pub fn parse_gate_list(text: &str) -> Result<Vec<Gate>, ParseError> {
    let mut gates = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ParseError::Malformed(text.to_string()))?;
            }
            ',' if depth == 0 => {
                gates.push(text[start..i].parse()?);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ParseError::Malformed(text.to_string()));
    }

    let last = text[start..].trim();
    if !last.is_empty() {
        gates.push(last.parse()?);
    } else if !gates.is_empty() {
        return Err(ParseError::Malformed(text.to_string()));
    }

    Ok(gates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_approx_eq, assert_approx_matrix_eq};

    #[test]
    fn test_self_inverse_gates() {
        let id = Matrix2::identity();
        assert_approx_matrix_eq!(id, x_matrix() * x_matrix());
        assert_approx_matrix_eq!(id, y_matrix() * y_matrix());
        assert_approx_matrix_eq!(id, z_matrix() * z_matrix());
        assert_approx_matrix_eq!(id, h_matrix() * h_matrix());
    }

    #[test]
    fn test_phase_gate_family() {
        let id = Matrix2::identity();
        assert_approx_matrix_eq!(z_matrix(), s_matrix() * s_matrix());
        assert_approx_matrix_eq!(s_matrix(), t_matrix() * t_matrix());
        assert_approx_matrix_eq!(id, s_matrix() * sdg_matrix());
        assert_approx_matrix_eq!(id, t_matrix() * tdg_matrix());
        assert_approx_matrix_eq!(z_matrix(), p_matrix(PI));
    }

    #[test]
    fn test_hadamard_conjugation() {
        assert_approx_matrix_eq!(x_matrix(), h_matrix() * z_matrix() * h_matrix());
        assert_approx_matrix_eq!(z_matrix(), h_matrix() * x_matrix() * h_matrix());
    }

    #[test]
    fn test_u_gate() {
        assert_approx_matrix_eq!(h_matrix(), u_matrix(FRAC_PI_2, 0.0, PI));
        assert_approx_matrix_eq!(p_matrix(0.3), u_matrix(0.0, 0.0, 0.3));
        assert_approx_matrix_eq!(x_matrix(), u_matrix(PI, 0.0, PI));
    }

    #[test]
    fn test_rotations_match_up_to_global_phase() {
        assert!(equal_up_to_global_phase(&rz_matrix(0.7), &p_matrix(0.7), 1e-12));
        assert!(equal_up_to_global_phase(&rx_matrix(PI), &x_matrix(), 1e-12));
        assert!(equal_up_to_global_phase(&ry_matrix(PI), &y_matrix(), 1e-12));
        assert!(!equal_up_to_global_phase(&h_matrix(), &t_matrix(), 1e-6));
    }

    #[test]
    fn test_parse_simple_gates() -> Result<(), ParseError> {
        assert_eq!(Gate::H, "h".parse()?);
        assert_eq!(Gate::Sdg, " SDG ".parse()?);
        assert_eq!(Gate::I, "id".parse()?);
        Ok(())
    }

    #[test]
    fn test_parse_parameterized_gates() -> Result<(), ParseError> {
        assert_eq!(Gate::P(FRAC_PI_4), "p(pi/4)".parse()?);
        assert_eq!(Gate::RX(-0.5), "rx(-0.5)".parse()?);
        assert_eq!(
            Gate::U {
                theta: FRAC_PI_2,
                phi: 0.0,
                lambda: PI
            },
            "u(pi/2, 0, pi)".parse()?
        );
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Err(ParseError::UnknownGate("cx".to_string())),
            "cx".parse::<Gate>()
        );
        assert_eq!(
            Err(ParseError::WrongArity {
                gate: "h".to_string(),
                expected: 0,
                actual: 1
            }),
            "h(1)".parse::<Gate>()
        );
        assert_eq!(
            Err(ParseError::WrongArity {
                gate: "u".to_string(),
                expected: 3,
                actual: 1
            }),
            "u(pi)".parse::<Gate>()
        );
        assert_eq!(
            Err(ParseError::Malformed("p(pi".to_string())),
            "p(pi".parse::<Gate>()
        );
    }

    #[test]
    fn test_parse_angle() -> Result<(), ParseError> {
        assert_approx_eq!(PI, parse_angle("pi")?);
        assert_approx_eq!(-FRAC_PI_2, parse_angle("-pi/2")?);
        assert_approx_eq!(3.0 * FRAC_PI_4, parse_angle("3*pi/4")?);
        assert_approx_eq!(2.0 * PI, parse_angle("2pi")?);
        assert_approx_eq!(0.25, parse_angle(" 0.25 ")?);
        assert!(parse_angle("pi/0").is_err());
        assert!(parse_angle("nan").is_err());
        assert!(parse_angle("abc").is_err());
        Ok(())
    }

    #[test]
    fn test_parse_gate_list() -> Result<(), ParseError> {
        let gates = parse_gate_list("h, p(pi/4), u(pi/2,0,pi), tdg")?;
        assert_eq!(4, gates.len());
        assert_eq!(Gate::H, gates[0]);
        assert_eq!(Gate::Tdg, gates[3]);

        assert!(parse_gate_list("")?.is_empty());
        assert!(parse_gate_list("h,").is_err());
        assert!(parse_gate_list("p(pi))").is_err());
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!("sdg", Gate::Sdg.to_string());
        assert_eq!("p(0.7854)", Gate::P(FRAC_PI_4).to_string());
    }
}
