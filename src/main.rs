use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use simple_bloch::{
    bloch::to_bloch_angles_with_tolerance,
    measure::{sample_counts, Counts},
    Basis, BlochAngles, Circuit, QState, Qbit, DEFAULT_TOLERANCE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "simple-bloch: single-qubit states on the Bloch sphere")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert amplitudes (alpha, beta) to Bloch-sphere coordinates
    Bloch {
        /// Amplitude of |0>, e.g. 0.7071 or 0.5+0.5i
        #[arg(allow_hyphen_values = true, value_parser = parse_amplitude)]
        alpha: Qbit,

        /// Amplitude of |1>, e.g. -0.7071i
        #[arg(allow_hyphen_values = true, value_parser = parse_amplitude)]
        beta: Qbit,

        /// Accepted deviation of |alpha|^2 + |beta|^2 from 1
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,

        /// Rescale the amplitudes to unit norm instead of rejecting them
        #[arg(long)]
        normalize: bool,
    },

    /// Apply gates to a prepared state and sample measurements
    Run {
        /// Initial state label: 0, 1, +, -, r or l
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        init: String,

        /// Comma separated gates, e.g. "h,t,p(pi/4)"
        #[arg(long, default_value = "")]
        gates: String,

        /// Measurement basis
        #[arg(long, value_enum, default_value_t = BasisArg::Z)]
        basis: BasisArg,

        /// Number of shots to sample
        #[arg(long, default_value_t = 1024)]
        shots: usize,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BasisArg {
    /// |0> / |1>
    Z,
    /// |+> / |->
    X,
    /// |+i> / |-i>
    Y,
}

impl From<BasisArg> for Basis {
    fn from(value: BasisArg) -> Self {
        match value {
            BasisArg::Z => Basis::Z,
            BasisArg::X => Basis::X,
            BasisArg::Y => Basis::Y,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Bloch {
            alpha,
            beta,
            tolerance,
            normalize,
        } => run_bloch(alpha, beta, tolerance, normalize),
        Command::Run {
            init,
            gates,
            basis,
            shots,
            seed,
        } => run_circuit(&init, &gates, basis.into(), shots, seed),
    }
}

fn run_bloch(alpha: Qbit, beta: Qbit, tolerance: f64, normalize: bool) -> Result<()> {
    let (alpha, beta, angles) = convert(alpha, beta, tolerance, normalize)?;

    println!("statevector: [{}, {}]", alpha, beta);
    println!("theta: {:.6}", angles.theta);
    println!("phi: {:.6}", angles.phi);
    println!("bloch vector: {}", angles.to_cartesian(1.0));

    Ok(())
}

/// The amplitudes actually converted, and their angles.
fn convert(
    alpha: Qbit,
    beta: Qbit,
    tolerance: f64,
    normalize: bool,
) -> Result<(Qbit, Qbit, BlochAngles)> {
    let (alpha, beta) = if normalize {
        QState::normalized(alpha, beta)
            .context("cannot normalize the given amplitudes")?
            .amplitudes()
    } else {
        (alpha, beta)
    };

    let angles = to_bloch_angles_with_tolerance(alpha, beta, tolerance)
        .with_context(|| format!("invalid statevector [{}, {}]", alpha, beta))?;
    Ok((alpha, beta, angles))
}

fn run_circuit(
    init: &str,
    gates: &str,
    basis: Basis,
    shots: usize,
    seed: Option<u64>,
) -> Result<()> {
    let (circuit, state, counts) = simulate(init, gates, basis, shots, seed)?;

    println!("Circuit: {}", circuit);
    println!("Final state:\n{}", state);
    println!("Bloch angles: {}", state.bloch_angles());
    println!("Bloch vector: {}", state.bloch_vector());
    println!("Counts ({} basis, {} shots): {}", basis, shots, counts);

    Ok(())
}

fn simulate(
    init: &str,
    gates: &str,
    basis: Basis,
    shots: usize,
    seed: Option<u64>,
) -> Result<(Circuit, QState, Counts)> {
    let initial: QState = init
        .parse()
        .with_context(|| format!("failed to read initial state '{}'", init))?;
    let circuit: Circuit = gates
        .parse()
        .with_context(|| format!("failed to read gates '{}'", gates))?;

    info!("running {} on |{}>", circuit, init);
    let state = circuit
        .apply(&initial)
        .with_context(|| format!("failed to apply {}", circuit))?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let counts = sample_counts(&state, basis, shots, &mut rng);

    Ok((circuit, state, counts))
}

fn parse_amplitude(text: &str) -> Result<Qbit, String> {
    text.trim()
        .parse::<Qbit>()
        .map_err(|err| format!("'{}' is not a complex number: {}", text, err))
}

fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.filter_level(level);
    builder.try_init().map_err(|err| err.into())
}
