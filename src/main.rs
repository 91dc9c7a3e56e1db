use std::process::ExitCode;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use colon_des::{Arm, ColonModel, ModelError, Simulation, StatsError, DEFAULT_SEED};

struct Args {
    replications: usize,
    seed: u64,
    verbose: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        replications: 1000,
        seed: DEFAULT_SEED,
        verbose: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--replications" | "-n" => {
                let v = it.next().ok_or("--replications needs a value")?;
                args.replications = v.parse().map_err(|e| format!("bad replications {v:?}: {e}"))?;
            }
            "--seed" => {
                let v = it.next().ok_or("--seed needs a value")?;
                args.seed = v.parse().map_err(|e| format!("bad seed {v:?}: {e}"))?;
            }
            "--verbose" | "-v" => args.verbose = true,
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    Ok(args)
}

fn print_icer(label: &str, icer: Result<f64, StatsError>) {
    match icer {
        Ok(value) => println!("ICER({label}): {value}"),
        Err(StatsError::DegenerateIcer { value, .. }) => {
            println!("ICER({label}): {value} (degenerate: equal mean QALYs)")
        }
        Err(e) => println!("ICER({label}): {e}"),
    }
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("usage: colon-des [--replications N] [--seed S] [--verbose]\n{msg}");
            return ExitCode::FAILURE;
        }
    };

    // RUST_LOG wins; otherwise --verbose turns on the per-event lines
    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("cannot build model: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_arm(arm: Arm, args: &Args) -> Result<ColonModel, ModelError> {
    let mut model = ColonModel::new(arm, args.seed)?;
    model.set_verbose(args.verbose);
    model.run_replications(args.replications);

    println!("{arm}:");
    match model.report() {
        Ok(report) => println!("{report}"),
        Err(e) => println!("{e}"),
    }
    if args.verbose {
        match model.get_metrics().encode() {
            Ok(text) => print!("{text}"),
            Err(e) => warn!("cannot encode metrics: {e}"),
        }
    }
    Ok(model)
}

fn run(args: &Args) -> Result<(), ModelError> {
    let observation = run_arm(Arm::Observation, args)?;
    let lev = run_arm(Arm::Levamisole, args)?;
    let lev_5fu = run_arm(Arm::LevamisoleFluorouracil, args)?;

    print_icer("Lev vs Observation", lev.icer(&observation));
    print_icer("Lev+5FU vs Observation", lev_5fu.icer(&observation));
    print_icer("Lev+5FU vs Lev", lev_5fu.icer(&lev));
    Ok(())
}
