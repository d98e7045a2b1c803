use ambu_challenges::verify_plan;
use ambu_structs::loading::{load_problem, load_solution};
use ambu_verifier::report::{emit_report, write_json_report};
use anyhow::Result;
use clap::{arg, Command};
use log::info;
use std::{io, path::PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("ambu-verifier")
        .about("Verifies an ambulance rescue plan against a problem instance")
        .arg_required_else_help(true)
        .arg(
            arg!(<PROBLEM> "Problem file: patients and hospital capacities (text, or .json)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(<SOLUTION> "Solution file: hospital locations and ambulance routes (text, or .json)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--report <REPORT> "Also write a JSON report to this path")
                .value_parser(clap::value_parser!(PathBuf)),
        )
}

fn init_logging() {
    // stdout is reserved for the verdict
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let matches = cli().get_matches();

    if let Err(e) = verify(
        matches.get_one::<PathBuf>("PROBLEM").unwrap().clone(),
        matches.get_one::<PathBuf>("SOLUTION").unwrap().clone(),
        matches.get_one::<PathBuf>("report").cloned(),
    ) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

pub fn verify(
    problem_path: PathBuf,
    solution_path: PathBuf,
    report_path: Option<PathBuf>,
) -> Result<()> {
    let problem = load_problem(&problem_path)?;
    let plan = load_solution(&solution_path)?;

    let outcome = verify_plan(&problem, &plan);
    info!(
        "Checked {} of {} ambulances",
        outcome.routes.len() + usize::from(outcome.violation.is_some()),
        plan.num_ambulances()
    );

    emit_report(&outcome, &mut io::stdout().lock())?;
    if let Some(report_path) = report_path {
        write_json_report(&outcome, &report_path)?;
    }
    Ok(())
}
