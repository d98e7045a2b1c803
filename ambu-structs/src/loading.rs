use crate::core::{Action, Location, Patient, ProblemInstance, SolutionPlan};
use ambu_utils::{dejsonify, lex_route};
use anyhow::{anyhow, Context, Result};
use log::debug;
use logging_timer::time;
use std::{fs, path::Path};

fn is_json(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Reads a problem instance from the text format, or from JSON when the
/// path ends in `.json`.
#[time]
pub fn load_problem(path: &Path) -> Result<ProblemInstance> {
    let source = read_source(path)?;
    let problem = if is_json(path) {
        dejsonify::<ProblemInstance>(&source)
            .with_context(|| format!("Failed to parse problem json: {}", path.display()))?
    } else {
        parse_problem(&source)
            .with_context(|| format!("Failed to parse problem file: {}", path.display()))?
    };
    debug!(
        "Loaded {} patients and {} hospital capacities from {}",
        problem.num_patients(),
        problem.num_hospitals(),
        path.display()
    );
    Ok(problem)
}

/// Reads a solution plan from the text format, or from JSON when the path
/// ends in `.json`.
#[time]
pub fn load_solution(path: &Path) -> Result<SolutionPlan> {
    let source = read_source(path)?;
    let plan = if is_json(path) {
        dejsonify::<SolutionPlan>(&source)
            .with_context(|| format!("Failed to parse solution json: {}", path.display()))?
    } else {
        parse_solution(&source)
            .with_context(|| format!("Failed to parse solution file: {}", path.display()))?
    };
    debug!(
        "Loaded {} hospital locations and {} routes from {}",
        plan.hospitals.len(),
        plan.num_ambulances(),
        path.display()
    );
    Ok(plan)
}

// Section titles such as `person(xloc,yloc,rescuetime)` start with a letter.
fn is_problem_header(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .map_or(false, char::is_alphabetic)
}

/// Parses the problem text format:
///
/// ```text
/// person(xloc,yloc,rescuetime)
/// 10,20,55
/// 3,4,80
///
/// hospital(numambulance)
/// 2
/// 1
/// ```
///
/// The first blank line always ends the patient section, so a file that
/// opens with a blank line has no patients.
pub fn parse_problem(source: &str) -> Result<ProblemInstance> {
    let mut lines = source.lines().enumerate();

    let mut patients = Vec::new();
    for (idx, line) in lines.by_ref() {
        if line.trim().is_empty() {
            break;
        }
        if is_problem_header(line) {
            // a second header without a blank line opens the capacity section
            if !patients.is_empty() {
                break;
            }
            continue;
        }
        patients.push(parse_patient(line).with_context(|| format!("Line {}", idx + 1))?);
    }

    let mut hospital_capacities = Vec::new();
    for (idx, line) in lines {
        if is_problem_header(line) || line.trim().is_empty() {
            continue;
        }
        let capacity = line.trim().parse::<u32>().map_err(|_| {
            anyhow!(
                "Line {}: expected a hospital capacity, got '{}'",
                idx + 1,
                line.trim()
            )
        })?;
        hospital_capacities.push(capacity);
    }

    Ok(ProblemInstance {
        patients,
        hospital_capacities,
    })
}

fn parse_patient(line: &str) -> Result<Patient> {
    let fields = parse_ints(line)?;
    match fields.as_slice() {
        &[x, y, deadline] => Ok(Patient::new(x, y, deadline.into())),
        _ => Err(anyhow!("Expected 'x,y,deadline', got '{}'", line.trim())),
    }
}

fn parse_ints(text: &str) -> Result<Vec<i64>> {
    text.split(',')
        .map(|field| {
            let field = field.trim();
            field
                .parse::<i64>()
                .map_err(|_| anyhow!("Expected an integer, got '{}'", field))
        })
        .collect()
}

/// Parses the solution text format. Lines are upper-cased first, so tags
/// and labels are case-insensitive.
///
/// ```text
/// Hospital
/// 1: (10,20)
/// 2: (40,7)
///
/// Ambulances
/// 1: H1(10,20) P3(3,4,80) H2(40,7)
/// 2: (H,2)(P,1)(H,2)
/// ```
///
/// Labels in front of `:` are ignored; hospitals and ambulances are
/// numbered by order of appearance. Lines without a `:` are headers.
pub fn parse_solution(source: &str) -> Result<SolutionPlan> {
    let mut lines = source.lines().enumerate();

    let mut hospitals = Vec::new();
    let mut started = false;
    for (idx, raw) in lines.by_ref() {
        let line = raw.to_uppercase();
        if line.trim().is_empty() {
            if started {
                break;
            }
            continue;
        }
        started = true;
        if let Some((_, body)) = line.split_once(':') {
            hospitals.push(parse_location(body).with_context(|| format!("Line {}", idx + 1))?);
        }
    }

    let mut routes = Vec::new();
    for (idx, raw) in lines {
        let line = raw.to_uppercase();
        if let Some((_, body)) = line.split_once(':') {
            let route: Vec<Action> = lex_route(body)
                .with_context(|| format!("Line {}", idx + 1))?
                .into_iter()
                .map(Action::from)
                .collect();
            routes.push(route);
        }
    }

    Ok(SolutionPlan { hospitals, routes })
}

fn parse_location(body: &str) -> Result<Location> {
    let coords = body.trim_matches(|c: char| c.is_whitespace() || c == '(' || c == ')');
    match parse_ints(coords)?.as_slice() {
        &[x, y] => Ok(Location::new(x, y)),
        _ => Err(anyhow!("Expected '(x,y)', got '{}'", body.trim())),
    }
}
