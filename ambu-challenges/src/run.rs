use crate::{engine::*, error::*, ledger::*};
use ambu_structs::core::{ProblemInstance, SolutionPlan};
use log::{debug, info};
use logging_timer::time;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub violation: Option<Violation>,
    pub ledger: SaveLedger,
    pub routes: Vec<RouteSummary>,
}

impl RunOutcome {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }

    pub fn total_saved(&self) -> usize {
        self.ledger.count_saved()
    }
}

/// Validates every ambulance in ascending id order and stops the whole run
/// at the first violation. The ledger is returned either way so partial
/// saves can still be counted.
#[time]
pub fn verify_plan(problem: &ProblemInstance, plan: &SolutionPlan) -> RunOutcome {
    let mut state = RunState::new(problem);
    let mut routes = Vec::with_capacity(plan.num_ambulances());

    let result = plan
        .ambulances()
        .try_for_each(|(ambulance_id, actions)| -> ViolationResult<()> {
            let summary = validate_ambulance(ambulance_id, actions, problem, plan, &mut state)?;
            debug!(
                "Ambulance {} finished at time {} after {} stops, delivering {} patients",
                summary.ambulance_id, summary.final_time, summary.stops, summary.delivered
            );
            routes.push(summary);
            Ok(())
        });
    if let Err(violation) = &result {
        info!(
            "Stopping after ambulance {}: {}",
            violation.ambulance_id(),
            violation
        );
    }

    RunOutcome {
        violation: result.err(),
        ledger: state.ledger,
        routes,
    }
}
