use crate::{error::*, ledger::*};
use ambu_structs::core::{
    Action, AmbulanceId, HospitalId, Location, PatientId, ProblemInstance, SaveRecord,
    SolutionPlan, Time,
};
use serde::Serialize;
use std::mem;

pub const MAX_ONBOARD: usize = 4;

/// Fixed cost of every stop, paid even when the distance is zero.
pub const STOP_OVERHEAD: Time = 1;

pub fn travel_time(from: &Location, to: &Location) -> Time {
    STOP_OVERHEAD + from.manhattan_distance(to)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub ambulance_id: AmbulanceId,
    pub final_time: Time,
    pub stops: usize,
    pub delivered: usize,
}

struct Simulation<'a> {
    ambulance_id: AmbulanceId,
    problem: &'a ProblemInstance,
    plan: &'a SolutionPlan,
    time: Time,
    position: Location,
    onboard: Vec<PatientId>,
    stops: usize,
    delivered: usize,
}

impl<'a> Simulation<'a> {
    fn advance_to(&mut self, next: Location) {
        self.time = self.time.saturating_add(travel_time(&self.position, &next));
        self.position = next;
        self.stops += 1;
    }

    fn pick_up(&mut self, patient_id: PatientId) -> ViolationResult<()> {
        let location = self
            .problem
            .patient(patient_id)
            .map(|patient| patient.location)
            .ok_or(Violation::UnknownPatient {
                ambulance_id: self.ambulance_id,
                patient_id,
            })?;
        self.advance_to(location);
        self.onboard.push(patient_id);
        if self.onboard.len() > MAX_ONBOARD {
            return Err(Violation::Overloaded {
                ambulance_id: self.ambulance_id,
                onboard: self.onboard.clone(),
                time: self.time,
            });
        }
        Ok(())
    }

    fn unload(&mut self, hospital_id: HospitalId, ledger: &mut SaveLedger) -> ViolationResult<()> {
        let hospital = *self
            .plan
            .hospital(hospital_id)
            .ok_or(Violation::UnknownHospital {
                ambulance_id: self.ambulance_id,
                hospital_id,
            })?;
        self.advance_to(hospital);

        let problem = self.problem;
        for patient_id in mem::take(&mut self.onboard) {
            let patient = problem
                .patient(patient_id)
                .ok_or(Violation::UnknownPatient {
                    ambulance_id: self.ambulance_id,
                    patient_id,
                })?;
            if patient.deadline < self.time {
                return Err(Violation::PatientDied {
                    ambulance_id: self.ambulance_id,
                    patient_id,
                    patient: patient.clone(),
                    hospital_id,
                    time: self.time,
                });
            }
            let record = SaveRecord {
                ambulance_id: self.ambulance_id,
                hospital_id,
                time: self.time,
            };
            ledger
                .record(patient_id, record)
                .map_err(|err| match err {
                    RecordError::AlreadySaved(existing) => Violation::DoubleSaved {
                        ambulance_id: self.ambulance_id,
                        patient_id,
                        hospital_id,
                        existing,
                        time: self.time,
                    },
                    RecordError::NoSlot => Violation::UnknownPatient {
                        ambulance_id: self.ambulance_id,
                        patient_id,
                    },
                })?;
            self.delivered += 1;
        }
        Ok(())
    }
}

/// Replays one ambulance's route against the problem, writing its
/// deliveries into the shared ledger and claiming its start slot.
///
/// Stops at the first violation. Ledger writes and the start claim made
/// before that point are kept.
pub fn validate_ambulance(
    ambulance_id: AmbulanceId,
    actions: &[Action],
    problem: &ProblemInstance,
    plan: &SolutionPlan,
    state: &mut RunState,
) -> ViolationResult<RouteSummary> {
    let start_id = match actions.first() {
        Some(Action::AtHospital(hospital_id)) => *hospital_id,
        _ => return Err(Violation::MissingStartHospital { ambulance_id }),
    };
    let start = match (
        plan.hospital(start_id),
        state.capacities.remaining(start_id),
    ) {
        (Some(location), Some(_)) => *location,
        _ => {
            return Err(Violation::UnknownHospital {
                ambulance_id,
                hospital_id: start_id,
            })
        }
    };
    if !state.capacities.claim(start_id) {
        return Err(Violation::StartCapacityExceeded {
            ambulance_id,
            hospital_id: start_id,
        });
    }

    let mut sim = Simulation {
        ambulance_id,
        problem,
        plan,
        time: 0,
        position: start,
        onboard: Vec::with_capacity(MAX_ONBOARD + 1),
        stops: 1,
        delivered: 0,
    };
    for action in &actions[1..] {
        match *action {
            Action::PickUp(patient_id) => sim.pick_up(patient_id)?,
            Action::AtHospital(hospital_id) => sim.unload(hospital_id, &mut state.ledger)?,
            Action::Unrecognized { tag, id } => {
                return Err(Violation::UnknownAction {
                    ambulance_id,
                    tag,
                    id,
                })
            }
        }
    }

    if !matches!(actions.last(), Some(Action::AtHospital(_))) {
        return Err(Violation::MissingFinalUnload { ambulance_id });
    }

    Ok(RouteSummary {
        ambulance_id,
        final_time: sim.time,
        stops: sim.stops,
        delivered: sim.delivered,
    })
}
