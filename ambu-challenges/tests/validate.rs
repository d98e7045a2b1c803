use ambu_challenges::*;
use ambu_structs::core::{Action, Location, Patient, ProblemInstance, SaveRecord, SolutionPlan};
use ambu_structs::core::Action::{AtHospital as H, PickUp as P};

fn problem(patients: Vec<Patient>, hospital_capacities: Vec<u32>) -> ProblemInstance {
    ProblemInstance {
        patients,
        hospital_capacities,
    }
}

fn plan(hospitals: Vec<(i64, i64)>, routes: Vec<Vec<Action>>) -> SolutionPlan {
    SolutionPlan {
        hospitals: hospitals.into_iter().map(Location::from).collect(),
        routes,
    }
}

fn validate_first(problem: &ProblemInstance, plan: &SolutionPlan) -> ViolationResult<RouteSummary> {
    let mut state = RunState::new(problem);
    validate_ambulance(1, plan.route(1).unwrap(), problem, plan, &mut state)
}

#[test]
fn test_single_rescue() {
    let problem = problem(vec![Patient::new(0, 0, 10)], vec![1]);
    let plan = plan(vec![(0, 0)], vec![vec![H(1), P(1), H(1)]]);

    let outcome = verify_plan(&problem, &plan);
    assert_eq!(outcome.violation, None);
    assert_eq!(outcome.total_saved(), 1);
    assert_eq!(
        outcome.ledger.get(1),
        Some(&SaveRecord {
            ambulance_id: 1,
            hospital_id: 1,
            time: 2
        })
    );
    assert_eq!(
        outcome.routes,
        vec![RouteSummary {
            ambulance_id: 1,
            final_time: 2,
            stops: 3,
            delivered: 1
        }]
    );
}

#[test]
fn test_travel_time_accumulates() {
    // (0,0) -> (3,4) -> (-1,-2)
    let problem = problem(vec![Patient::new(3, 4, 100)], vec![1, 0]);
    let plan = plan(vec![(0, 0), (-1, -2)], vec![vec![H(1), P(1), H(2)]]);
    let summary = validate_first(&problem, &plan).unwrap();
    assert_eq!(summary.final_time, (1 + 7) + (1 + 10));
    assert_eq!(summary.stops, 3);
}

#[test]
fn test_missing_start_hospital() {
    let problem = problem(vec![Patient::new(0, 0, 10)], vec![1]);
    for route in [
        vec![],
        vec![P(1), H(1)],
        vec![Action::Unrecognized { tag: 'X', id: 1 }, H(1)],
    ] {
        let plan = plan(vec![(0, 0)], vec![route]);
        assert_eq!(
            validate_first(&problem, &plan),
            Err(Violation::MissingStartHospital { ambulance_id: 1 })
        );
    }
}

#[test]
fn test_missing_final_unload() {
    let problem = problem(vec![Patient::new(0, 0, 10)], vec![1]);
    let plan = plan(vec![(0, 0)], vec![vec![H(1), P(1)]]);
    let outcome = verify_plan(&problem, &plan);
    assert_eq!(
        outcome.violation,
        Some(Violation::MissingFinalUnload { ambulance_id: 1 })
    );
    assert_eq!(outcome.total_saved(), 0);
}

#[test]
fn test_start_only_route_is_valid() {
    let problem = problem(vec![], vec![1]);
    let plan = plan(vec![(4, 4)], vec![vec![H(1)]]);
    let summary = validate_first(&problem, &plan).unwrap();
    assert_eq!(summary.final_time, 0);
    assert_eq!(summary.delivered, 0);
}

#[test]
fn test_overload_at_fifth_pickup() {
    let patients = (0..6).map(|_| Patient::new(0, 0, 100)).collect();
    let problem = problem(patients, vec![1]);
    let plan = plan(
        vec![(0, 0)],
        vec![vec![H(1), P(1), P(2), P(3), P(4), P(5), P(6), H(1)]],
    );
    assert_eq!(
        validate_first(&problem, &plan),
        Err(Violation::Overloaded {
            ambulance_id: 1,
            onboard: vec![1, 2, 3, 4, 5],
            time: 5
        })
    );
}

#[test]
fn test_four_onboard_is_allowed() {
    let patients = (0..4).map(|i| Patient::new(i, 0, 100)).collect();
    let problem = problem(patients, vec![1]);
    let plan = plan(vec![(0, 0)], vec![vec![H(1), P(1), P(2), P(3), P(4), H(1)]]);
    let outcome = verify_plan(&problem, &plan);
    assert!(outcome.is_valid());
    assert_eq!(outcome.total_saved(), 4);
}

#[test]
fn test_start_capacity_exceeded() {
    let problem = problem(vec![], vec![1, 1]);
    let plan = plan(vec![(0, 0), (5, 5)], vec![vec![H(1)], vec![H(2)], vec![H(1)]]);

    let mut state = RunState::new(&problem);
    assert!(validate_ambulance(1, plan.route(1).unwrap(), &problem, &plan, &mut state).is_ok());
    assert_eq!(state.capacities.remaining(1), Some(0));
    assert!(validate_ambulance(2, plan.route(2).unwrap(), &problem, &plan, &mut state).is_ok());
    assert_eq!(
        validate_ambulance(3, plan.route(3).unwrap(), &problem, &plan, &mut state),
        Err(Violation::StartCapacityExceeded {
            ambulance_id: 3,
            hospital_id: 1
        })
    );
    assert_eq!(state.capacities.remaining(1), Some(0));
}

#[test]
fn test_deadline_boundary() {
    // start (0,0) -> patient (0,1): time 2, then 1 + distance to the second hospital
    let problem = problem(vec![Patient::new(0, 1, 5)], vec![1, 0]);

    let on_time = plan(vec![(0, 0), (0, 3)], vec![vec![H(1), P(1), H(2)]]);
    let outcome = verify_plan(&problem, &on_time);
    assert!(outcome.is_valid());
    assert_eq!(outcome.ledger.get(1).map(|r| r.time), Some(5));

    let late = plan(vec![(0, 0), (0, 4)], vec![vec![H(1), P(1), H(2)]]);
    let outcome = verify_plan(&problem, &late);
    assert_eq!(
        outcome.violation,
        Some(Violation::PatientDied {
            ambulance_id: 1,
            patient_id: 1,
            patient: Patient::new(0, 1, 5),
            hospital_id: 2,
            time: 6
        })
    );
    assert_eq!(outcome.total_saved(), 0);
}

#[test]
fn test_deliveries_before_a_death_are_kept() {
    let problem = problem(
        vec![Patient::new(0, 0, 50), Patient::new(0, 0, 2)],
        vec![1],
    );
    let plan = plan(vec![(0, 0)], vec![vec![H(1), P(1), P(2), H(1)]]);
    let outcome = verify_plan(&problem, &plan);
    assert_eq!(outcome.violation.as_ref().map(Violation::kind), Some("PatientDiedError"));
    assert!(outcome.ledger.get(1).is_some());
    assert!(outcome.ledger.get(2).is_none());
    assert_eq!(outcome.total_saved(), 1);
}

#[test]
fn test_double_saved_across_ambulances() {
    let problem = problem(vec![Patient::new(1, 0, 100)], vec![2]);
    let plan = plan(
        vec![(0, 0)],
        vec![vec![H(1), P(1), H(1)], vec![H(1), P(1), H(1)]],
    );
    let outcome = verify_plan(&problem, &plan);
    assert_eq!(
        outcome.violation,
        Some(Violation::DoubleSaved {
            ambulance_id: 2,
            patient_id: 1,
            hospital_id: 1,
            existing: SaveRecord {
                ambulance_id: 1,
                hospital_id: 1,
                time: 4
            },
            time: 4
        })
    );
    // the first record is never overwritten
    assert_eq!(outcome.ledger.get(1).map(|r| r.ambulance_id), Some(1));
    assert_eq!(outcome.total_saved(), 1);
}

#[test]
fn test_double_saved_within_one_route() {
    let problem = problem(vec![Patient::new(0, 0, 100)], vec![1]);
    let plan = plan(vec![(0, 0)], vec![vec![H(1), P(1), H(1), P(1), H(1)]]);
    assert_eq!(
        validate_first(&problem, &plan).map_err(|v| v.kind()),
        Err("DoubleSavedError")
    );
}

#[test]
fn test_unknown_action() {
    let problem = problem(vec![Patient::new(0, 0, 100)], vec![1]);
    let plan = plan(
        vec![(0, 0)],
        vec![vec![H(1), P(1), Action::Unrecognized { tag: 'X', id: 4 }, H(1)]],
    );
    assert_eq!(
        validate_first(&problem, &plan),
        Err(Violation::UnknownAction {
            ambulance_id: 1,
            tag: 'X',
            id: 4
        })
    );
}

#[test]
fn test_unknown_ids() {
    let problem = problem(vec![Patient::new(0, 0, 100)], vec![1]);

    let plan_a = plan(vec![(0, 0)], vec![vec![H(1), P(2), H(1)]]);
    assert_eq!(
        validate_first(&problem, &plan_a),
        Err(Violation::UnknownPatient {
            ambulance_id: 1,
            patient_id: 2
        })
    );

    let plan_b = plan(vec![(0, 0)], vec![vec![H(1), P(1), H(3)]]);
    assert_eq!(
        validate_first(&problem, &plan_b),
        Err(Violation::UnknownHospital {
            ambulance_id: 1,
            hospital_id: 3
        })
    );

    let plan_c = plan(vec![(0, 0)], vec![vec![H(0)]]);
    assert_eq!(
        validate_first(&problem, &plan_c),
        Err(Violation::UnknownHospital {
            ambulance_id: 1,
            hospital_id: 0
        })
    );
}

#[test]
fn test_run_stops_at_first_violation() {
    let problem = problem(
        vec![Patient::new(0, 0, 100), Patient::new(0, 0, 100)],
        vec![3],
    );
    let plan = plan(
        vec![(0, 0)],
        vec![
            vec![H(1), P(1), H(1)],
            vec![H(1), P(2)],
            vec![H(1), P(2), H(1)],
        ],
    );
    let outcome = verify_plan(&problem, &plan);
    assert_eq!(
        outcome.violation,
        Some(Violation::MissingFinalUnload { ambulance_id: 2 })
    );
    assert_eq!(outcome.routes.len(), 1);
    assert_eq!(outcome.total_saved(), 1);
    assert!(outcome.ledger.get(2).is_none());
}

#[test]
fn test_violation_messages() {
    assert_eq!(
        Violation::MissingStartHospital { ambulance_id: 3 }.to_string(),
        "You have to start at a hospital for ambulance 3."
    );
    assert_eq!(
        Violation::StartCapacityExceeded {
            ambulance_id: 2,
            hospital_id: 1
        }
        .to_string(),
        "More ambulances (ambulance 2) from hospital 1 than allowed."
    );
    assert_eq!(
        Violation::Overloaded {
            ambulance_id: 1,
            onboard: vec![1, 2, 3, 4, 5],
            time: 5
        }
        .to_string(),
        "Ambulance 1 is overloaded when adding patient 5 (onboard [1, 2, 3, 4, 5]) at time 5."
    );
    assert_eq!(
        Violation::PatientDied {
            ambulance_id: 1,
            patient_id: 1,
            patient: Patient::new(0, 1, 5),
            hospital_id: 2,
            time: 6
        }
        .to_string(),
        "Ambulance 1 tries to save patient 1(0,1,5), but unloads at hospital 2 at time 6."
    );
    assert_eq!(
        Violation::DoubleSaved {
            ambulance_id: 2,
            patient_id: 1,
            hospital_id: 3,
            existing: SaveRecord {
                ambulance_id: 1,
                hospital_id: 1,
                time: 4
            },
            time: 9
        }
        .to_string(),
        "Patient 1 was saved by ambulance 1 at hospital 1 at time 4, and is now sent to hospital 3 at time 9 by ambulance 2."
    );
}

#[test]
fn test_ledger_write_once() {
    let mut ledger = SaveLedger::new(2);
    let first = SaveRecord {
        ambulance_id: 1,
        hospital_id: 1,
        time: 3,
    };
    let second = SaveRecord {
        ambulance_id: 2,
        hospital_id: 1,
        time: 7,
    };
    assert_eq!(ledger.count_saved(), 0);
    assert_eq!(ledger.record(2, first.clone()), Ok(()));
    assert_eq!(
        ledger.record(2, second.clone()),
        Err(RecordError::AlreadySaved(first.clone()))
    );
    assert_eq!(ledger.get(2), Some(&first));
    assert_eq!(ledger.count_saved(), 1);
    assert_eq!(ledger.iter().collect::<Vec<_>>(), vec![(2, &first)]);
}

#[test]
fn test_ledger_has_no_slot_outside_patient_range() {
    let mut ledger = SaveLedger::new(2);
    let record = SaveRecord {
        ambulance_id: 1,
        hospital_id: 1,
        time: 3,
    };
    assert_eq!(ledger.record(0, record.clone()), Err(RecordError::NoSlot));
    assert_eq!(ledger.record(3, record.clone()), Err(RecordError::NoSlot));
    assert_eq!(ledger.get(3), None);
    assert_eq!(ledger.count_saved(), 0);
    assert_eq!(ledger, SaveLedger::new(2));
}

#[test]
fn test_far_apart_coordinates_do_not_wrap() {
    // each leg is 1 + 10^19, past i64::MAX
    let problem = problem_with_deadline(i64::MAX.into());
    let plan = plan(
        vec![(-5_000_000_000_000_000_000, 0)],
        vec![vec![H(1), P(1), H(1)]],
    );
    let outcome = verify_plan(&problem, &plan);
    assert_eq!(
        outcome.violation,
        Some(Violation::PatientDied {
            ambulance_id: 1,
            patient_id: 1,
            patient: problem.patients[0].clone(),
            hospital_id: 1,
            time: 20_000_000_000_000_000_002
        })
    );
    assert_eq!(outcome.total_saved(), 0);

    let reachable = problem_with_deadline(20_000_000_000_000_000_002);
    let outcome = verify_plan(&reachable, &plan);
    assert!(outcome.is_valid());
    assert_eq!(outcome.routes[0].final_time, 20_000_000_000_000_000_002);
}

fn problem_with_deadline(deadline: i128) -> ProblemInstance {
    problem(
        vec![Patient::new(5_000_000_000_000_000_000, 0, deadline)],
        vec![1],
    )
}
