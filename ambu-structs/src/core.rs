use crate::serializable_struct;
use ambu_utils::RouteToken;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type AmbulanceId = usize;
pub type HospitalId = usize;
pub type PatientId = usize;
// Wide enough that distances between any two i64 coordinates, summed over
// a route, stay exact.
pub type Time = i128;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub x: i64,
    pub y: i64,
}

impl Location {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Location) -> Time {
        Time::from(self.x.abs_diff(other.x)) + Time::from(self.y.abs_diff(other.y))
    }
}

impl From<(i64, i64)> for Location {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

serializable_struct! {
    Patient {
        location: Location,
        deadline: Time,
    }
}

impl Patient {
    pub fn new(x: i64, y: i64, deadline: Time) -> Self {
        Self {
            location: Location::new(x, y),
            deadline,
        }
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{})",
            self.location.x, self.location.y, self.deadline
        )
    }
}

// Ids are 1-based everywhere; id 0 never resolves.
serializable_struct! {
    ProblemInstance {
        patients: Vec<Patient>,
        hospital_capacities: Vec<u32>,
    }
}

impl ProblemInstance {
    pub fn num_patients(&self) -> usize {
        self.patients.len()
    }

    pub fn num_hospitals(&self) -> usize {
        self.hospital_capacities.len()
    }

    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        id.checked_sub(1).and_then(|idx| self.patients.get(idx))
    }

    pub fn start_capacity(&self, id: HospitalId) -> Option<u32> {
        id.checked_sub(1)
            .and_then(|idx| self.hospital_capacities.get(idx))
            .copied()
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    AtHospital(HospitalId),
    PickUp(PatientId),
    Unrecognized { tag: char, id: usize },
}

impl From<RouteToken> for Action {
    fn from(token: RouteToken) -> Self {
        match token.tag {
            'H' => Action::AtHospital(token.id),
            'P' => Action::PickUp(token.id),
            tag => Action::Unrecognized { tag, id: token.id },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AtHospital(id) => write!(f, "H{}", id),
            Action::PickUp(id) => write!(f, "P{}", id),
            Action::Unrecognized { tag, id } => write!(f, "{}{}", tag, id),
        }
    }
}

serializable_struct! {
    SolutionPlan {
        hospitals: Vec<Location>,
        routes: Vec<Vec<Action>>,
    }
}

impl SolutionPlan {
    pub fn num_ambulances(&self) -> usize {
        self.routes.len()
    }

    pub fn hospital(&self, id: HospitalId) -> Option<&Location> {
        id.checked_sub(1).and_then(|idx| self.hospitals.get(idx))
    }

    pub fn route(&self, id: AmbulanceId) -> Option<&[Action]> {
        id.checked_sub(1)
            .and_then(|idx| self.routes.get(idx))
            .map(Vec::as_slice)
    }

    /// Routes paired with their 1-based ambulance id, in ascending order.
    pub fn ambulances(&self) -> impl Iterator<Item = (AmbulanceId, &[Action])> {
        self.routes
            .iter()
            .enumerate()
            .map(|(idx, route)| (idx + 1, route.as_slice()))
    }
}

serializable_struct! {
    SaveRecord {
        ambulance_id: AmbulanceId,
        hospital_id: HospitalId,
        time: Time,
    }
}

impl fmt::Display for SaveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ambulance {} at hospital {} at time {}",
            self.ambulance_id, self.hospital_id, self.time
        )
    }
}
