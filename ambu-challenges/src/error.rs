use ambu_structs::core::{AmbulanceId, HospitalId, Patient, PatientId, SaveRecord, Time};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Violation {
    UnknownAction {
        ambulance_id: AmbulanceId,
        tag: char,
        id: usize,
    },
    MissingStartHospital {
        ambulance_id: AmbulanceId,
    },
    MissingFinalUnload {
        ambulance_id: AmbulanceId,
    },
    StartCapacityExceeded {
        ambulance_id: AmbulanceId,
        hospital_id: HospitalId,
    },
    #[serde(rename = "OverloadError")]
    Overloaded {
        ambulance_id: AmbulanceId,
        onboard: Vec<PatientId>,
        time: Time,
    },
    #[serde(rename = "PatientDiedError")]
    PatientDied {
        ambulance_id: AmbulanceId,
        patient_id: PatientId,
        patient: Patient,
        hospital_id: HospitalId,
        time: Time,
    },
    #[serde(rename = "DoubleSavedError")]
    DoubleSaved {
        ambulance_id: AmbulanceId,
        patient_id: PatientId,
        hospital_id: HospitalId,
        existing: SaveRecord,
        time: Time,
    },
    UnknownHospital {
        ambulance_id: AmbulanceId,
        hospital_id: HospitalId,
    },
    UnknownPatient {
        ambulance_id: AmbulanceId,
        patient_id: PatientId,
    },
}

impl Violation {
    pub fn ambulance_id(&self) -> AmbulanceId {
        match self {
            Violation::UnknownAction { ambulance_id, .. }
            | Violation::MissingStartHospital { ambulance_id }
            | Violation::MissingFinalUnload { ambulance_id }
            | Violation::StartCapacityExceeded { ambulance_id, .. }
            | Violation::Overloaded { ambulance_id, .. }
            | Violation::PatientDied { ambulance_id, .. }
            | Violation::DoubleSaved { ambulance_id, .. }
            | Violation::UnknownHospital { ambulance_id, .. }
            | Violation::UnknownPatient { ambulance_id, .. } => *ambulance_id,
        }
    }

    /// Taxonomy name, also used as the `kind` tag in serialized reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::UnknownAction { .. } => "UnknownAction",
            Violation::MissingStartHospital { .. } => "MissingStartHospital",
            Violation::MissingFinalUnload { .. } => "MissingFinalUnload",
            Violation::StartCapacityExceeded { .. } => "StartCapacityExceeded",
            Violation::Overloaded { .. } => "OverloadError",
            Violation::PatientDied { .. } => "PatientDiedError",
            Violation::DoubleSaved { .. } => "DoubleSavedError",
            Violation::UnknownHospital { .. } => "UnknownHospital",
            Violation::UnknownPatient { .. } => "UnknownPatient",
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::UnknownAction {
                ambulance_id,
                tag,
                id,
            } => write!(f, "Unknown action {}{} for ambulance {}.", tag, id, ambulance_id),
            Violation::MissingStartHospital { ambulance_id } => write!(
                f,
                "You have to start at a hospital for ambulance {}.",
                ambulance_id
            ),
            Violation::MissingFinalUnload { ambulance_id } => write!(
                f,
                "You have to unload all your patients on ambulance {} to a hospital.",
                ambulance_id
            ),
            Violation::StartCapacityExceeded {
                ambulance_id,
                hospital_id,
            } => write!(
                f,
                "More ambulances (ambulance {}) from hospital {} than allowed.",
                ambulance_id, hospital_id
            ),
            Violation::Overloaded {
                ambulance_id,
                onboard,
                time,
            } => write!(
                f,
                "Ambulance {} is overloaded when adding patient {} (onboard {:?}) at time {}.",
                ambulance_id,
                onboard.last().copied().unwrap_or_default(),
                onboard,
                time
            ),
            Violation::PatientDied {
                ambulance_id,
                patient_id,
                patient,
                hospital_id,
                time,
            } => write!(
                f,
                "Ambulance {} tries to save patient {}{}, but unloads at hospital {} at time {}.",
                ambulance_id, patient_id, patient, hospital_id, time
            ),
            Violation::DoubleSaved {
                ambulance_id,
                patient_id,
                hospital_id,
                existing,
                time,
            } => write!(
                f,
                "Patient {} was saved by ambulance {} at hospital {} at time {}, and is now sent to hospital {} at time {} by ambulance {}.",
                patient_id,
                existing.ambulance_id,
                existing.hospital_id,
                existing.time,
                hospital_id,
                time,
                ambulance_id
            ),
            Violation::UnknownHospital {
                ambulance_id,
                hospital_id,
            } => write!(
                f,
                "Ambulance {} refers to unknown hospital {}.",
                ambulance_id, hospital_id
            ),
            Violation::UnknownPatient {
                ambulance_id,
                patient_id,
            } => write!(
                f,
                "Ambulance {} refers to unknown patient {}.",
                ambulance_id, patient_id
            ),
        }
    }
}

impl std::error::Error for Violation {}

pub type ViolationResult<T> = std::result::Result<T, Violation>;
