use ambu_structs::core::{HospitalId, PatientId, ProblemInstance, SaveRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The patient already has a record; it is returned unchanged.
    AlreadySaved(SaveRecord),
    /// Id 0 or an id past the last patient.
    NoSlot,
}

/// Which ambulance delivered which patient, where and when.
///
/// Holds one slot per patient plus the unused slot 0. A slot is written at
/// most once during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveLedger {
    slots: Vec<Option<SaveRecord>>,
}

impl SaveLedger {
    pub fn new(num_patients: usize) -> Self {
        Self {
            slots: vec![None; num_patients + 1],
        }
    }

    pub fn get(&self, patient_id: PatientId) -> Option<&SaveRecord> {
        self.slots.get(patient_id).and_then(Option::as_ref)
    }

    /// Writes `record` into an empty slot. If the patient was already saved
    /// the slot is left untouched and the existing record is returned. The
    /// ledger never grows past the patient count it was created with.
    pub fn record(
        &mut self,
        patient_id: PatientId,
        record: SaveRecord,
    ) -> Result<(), RecordError> {
        if patient_id == 0 {
            return Err(RecordError::NoSlot);
        }
        match self.slots.get_mut(patient_id) {
            None => Err(RecordError::NoSlot),
            Some(Some(existing)) => Err(RecordError::AlreadySaved(existing.clone())),
            Some(slot) => {
                *slot = Some(record);
                Ok(())
            }
        }
    }

    pub fn count_saved(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Saved patients in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (PatientId, &SaveRecord)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(patient_id, slot)| slot.as_ref().map(|record| (patient_id, record)))
    }
}

/// Remaining start slots per hospital, copied from the problem at run start.
#[derive(Debug, Clone, PartialEq)]
pub struct StartCapacities {
    remaining: Vec<u32>,
}

impl StartCapacities {
    pub fn new(problem: &ProblemInstance) -> Self {
        Self {
            remaining: problem.hospital_capacities.clone(),
        }
    }

    pub fn remaining(&self, hospital_id: HospitalId) -> Option<u32> {
        hospital_id
            .checked_sub(1)
            .and_then(|idx| self.remaining.get(idx))
            .copied()
    }

    /// Takes one start slot from `hospital_id`. Returns false, leaving the
    /// counter at zero, when none is left or the hospital is unknown.
    pub fn claim(&mut self, hospital_id: HospitalId) -> bool {
        let slot = hospital_id
            .checked_sub(1)
            .and_then(|idx| self.remaining.get_mut(idx));
        match slot {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}

/// Mutable state shared by every ambulance of one run.
#[derive(Debug, Clone)]
pub struct RunState {
    pub ledger: SaveLedger,
    pub capacities: StartCapacities,
}

impl RunState {
    pub fn new(problem: &ProblemInstance) -> Self {
        Self {
            ledger: SaveLedger::new(problem.num_patients()),
            capacities: StartCapacities::new(problem),
        }
    }
}
