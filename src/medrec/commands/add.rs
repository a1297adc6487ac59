use crate::alloc::IdAllocator;
use crate::commands::{CmdMessage, CmdResult, PatientDraft};
use crate::error::Result;
use crate::model::Patient;
use crate::store::RecordStore;

pub fn run<S: RecordStore<Patient>>(
    store: &mut S,
    ids: &mut IdAllocator,
    draft: PatientDraft,
) -> Result<CmdResult> {
    // Validate before allocating: a rejected draft must not consume an id.
    draft.validate()?;

    let patient = Patient {
        id: ids.allocate(),
        name: draft.name,
        age: draft.age,
        gender: draft.gender,
        diagnosis: draft.diagnosis,
    };
    store.append(&patient)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Patient added. Assigned ID {}.",
        patient.id
    )));
    result.patients.push(patient);
    Ok(result)
}
