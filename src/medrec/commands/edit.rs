use crate::commands::{CmdMessage, CmdResult, PatientUpdate};
use crate::error::Result;
use crate::model::Patient;
use crate::store::RecordStore;

pub fn run<S: RecordStore<Patient>>(
    store: &mut S,
    id: u32,
    update: &PatientUpdate,
) -> Result<CmdResult> {
    update.validate()?;

    // Confirm existence first; the merge needs the current values anyway.
    let current = store.find_by_id(id)?;
    let merged = update.apply_to(&current);
    store.update_in_place(id, &merged)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Patient {} updated.", id)));
    result.patients.push(merged);
    Ok(result)
}
