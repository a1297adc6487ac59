use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Patient;
use crate::store::RecordStore;

pub fn run<S: RecordStore<Patient>>(store: &S) -> Result<CmdResult> {
    let patients = store.scan_all()?;
    Ok(CmdResult::default().with_patients(patients))
}
