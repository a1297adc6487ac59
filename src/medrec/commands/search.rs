use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Patient;
use crate::store::RecordStore;

pub fn run<S: RecordStore<Patient>>(store: &S, id: u32) -> Result<CmdResult> {
    let patient = store.find_by_id(id)?;
    Ok(CmdResult::default().with_patients(vec![patient]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::IdAllocator;
    use crate::commands::{add, PatientDraft};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn finds_a_patient_by_id() {
        let mut store = InMemoryStore::new();
        let mut ids = IdAllocator::open::<Patient, _>(&store).unwrap();
        add::run(
            &mut store,
            &mut ids,
            PatientDraft {
                name: "Asha".to_string(),
                age: 30,
                gender: "F".to_string(),
                diagnosis: "Flu".to_string(),
            },
        )
        .unwrap();

        let result = run(&store, 1).unwrap();
        assert_eq!(result.patients[0].name, "Asha");
    }

    #[test]
    fn never_issued_id_is_record_not_found() {
        let store = InMemoryStore::new();
        let err = run(&store, 123).unwrap_err();
        assert!(err.is_not_found());
    }
}
