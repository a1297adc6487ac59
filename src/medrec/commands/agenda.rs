use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Appointment;
use crate::store::RecordStore;

pub fn run<S: RecordStore<Appointment>>(store: &S) -> Result<CmdResult> {
    let appointments = store.scan_all()?;
    Ok(CmdResult::default().with_appointments(appointments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::IdAllocator;
    use crate::commands::{schedule, AppointmentDraft};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn empty_store_lists_nothing_without_erroring() {
        let store = InMemoryStore::new();
        let result = run(&store).unwrap();
        assert!(result.appointments.is_empty());
    }

    #[test]
    fn lists_appointments_in_booking_order() {
        let mut store = InMemoryStore::new();
        let mut ids = IdAllocator::open::<Appointment, _>(&store).unwrap();
        for doctor in ["Dr. Rao", "Dr. Iyer"] {
            schedule::run(
                &mut store,
                &mut ids,
                AppointmentDraft {
                    patient_id: 1,
                    date: "2024-05-01".to_string(),
                    time: "10:00".to_string(),
                    doctor: doctor.to_string(),
                },
            )
            .unwrap();
        }

        let result = run(&store).unwrap();
        assert_eq!(result.appointments.len(), 2);
        assert_eq!(result.appointments[0].doctor, "Dr. Rao");
        assert_eq!(result.appointments[1].id, 1002);
    }
}
