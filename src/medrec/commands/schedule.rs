use crate::alloc::IdAllocator;
use crate::commands::{AppointmentDraft, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Appointment;
use crate::store::RecordStore;

pub fn run<S: RecordStore<Appointment>>(
    store: &mut S,
    ids: &mut IdAllocator,
    draft: AppointmentDraft,
) -> Result<CmdResult> {
    draft.validate()?;

    let appointment = Appointment {
        id: ids.allocate(),
        patient_id: draft.patient_id,
        date: draft.date,
        time: draft.time,
        doctor: draft.doctor,
    };
    store.append(&appointment)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Appointment scheduled. Assigned ID {}.",
        appointment.id
    )));
    result.appointments.push(appointment);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn draft(patient_id: u32) -> AppointmentDraft {
        AppointmentDraft {
            patient_id,
            date: "2024-05-01".to_string(),
            time: "10:00".to_string(),
            doctor: "Dr. Rao".to_string(),
        }
    }

    #[test]
    fn assigned_ids_count_up_from_1001() {
        let mut store = InMemoryStore::new();
        let mut ids = IdAllocator::open::<Appointment, _>(&store).unwrap();

        for expected in 1001..=1003u32 {
            let result = run(&mut store, &mut ids, draft(1)).unwrap();
            assert_eq!(result.appointments[0].id, expected);
        }
    }

    #[test]
    fn unknown_patient_ids_are_accepted() {
        // patient_id is a soft reference: no existence check anywhere.
        let mut store = InMemoryStore::new();
        let mut ids = IdAllocator::open::<Appointment, _>(&store).unwrap();
        let result = run(&mut store, &mut ids, draft(999)).unwrap();
        assert_eq!(result.appointments[0].patient_id, 999);
    }

    #[test]
    fn scheduled_appointment_keeps_its_fields() {
        let mut store = InMemoryStore::new();
        let mut ids = IdAllocator::open::<Appointment, _>(&store).unwrap();
        run(&mut store, &mut ids, draft(1)).unwrap();

        let stored: Appointment = store.find_by_id(1001).unwrap();
        assert_eq!(stored.date, "2024-05-01");
        assert_eq!(stored.time, "10:00");
        assert_eq!(stored.doctor, "Dr. Rao");
    }
}
