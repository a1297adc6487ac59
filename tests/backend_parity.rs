//! The file and database backends must be indistinguishable through the
//! API: same identifiers, same records back, same misses.

use medrec::api::{AppointmentDraft, ClinicApi, PatientDraft, PatientUpdate};
use medrec::model::{Appointment, Patient};
use medrec::store::db::DbStore;
use medrec::store::fs::FileStore;
use medrec::store::RecordStore;
use tempfile::TempDir;

fn drive<S>(api: &mut ClinicApi<S>) -> (Vec<Patient>, Vec<Appointment>)
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    api.add_patient(PatientDraft {
        name: "Asha".to_string(),
        age: 30,
        gender: "F".to_string(),
        diagnosis: "Flu".to_string(),
    })
    .unwrap();
    api.add_patient(PatientDraft {
        name: "Raj".to_string(),
        age: 45,
        gender: "M".to_string(),
        diagnosis: "Fracture".to_string(),
    })
    .unwrap();
    api.edit_patient(
        1,
        &PatientUpdate {
            diagnosis: "Recovered".to_string(),
            ..PatientUpdate::default()
        },
    )
    .unwrap();
    api.schedule_appointment(AppointmentDraft {
        patient_id: 1,
        date: "2024-05-01".to_string(),
        time: "10:00".to_string(),
        doctor: "Dr. Rao".to_string(),
    })
    .unwrap();

    assert!(api.search_patient(99).unwrap_err().is_not_found());

    (
        api.list_patients().unwrap().patients,
        api.list_appointments().unwrap().appointments,
    )
}

#[test]
fn both_backends_observe_the_same_history() {
    let dir = TempDir::new().unwrap();
    let mut file_api = ClinicApi::open(FileStore::new(dir.path())).unwrap();
    let mut db_api = ClinicApi::open(DbStore::open_in_memory().unwrap()).unwrap();

    let (file_patients, file_appointments) = drive(&mut file_api);
    let (db_patients, db_appointments) = drive(&mut db_api);

    assert_eq!(file_patients, db_patients);
    assert_eq!(file_appointments, db_appointments);
    assert_eq!(file_patients[0].diagnosis, "Recovered");
    assert_eq!(file_appointments[0].id, 1001);
}

#[test]
fn reopening_the_file_backend_resumes_both_id_spaces() {
    let dir = TempDir::new().unwrap();
    {
        let mut api = ClinicApi::open(FileStore::new(dir.path())).unwrap();
        drive(&mut api);
    }

    let mut api = ClinicApi::open(FileStore::new(dir.path())).unwrap();
    let patient = api
        .add_patient(PatientDraft {
            name: "Mira".to_string(),
            age: 52,
            gender: "F".to_string(),
            diagnosis: "Asthma".to_string(),
        })
        .unwrap();
    let appointment = api
        .schedule_appointment(AppointmentDraft {
            patient_id: 3,
            date: "2024-06-10".to_string(),
            time: "09:30".to_string(),
            doctor: "Dr. Iyer".to_string(),
        })
        .unwrap();

    assert_eq!(patient.patients[0].id, 3);
    assert_eq!(appointment.appointments[0].id, 1002);
}
