use serde::{Deserialize, Serialize};

/// Byte capacities for text fields, carried over from the original record
/// layout. Input longer than the capacity is rejected at the boundary; the
/// stores never see an over-capacity value.
pub const NAME_CAP: usize = 100;
pub const GENDER_CAP: usize = 10;
pub const DIAGNOSIS_CAP: usize = 120;
pub const DATE_CAP: usize = 12; // YYYY-MM-DD
pub const TIME_CAP: usize = 8; // HH:MM
pub const DOCTOR_CAP: usize = 64;

/// A patient record. Identifiers are assigned once at creation by the
/// allocator and never change; every other field may be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub diagnosis: String,
}

/// An appointment booking. `patient_id` is a soft reference: it names a
/// patient without any existence check. Date and time are stored as given,
/// unvalidated. Appointments are never edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u32,
    pub patient_id: u32,
    pub date: String,
    pub time: String,
    pub doctor: String,
}
