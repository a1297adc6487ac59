use crate::error::{MedrecError, Result};
use crate::model::{Appointment, Patient};
use crate::model::{DATE_CAP, DIAGNOSIS_CAP, DOCTOR_CAP, GENDER_CAP, NAME_CAP, TIME_CAP};

pub mod add;
pub mod agenda;
pub mod edit;
pub mod list;
pub mod schedule;
pub mod search;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured outcome of a command: records to render plus leveled
/// messages. The CLI decides how to present it; commands never print.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }

    pub fn with_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.appointments = appointments;
        self
    }
}

/// Field values for a new patient; the identifier is allocator-assigned.
#[derive(Debug, Clone)]
pub struct PatientDraft {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub diagnosis: String,
}

impl PatientDraft {
    pub(crate) fn validate(&self) -> Result<()> {
        check_len("name", &self.name, NAME_CAP)?;
        check_len("gender", &self.gender, GENDER_CAP)?;
        check_len("diagnosis", &self.diagnosis, DIAGNOSIS_CAP)?;
        Ok(())
    }
}

/// Field values for a new appointment. `patient_id` is taken as given,
/// with no existence check.
#[derive(Debug, Clone)]
pub struct AppointmentDraft {
    pub patient_id: u32,
    pub date: String,
    pub time: String,
    pub doctor: String,
}

impl AppointmentDraft {
    pub(crate) fn validate(&self) -> Result<()> {
        check_len("date", &self.date, DATE_CAP)?;
        check_len("time", &self.time, TIME_CAP)?;
        check_len("doctor", &self.doctor, DOCTOR_CAP)?;
        Ok(())
    }
}

/// Replacement values for an edit, where a blank string or a zero age
/// means "keep the previous value".
///
/// This convention is inherited as-is: it cannot express "set the field to
/// blank/zero", and that ambiguity is carried forward deliberately rather
/// than resolved one way.
#[derive(Debug, Clone, Default)]
pub struct PatientUpdate {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub diagnosis: String,
}

impl PatientUpdate {
    /// Merge the update onto `current`, keeping the identifier and any
    /// field left blank/zero.
    pub fn apply_to(&self, current: &Patient) -> Patient {
        Patient {
            id: current.id,
            name: keep_if_blank(&self.name, &current.name),
            age: if self.age == 0 { current.age } else { self.age },
            gender: keep_if_blank(&self.gender, &current.gender),
            diagnosis: keep_if_blank(&self.diagnosis, &current.diagnosis),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_len("name", &self.name, NAME_CAP)?;
        check_len("gender", &self.gender, GENDER_CAP)?;
        check_len("diagnosis", &self.diagnosis, DIAGNOSIS_CAP)?;
        Ok(())
    }
}

fn keep_if_blank(replacement: &str, current: &str) -> String {
    if replacement.is_empty() {
        current.to_string()
    } else {
        replacement.to_string()
    }
}

/// Length-check a text field at the input boundary, in bytes, matching
/// the slot codec's capacities.
fn check_len(field: &str, value: &str, cap: usize) -> Result<()> {
    if value.len() > cap {
        return Err(MedrecError::InvalidInput(format!(
            "{} is {} bytes, the limit is {}",
            field,
            value.len(),
            cap
        )));
    }
    Ok(())
}
