use super::{Record, RecordStore};
use crate::error::{MedrecError, Result};
use crate::model::{Appointment, Patient};

/// In-memory storage for tests: no persistence, same observable semantics
/// as the production backends.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn find_in<R: Record>(records: &[R], id: u32) -> Result<&R> {
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or(MedrecError::RecordNotFound { kind: R::KIND, id })
}

fn update_in<R: Record>(records: &mut [R], id: u32, record: &R) -> Result<()> {
    let slot = records
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or(MedrecError::RecordNotFound { kind: R::KIND, id })?;
    *slot = record.clone();
    Ok(())
}

impl RecordStore<Patient> for InMemoryStore {
    fn append(&mut self, record: &Patient) -> Result<()> {
        self.patients.push(record.clone());
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<Patient>> {
        Ok(self.patients.clone())
    }

    fn find_by_id(&self, id: u32) -> Result<Patient> {
        find_in(&self.patients, id).cloned()
    }

    fn update_in_place(&mut self, id: u32, record: &Patient) -> Result<()> {
        update_in(&mut self.patients, id, record)
    }

    fn last_record(&self) -> Result<Option<Patient>> {
        Ok(self.patients.last().cloned())
    }
}

impl RecordStore<Appointment> for InMemoryStore {
    fn append(&mut self, record: &Appointment) -> Result<()> {
        self.appointments.push(record.clone());
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<Appointment>> {
        Ok(self.appointments.clone())
    }

    fn find_by_id(&self, id: u32) -> Result<Appointment> {
        find_in(&self.appointments, id).cloned()
    }

    fn update_in_place(&mut self, id: u32, record: &Appointment) -> Result<()> {
        update_in(&mut self.appointments, id, record)
    }

    fn last_record(&self) -> Result<Option<Appointment>> {
        Ok(self.appointments.last().cloned())
    }
}
