//! # API Facade
//!
//! [`ClinicApi`] is a thin facade over the command layer and the single
//! entry point for every operation, whatever the frontend. It owns the
//! store and one identifier allocator per record kind; both allocators are
//! seeded once, when the API opens.
//!
//! The facade does no business logic (that lives in `commands/*.rs`), no
//! I/O, and no presentation: it returns structured `CmdResult` values for
//! the caller to render.
//!
//! `ClinicApi<S>` is generic over the storage backend:
//! - Production: `ClinicApi<FileStore>` or `ClinicApi<DbStore>`
//! - Testing: `ClinicApi<InMemoryStore>`

use crate::alloc::IdAllocator;
use crate::commands;
use crate::error::Result;
use crate::model::{Appointment, Patient};
use crate::store::RecordStore;

pub struct ClinicApi<S>
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    store: S,
    patient_ids: IdAllocator,
    appointment_ids: IdAllocator,
}

impl<S> ClinicApi<S>
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    /// Take ownership of the store and seed both allocators from it.
    pub fn open(store: S) -> Result<Self> {
        let patient_ids = IdAllocator::open::<Patient, _>(&store)?;
        let appointment_ids = IdAllocator::open::<Appointment, _>(&store)?;
        Ok(Self {
            store,
            patient_ids,
            appointment_ids,
        })
    }

    pub fn add_patient(&mut self, draft: PatientDraft) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, &mut self.patient_ids, draft)
    }

    pub fn list_patients(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn search_patient(&self, id: u32) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, id)
    }

    pub fn edit_patient(&mut self, id: u32, update: &PatientUpdate) -> Result<commands::CmdResult> {
        commands::edit::run(&mut self.store, id, update)
    }

    pub fn schedule_appointment(&mut self, draft: AppointmentDraft) -> Result<commands::CmdResult> {
        commands::schedule::run(&mut self.store, &mut self.appointment_ids, draft)
    }

    pub fn list_appointments(&self) -> Result<commands::CmdResult> {
        commands::agenda::run(&self.store)
    }
}

pub use crate::commands::{
    AppointmentDraft, CmdMessage, CmdResult, MessageLevel, PatientDraft, PatientUpdate,
};
