//! # Storage Layer
//!
//! This module defines the storage abstraction for medrec. The
//! [`RecordStore`] trait lets the application work with different backends
//! behind one contract.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Make the **backend a deployment choice**: file-based or SQLite, wired
//!   by dependency injection at startup, never a compile-time switch
//! - Keep business logic **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: fixed-slot binary files, one per record kind
//!   - `patients.dat` and `appointments.dat` under the data directory
//!   - slot position = header + index × slot size, so a single record can
//!     be rewritten in place without touching the rest of the file
//! - [`db::DbStore`]: SQLite database, one table per record kind
//! - [`memory::InMemoryStore`]: vector-backed storage for tests
//!
//! ## Contract Notes
//!
//! Stores hold a homogeneous, append-only sequence per record kind, in
//! insertion order. An absent backing file is an empty store, not an error;
//! only genuine I/O failures surface as errors. Identifier uniqueness is
//! the allocator's job, not the store's: `append` performs no duplicate
//! check, and `find_by_id` returns the first match of a linear scan.

use std::fmt;

use crate::error::Result;
use crate::model::{Appointment, Patient};

pub mod codec;
pub mod db;
pub mod fs;
pub mod memory;

/// Which kind of record a store operation was about, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Patient,
    Appointment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Patient => write!(f, "patient"),
            RecordKind::Appointment => write!(f, "appointment"),
        }
    }
}

/// A record type that can live in a [`RecordStore`].
pub trait Record: Clone {
    /// First identifier handed out when the store is empty. Patients and
    /// appointments use disjoint numbering spaces.
    const BASE_ID: u32;

    const KIND: RecordKind;

    fn id(&self) -> u32;
}

impl Record for Patient {
    const BASE_ID: u32 = 1;
    const KIND: RecordKind = RecordKind::Patient;

    fn id(&self) -> u32 {
        self.id
    }
}

impl Record for Appointment {
    const BASE_ID: u32 = 1001;
    const KIND: RecordKind = RecordKind::Appointment;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Abstract interface for one record kind's persistence.
///
/// A backend implements this once per kind it stores, so a single store
/// value can serve both patients and appointments.
pub trait RecordStore<R: Record> {
    /// Write `record` after all existing records. No duplicate-identifier
    /// check: identifiers are allocator-assigned immediately before append.
    fn append(&mut self, record: &R) -> Result<()>;

    /// All records in insertion order. An empty or absent store yields an
    /// empty vector.
    fn scan_all(&self) -> Result<Vec<R>>;

    /// Linear scan for the first record whose identifier matches.
    fn find_by_id(&self, id: u32) -> Result<R>;

    /// Overwrite the full slot of the record with identifier `id` at its
    /// current position. All-or-nothing per slot. The caller keeps
    /// `record.id()` equal to `id`; identifiers never change.
    fn update_in_place(&mut self, id: u32, record: &R) -> Result<()>;

    /// The most recently appended record, or `None` for a never-written
    /// store. Consumed by the ID allocator when it opens.
    fn last_record(&self) -> Result<Option<R>>;
}
