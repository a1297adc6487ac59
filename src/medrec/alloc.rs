//! Sequential identifier allocation.
//!
//! One allocator per record kind. The counter is seeded once when the
//! allocator opens, from the last persisted record's identifier, and then
//! incremented in memory per allocation. Patients start at 1, appointments
//! at 1001; the two spaces never overlap and are never compared.
//!
//! Known limitation, by contract rather than oversight: seeding from the
//! last record assumes a single exclusive writer. Two processes opening
//! the same store would seed the same counter and hand out duplicate
//! identifiers. Concurrent use is unsupported.

use crate::error::Result;
use crate::store::{Record, RecordStore};

#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Seed the counter from the store: `last identifier + 1`, or the
    /// record kind's base value when the store has never been written.
    pub fn open<R, S>(store: &S) -> Result<Self>
    where
        R: Record,
        S: RecordStore<R>,
    {
        let next = match store.last_record()? {
            Some(record) => record.id() + 1,
            None => R::BASE_ID,
        };
        Ok(Self { next })
    }

    /// Hand out the next identifier. Identifiers are assigned exactly once
    /// and never reused, even if the record is later edited.
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The identifier the next allocation would return.
    pub fn peek(&self) -> u32 {
        self.next
    }
}
