use std::path::Path;

use rusqlite::{params, Connection, Row};

use super::RecordStore;
use crate::error::{MedrecError, Result};
use crate::model::{Appointment, Patient};
use crate::store::{Record, RecordKind};

/// SQLite-backed storage, one table per record kind.
///
/// The database satisfies the same contract as the slot files with row
/// operations instead of byte offsets: `update_in_place` becomes an
/// `UPDATE ... WHERE id`, `last_record` an `ORDER BY id DESC LIMIT 1`.
/// Identifiers are assigned by the allocator and inserted explicitly, so
/// the reported ID is known before the write on both backends.
///
/// The connection is opened once at process start and owned for the life
/// of the process, single exclusive user assumed.
pub struct DbStore {
    conn: Connection,
}

impl DbStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// A fresh in-memory database, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS patients (
             id        INTEGER PRIMARY KEY,
             name      TEXT NOT NULL,
             age       INTEGER NOT NULL,
             gender    TEXT NOT NULL,
             diagnosis TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS appointments (
             id         INTEGER PRIMARY KEY,
             patient_id INTEGER NOT NULL,
             date       TEXT NOT NULL,
             time       TEXT NOT NULL,
             doctor     TEXT NOT NULL
         );",
    )?;
    Ok(())
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        diagnosis: row.get(4)?,
    })
}

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        date: row.get(2)?,
        time: row.get(3)?,
        doctor: row.get(4)?,
    })
}

/// Map a single-row query miss to the store-level not-found error.
fn or_not_found<T: Record>(result: rusqlite::Result<T>, id: u32) -> Result<T> {
    match result {
        Ok(record) => Ok(record),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            Err(MedrecError::RecordNotFound { kind: T::KIND, id })
        }
        Err(err) => Err(err.into()),
    }
}

impl RecordStore<Patient> for DbStore {
    fn append(&mut self, record: &Patient) -> Result<()> {
        self.conn.execute(
            "INSERT INTO patients (id, name, age, gender, diagnosis) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.id,
                record.name,
                record.age,
                record.gender,
                record.diagnosis
            ],
        )?;
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<Patient>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, age, gender, diagnosis FROM patients ORDER BY id")?;
        let rows = stmt.query_map([], patient_from_row)?;
        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?);
        }
        Ok(patients)
    }

    fn find_by_id(&self, id: u32) -> Result<Patient> {
        let result = self.conn.query_row(
            "SELECT id, name, age, gender, diagnosis FROM patients WHERE id = ?1",
            params![id],
            patient_from_row,
        );
        or_not_found(result, id)
    }

    fn update_in_place(&mut self, id: u32, record: &Patient) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE patients SET name = ?2, age = ?3, gender = ?4, diagnosis = ?5 WHERE id = ?1",
            params![id, record.name, record.age, record.gender, record.diagnosis],
        )?;
        if changed == 0 {
            return Err(MedrecError::RecordNotFound {
                kind: RecordKind::Patient,
                id,
            });
        }
        Ok(())
    }

    fn last_record(&self) -> Result<Option<Patient>> {
        let result = self.conn.query_row(
            "SELECT id, name, age, gender, diagnosis FROM patients ORDER BY id DESC LIMIT 1",
            [],
            patient_from_row,
        );
        match result {
            Ok(patient) => Ok(Some(patient)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl RecordStore<Appointment> for DbStore {
    fn append(&mut self, record: &Appointment) -> Result<()> {
        self.conn.execute(
            "INSERT INTO appointments (id, patient_id, date, time, doctor)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.id,
                record.patient_id,
                record.date,
                record.time,
                record.doctor
            ],
        )?;
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<Appointment>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, patient_id, date, time, doctor FROM appointments ORDER BY id")?;
        let rows = stmt.query_map([], appointment_from_row)?;
        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?);
        }
        Ok(appointments)
    }

    fn find_by_id(&self, id: u32) -> Result<Appointment> {
        let result = self.conn.query_row(
            "SELECT id, patient_id, date, time, doctor FROM appointments WHERE id = ?1",
            params![id],
            appointment_from_row,
        );
        or_not_found(result, id)
    }

    fn update_in_place(&mut self, id: u32, record: &Appointment) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE appointments SET patient_id = ?2, date = ?3, time = ?4, doctor = ?5
             WHERE id = ?1",
            params![id, record.patient_id, record.date, record.time, record.doctor],
        )?;
        if changed == 0 {
            return Err(MedrecError::RecordNotFound {
                kind: RecordKind::Appointment,
                id,
            });
        }
        Ok(())
    }

    fn last_record(&self) -> Result<Option<Appointment>> {
        let result = self.conn.query_row(
            "SELECT id, patient_id, date, time, doctor FROM appointments ORDER BY id DESC LIMIT 1",
            [],
            appointment_from_row,
        );
        match result {
            Ok(appointment) => Ok(Some(appointment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
