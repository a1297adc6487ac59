use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::codec::SlotCodec;
use super::{Record, RecordStore};
use crate::error::{MedrecError, Result};
use crate::model::{Appointment, Patient};

const PATIENT_FILE: &str = "patients.dat";
const APPOINTMENT_FILE: &str = "appointments.dat";

const MAGIC: [u8; 4] = *b"MREC";
const FORMAT_VERSION: u16 = 1;
const HEADER_LEN: u64 = 8;

/// Fixed-slot file storage, one file per record kind under a data
/// directory.
///
/// Each file starts with an 8-byte header (magic, format version, slot
/// size) followed by equally sized slots, so slot `i` lives at
/// `HEADER_LEN + i * SLOT_SIZE` and can be rewritten without touching its
/// neighbors. The header is validated on every open; a file written with
/// different field capacities fails loudly instead of decoding garbage.
///
/// File handles are scoped to a single operation: opened on entry,
/// released on every exit path. The store assumes one exclusive process.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn patient_path(&self) -> PathBuf {
        self.dir.join(PATIENT_FILE)
    }

    fn appointment_path(&self) -> PathBuf {
        self.dir.join(APPOINTMENT_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

fn header_bytes(slot_size: usize) -> [u8; HEADER_LEN as usize] {
    let mut header = [0u8; HEADER_LEN as usize];
    header[..4].copy_from_slice(&MAGIC);
    header[4..6].copy_from_slice(&FORMAT_VERSION.to_le_bytes());
    header[6..8].copy_from_slice(&(slot_size as u16).to_le_bytes());
    header
}

/// Read and validate the header of an already-open store file.
fn check_header(file: &mut File, path: &Path, slot_size: usize) -> Result<()> {
    let mut header = [0u8; HEADER_LEN as usize];
    file.read_exact(&mut header).map_err(|_| {
        MedrecError::Store(format!("{} is too short to hold a header", path.display()))
    })?;
    if header[..4] != MAGIC {
        return Err(MedrecError::Store(format!(
            "{} is not a medrec store file",
            path.display()
        )));
    }
    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != FORMAT_VERSION {
        return Err(MedrecError::Store(format!(
            "{} has format version {}, expected {}",
            path.display(),
            version,
            FORMAT_VERSION
        )));
    }
    let stored_slot = u16::from_le_bytes([header[6], header[7]]) as usize;
    if stored_slot != slot_size {
        return Err(MedrecError::Store(format!(
            "{} has slot size {}, expected {}",
            path.display(),
            stored_slot,
            slot_size
        )));
    }
    Ok(())
}

/// Number of whole slots in a store file, rejecting truncated tails.
fn slot_count(path: &Path, file_len: u64, slot_size: usize) -> Result<u64> {
    let body = file_len - HEADER_LEN;
    if body % slot_size as u64 != 0 {
        return Err(MedrecError::Store(format!(
            "{} is truncated mid-slot",
            path.display()
        )));
    }
    Ok(body / slot_size as u64)
}

fn append_slot<R: Record + SlotCodec>(path: &Path, record: &R) -> Result<()> {
    // Encode before opening: a rejected record must leave the file alone.
    let slot = record.encode_slot()?;

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)?;
    let len = file.metadata()?.len();
    if len == 0 {
        file.write_all(&header_bytes(R::SLOT_SIZE))?;
    } else {
        check_header(&mut file, path, R::SLOT_SIZE)?;
        slot_count(path, len, R::SLOT_SIZE)?;
        file.seek(SeekFrom::End(0))?;
    }
    file.write_all(&slot)?;
    Ok(())
}

fn read_all<R: Record + SlotCodec>(path: &Path) -> Result<Vec<R>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        // First run: no file yet means an empty store, not an error.
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(Vec::new());
    }
    check_header(&mut file, path, R::SLOT_SIZE)?;
    let count = slot_count(path, len, R::SLOT_SIZE)?;

    let mut records = Vec::with_capacity(count as usize);
    let mut slot = vec![0u8; R::SLOT_SIZE];
    for _ in 0..count {
        file.read_exact(&mut slot)?;
        records.push(R::decode_slot(&slot)?);
    }
    Ok(records)
}

fn find_slot<R: Record + SlotCodec>(path: &Path) -> Result<FindScan<R>> {
    Ok(FindScan {
        records: read_all(path)?,
    })
}

struct FindScan<R> {
    records: Vec<R>,
}

impl<R: Record> FindScan<R> {
    /// First record matching `id`, with its slot index.
    fn locate(&self, id: u32) -> Result<(usize, &R)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, r)| r.id() == id)
            .ok_or(MedrecError::RecordNotFound { kind: R::KIND, id })
    }
}

fn update_slot<R: Record + SlotCodec>(path: &Path, id: u32, record: &R) -> Result<()> {
    let (index, _) = find_slot::<R>(path)?.locate(id)?;
    let slot = record.encode_slot()?;

    let mut file = OpenOptions::new().write(true).open(path)?;
    let offset = HEADER_LEN + index as u64 * R::SLOT_SIZE as u64;
    file.seek(SeekFrom::Start(offset))?;
    file.write_all(&slot)?;
    Ok(())
}

fn last_slot<R: Record + SlotCodec>(path: &Path) -> Result<Option<R>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(None);
    }
    check_header(&mut file, path, R::SLOT_SIZE)?;
    let count = slot_count(path, len, R::SLOT_SIZE)?;
    if count == 0 {
        return Ok(None);
    }

    let offset = HEADER_LEN + (count - 1) * R::SLOT_SIZE as u64;
    file.seek(SeekFrom::Start(offset))?;
    let mut slot = vec![0u8; R::SLOT_SIZE];
    file.read_exact(&mut slot)?;
    Ok(Some(R::decode_slot(&slot)?))
}

impl RecordStore<Patient> for FileStore {
    fn append(&mut self, record: &Patient) -> Result<()> {
        self.ensure_dir()?;
        append_slot(&self.patient_path(), record)
    }

    fn scan_all(&self) -> Result<Vec<Patient>> {
        read_all(&self.patient_path())
    }

    fn find_by_id(&self, id: u32) -> Result<Patient> {
        let scan = find_slot::<Patient>(&self.patient_path())?;
        scan.locate(id).map(|(_, r)| r.clone())
    }

    fn update_in_place(&mut self, id: u32, record: &Patient) -> Result<()> {
        update_slot(&self.patient_path(), id, record)
    }

    fn last_record(&self) -> Result<Option<Patient>> {
        last_slot(&self.patient_path())
    }
}

impl RecordStore<Appointment> for FileStore {
    fn append(&mut self, record: &Appointment) -> Result<()> {
        self.ensure_dir()?;
        append_slot(&self.appointment_path(), record)
    }

    fn scan_all(&self) -> Result<Vec<Appointment>> {
        read_all(&self.appointment_path())
    }

    fn find_by_id(&self, id: u32) -> Result<Appointment> {
        let scan = find_slot::<Appointment>(&self.appointment_path())?;
        scan.locate(id).map(|(_, r)| r.clone())
    }

    fn update_in_place(&mut self, id: u32, record: &Appointment) -> Result<()> {
        update_slot(&self.appointment_path(), id, record)
    }

    fn last_record(&self) -> Result<Option<Appointment>> {
        last_slot(&self.appointment_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn patient(id: u32, name: &str) -> Patient {
        Patient {
            id,
            name: name.to_string(),
            age: 40,
            gender: "F".to_string(),
            diagnosis: "Checkup".to_string(),
        }
    }

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn scan_of_missing_file_is_empty() {
        let (_dir, store) = store();
        let patients: Vec<Patient> = store.scan_all().unwrap();
        assert!(patients.is_empty());
    }

    #[test]
    fn append_then_scan_preserves_insertion_order() {
        let (_dir, mut store) = store();
        store.append(&patient(1, "Asha")).unwrap();
        store.append(&patient(2, "Raj")).unwrap();
        store.append(&patient(3, "Mira")).unwrap();

        let patients: Vec<Patient> = store.scan_all().unwrap();
        let ids: Vec<u32> = patients.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(patients[2].name, "Mira");
    }

    #[test]
    fn find_by_id_returns_the_full_record() {
        let (_dir, mut store) = store();
        store.append(&patient(1, "Asha")).unwrap();
        store.append(&patient(2, "Raj")).unwrap();

        let found: Patient = store.find_by_id(2).unwrap();
        assert_eq!(found, patient(2, "Raj"));
    }

    #[test]
    fn find_miss_is_record_not_found() {
        let (_dir, mut store) = store();
        store.append(&patient(1, "Asha")).unwrap();

        let err = RecordStore::<Patient>::find_by_id(&store, 99).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn find_on_missing_file_is_record_not_found() {
        let (_dir, store) = store();
        let err = RecordStore::<Patient>::find_by_id(&store, 1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn update_in_place_rewrites_only_the_target_slot() {
        let (dir, mut store) = store();
        store.append(&patient(1, "Asha")).unwrap();
        store.append(&patient(2, "Raj")).unwrap();
        store.append(&patient(3, "Mira")).unwrap();
        let len_before = std::fs::metadata(dir.path().join(PATIENT_FILE))
            .unwrap()
            .len();

        let mut updated = patient(2, "Raj");
        updated.diagnosis = "Recovered".to_string();
        store.update_in_place(2, &updated).unwrap();

        let patients: Vec<Patient> = store.scan_all().unwrap();
        assert_eq!(patients[0], patient(1, "Asha"));
        assert_eq!(patients[1].diagnosis, "Recovered");
        assert_eq!(patients[2], patient(3, "Mira"));

        // Positional rewrite: the file never grows on update.
        let len_after = std::fs::metadata(dir.path().join(PATIENT_FILE))
            .unwrap()
            .len();
        assert_eq!(len_before, len_after);
    }

    #[test]
    fn update_of_unknown_id_is_record_not_found() {
        let (_dir, mut store) = store();
        store.append(&patient(1, "Asha")).unwrap();
        let err = store.update_in_place(9, &patient(9, "Nobody")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn last_record_tracks_the_latest_append() {
        let (_dir, mut store) = store();
        assert!(RecordStore::<Patient>::last_record(&store)
            .unwrap()
            .is_none());

        store.append(&patient(1, "Asha")).unwrap();
        store.append(&patient(2, "Raj")).unwrap();
        let last: Option<Patient> = store.last_record().unwrap();
        assert_eq!(last.unwrap().id, 2);
    }

    #[test]
    fn patients_and_appointments_live_in_separate_files() {
        let (_dir, mut store) = store();
        store.append(&patient(1, "Asha")).unwrap();
        store
            .append(&Appointment {
                id: 1001,
                patient_id: 1,
                date: "2024-05-01".to_string(),
                time: "10:00".to_string(),
                doctor: "Dr. Rao".to_string(),
            })
            .unwrap();

        let patients: Vec<Patient> = store.scan_all().unwrap();
        let appointments: Vec<Appointment> = store.scan_all().unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(appointments.len(), 1);
        assert_eq!(appointments[0].id, 1001);
    }

    #[test]
    fn truncated_file_is_a_store_error() {
        let (dir, mut store) = store();
        store.append(&patient(1, "Asha")).unwrap();

        let path = dir.path().join(PATIENT_FILE);
        let len = std::fs::metadata(&path).unwrap().len();
        let file = OpenOptions::new().write(true).open(&path).unwrap();
        file.set_len(len - 10).unwrap();

        let err = RecordStore::<Patient>::scan_all(&store).unwrap_err();
        assert!(matches!(err, MedrecError::Store(_)));
    }

    #[test]
    fn foreign_file_is_a_store_error() {
        let (dir, store) = store();
        std::fs::write(dir.path().join(PATIENT_FILE), b"definitely not a store").unwrap();

        let err = RecordStore::<Patient>::scan_all(&store).unwrap_err();
        assert!(matches!(err, MedrecError::Store(_)));
    }
}
