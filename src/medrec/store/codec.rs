//! Fixed-slot binary codec for the file backend.
//!
//! Every record of a kind occupies a slot of the same size, so slot
//! positions are plain arithmetic and a single record can be rewritten in
//! place. Within a slot the encoding is explicit rather than a raw memory
//! image: integers are little-endian `u32`, text fields are a `u16` length
//! prefix plus UTF-8 bytes, zero-padded out to the field's capacity. The
//! length prefix means a decoder never depends on NUL termination, and a
//! capacity change shows up as a slot-size mismatch in the file header
//! instead of silently corrupting old data.

use crate::error::{MedrecError, Result};
use crate::model::{
    Appointment, Patient, DATE_CAP, DIAGNOSIS_CAP, DOCTOR_CAP, GENDER_CAP, NAME_CAP, TIME_CAP,
};

/// A record type with a fixed-size slot encoding.
pub trait SlotCodec: Sized {
    /// Exact encoded size in bytes. Never changes once a store file has
    /// been written; the file header records it so mismatches are caught
    /// at open time.
    const SLOT_SIZE: usize;

    fn encode_slot(&self) -> Result<Vec<u8>>;

    /// Decode one slot. `buf` must be exactly [`Self::SLOT_SIZE`] bytes.
    fn decode_slot(buf: &[u8]) -> Result<Self>;
}

/// Encoded width of a text field: length prefix plus capacity.
const fn text_width(cap: usize) -> usize {
    2 + cap
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn put_text(buf: &mut Vec<u8>, value: &str, cap: usize) -> Result<()> {
    let bytes = value.as_bytes();
    if bytes.len() > cap {
        return Err(MedrecError::InvalidInput(format!(
            "text field is {} bytes, capacity is {}",
            bytes.len(),
            cap
        )));
    }
    buf.extend_from_slice(&(bytes.len() as u16).to_le_bytes());
    buf.extend_from_slice(bytes);
    buf.resize(buf.len() + (cap - bytes.len()), 0);
    Ok(())
}

struct SlotReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SlotReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos + n;
        if end > self.buf.len() {
            return Err(MedrecError::Store("slot is truncated".to_string()));
        }
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn get_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn get_text(&mut self, cap: usize) -> Result<String> {
        let len_bytes = self.take(2)?;
        let len = u16::from_le_bytes([len_bytes[0], len_bytes[1]]) as usize;
        if len > cap {
            return Err(MedrecError::Store(format!(
                "field length {} exceeds capacity {}",
                len, cap
            )));
        }
        let field = self.take(cap)?;
        String::from_utf8(field[..len].to_vec())
            .map_err(|_| MedrecError::Store("field is not valid UTF-8".to_string()))
    }
}

impl SlotCodec for Patient {
    const SLOT_SIZE: usize = 4
        + text_width(NAME_CAP)
        + text_width(GENDER_CAP)
        + text_width(DIAGNOSIS_CAP)
        + 4;

    fn encode_slot(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::SLOT_SIZE);
        put_u32(&mut buf, self.id);
        put_text(&mut buf, &self.name, NAME_CAP)?;
        put_text(&mut buf, &self.gender, GENDER_CAP)?;
        put_text(&mut buf, &self.diagnosis, DIAGNOSIS_CAP)?;
        put_u32(&mut buf, self.age);
        debug_assert_eq!(buf.len(), Self::SLOT_SIZE);
        Ok(buf)
    }

    fn decode_slot(buf: &[u8]) -> Result<Self> {
        let mut r = SlotReader::new(buf);
        let id = r.get_u32()?;
        let name = r.get_text(NAME_CAP)?;
        let gender = r.get_text(GENDER_CAP)?;
        let diagnosis = r.get_text(DIAGNOSIS_CAP)?;
        let age = r.get_u32()?;
        Ok(Patient {
            id,
            name,
            age,
            gender,
            diagnosis,
        })
    }
}

impl SlotCodec for Appointment {
    const SLOT_SIZE: usize =
        4 + 4 + text_width(DATE_CAP) + text_width(TIME_CAP) + text_width(DOCTOR_CAP);

    fn encode_slot(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::SLOT_SIZE);
        put_u32(&mut buf, self.id);
        put_u32(&mut buf, self.patient_id);
        put_text(&mut buf, &self.date, DATE_CAP)?;
        put_text(&mut buf, &self.time, TIME_CAP)?;
        put_text(&mut buf, &self.doctor, DOCTOR_CAP)?;
        debug_assert_eq!(buf.len(), Self::SLOT_SIZE);
        Ok(buf)
    }

    fn decode_slot(buf: &[u8]) -> Result<Self> {
        let mut r = SlotReader::new(buf);
        let id = r.get_u32()?;
        let patient_id = r.get_u32()?;
        let date = r.get_text(DATE_CAP)?;
        let time = r.get_text(TIME_CAP)?;
        let doctor = r.get_text(DOCTOR_CAP)?;
        Ok(Appointment {
            id,
            patient_id,
            date,
            time,
            doctor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient() -> Patient {
        Patient {
            id: 7,
            name: "Asha Verma".to_string(),
            age: 30,
            gender: "F".to_string(),
            diagnosis: "Flu".to_string(),
        }
    }

    #[test]
    fn patient_slot_roundtrip() {
        let p = sample_patient();
        let buf = p.encode_slot().unwrap();
        assert_eq!(buf.len(), Patient::SLOT_SIZE);
        assert_eq!(Patient::decode_slot(&buf).unwrap(), p);
    }

    #[test]
    fn appointment_slot_roundtrip() {
        let a = Appointment {
            id: 1001,
            patient_id: 1,
            date: "2024-05-01".to_string(),
            time: "10:00".to_string(),
            doctor: "Dr. Rao".to_string(),
        };
        let buf = a.encode_slot().unwrap();
        assert_eq!(buf.len(), Appointment::SLOT_SIZE);
        assert_eq!(Appointment::decode_slot(&buf).unwrap(), a);
    }

    #[test]
    fn empty_text_fields_roundtrip() {
        let p = Patient {
            id: 1,
            name: String::new(),
            age: 0,
            gender: String::new(),
            diagnosis: String::new(),
        };
        let buf = p.encode_slot().unwrap();
        assert_eq!(Patient::decode_slot(&buf).unwrap(), p);
    }

    #[test]
    fn multibyte_names_survive() {
        let mut p = sample_patient();
        p.name = "Ásha Vérma".to_string();
        let buf = p.encode_slot().unwrap();
        assert_eq!(Patient::decode_slot(&buf).unwrap().name, "Ásha Vérma");
    }

    #[test]
    fn over_capacity_field_is_rejected() {
        let mut p = sample_patient();
        p.gender = "x".repeat(GENDER_CAP + 1);
        let err = p.encode_slot().unwrap_err();
        assert!(matches!(err, MedrecError::InvalidInput(_)));
    }

    #[test]
    fn corrupt_length_prefix_is_a_store_error() {
        let p = sample_patient();
        let mut buf = p.encode_slot().unwrap();
        // Name length prefix sits right after the 4-byte id.
        buf[4] = 0xff;
        buf[5] = 0xff;
        let err = Patient::decode_slot(&buf).unwrap_err();
        assert!(matches!(err, MedrecError::Store(_)));
    }

    #[test]
    fn short_slot_is_a_store_error() {
        let p = sample_patient();
        let buf = p.encode_slot().unwrap();
        let err = Patient::decode_slot(&buf[..20]).unwrap_err();
        assert!(matches!(err, MedrecError::Store(_)));
    }
}
