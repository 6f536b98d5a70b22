//! Fixture builders shared by the integration tests.
//!
//! The on-disk format is bit-exact, so fixtures are synthesized directly as
//! byte vectors: big-endian record markers, 16-byte keyword headers, and
//! blocked bodies.

#![allow(dead_code)]

/// One framed record: big-endian length markers around the payload.
pub fn record(payload: &[u8]) -> Vec<u8> {
    let len = (payload.len() as i32).to_be_bytes();
    let mut out = Vec::with_capacity(payload.len() + 8);
    out.extend_from_slice(&len);
    out.extend_from_slice(payload);
    out.extend_from_slice(&len);
    out
}

/// A keyword header record: 8-byte padded name, count, 4-byte type tag.
pub fn header(name: &str, tag: &str, count: i32) -> Vec<u8> {
    let mut payload = Vec::with_capacity(16);
    payload.extend_from_slice(format!("{:<8}", name).as_bytes());
    payload.extend_from_slice(&count.to_be_bytes());
    payload.extend_from_slice(format!("{:<4}", tag).as_bytes());
    assert_eq!(payload.len(), 16, "header payload must be 16 bytes");
    record(&payload)
}

/// A complete INTE array, blocked at 1000 elements per body record.
pub fn inte_array(name: &str, values: &[i32]) -> Vec<u8> {
    let mut out = header(name, "INTE", values.len() as i32);
    for chunk in values.chunks(1000) {
        let mut segment = Vec::with_capacity(chunk.len() * 4);
        for value in chunk {
            segment.extend_from_slice(&value.to_be_bytes());
        }
        out.extend_from_slice(&record(&segment));
    }
    out
}

/// A complete REAL array, blocked at 1000 elements per body record.
pub fn real_array(name: &str, values: &[f32]) -> Vec<u8> {
    let mut out = header(name, "REAL", values.len() as i32);
    for chunk in values.chunks(1000) {
        let mut segment = Vec::with_capacity(chunk.len() * 4);
        for value in chunk {
            segment.extend_from_slice(&value.to_be_bytes());
        }
        out.extend_from_slice(&record(&segment));
    }
    out
}

/// A complete DOUB array, blocked at 1000 elements per body record.
pub fn doub_array(name: &str, values: &[f64]) -> Vec<u8> {
    let mut out = header(name, "DOUB", values.len() as i32);
    for chunk in values.chunks(1000) {
        let mut segment = Vec::with_capacity(chunk.len() * 8);
        for value in chunk {
            segment.extend_from_slice(&value.to_be_bytes());
        }
        out.extend_from_slice(&record(&segment));
    }
    out
}

/// A complete LOGI array; true is written as all-ones, false as zero.
pub fn logi_array(name: &str, values: &[bool]) -> Vec<u8> {
    let mut out = header(name, "LOGI", values.len() as i32);
    for chunk in values.chunks(1000) {
        let mut segment = Vec::with_capacity(chunk.len() * 4);
        for &value in chunk {
            let cell: u32 = if value { 0xFFFF_FFFF } else { 0 };
            segment.extend_from_slice(&cell.to_be_bytes());
        }
        out.extend_from_slice(&record(&segment));
    }
    out
}

/// A complete CHAR array of 8-byte space-padded cells, blocked at 105.
pub fn char_array(name: &str, cells: &[&str]) -> Vec<u8> {
    let mut out = header(name, "CHAR", cells.len() as i32);
    for chunk in cells.chunks(105) {
        let mut segment = Vec::with_capacity(chunk.len() * 8);
        for cell in chunk {
            let padded = format!("{:<8}", cell);
            assert_eq!(padded.len(), 8, "CHAR cell '{}' too long", cell);
            segment.extend_from_slice(padded.as_bytes());
        }
        out.extend_from_slice(&record(&segment));
    }
    out
}
