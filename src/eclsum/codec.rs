//! Endian- and type-aware element translation.
//!
//! Arrays are stored big-endian on disk. The functions here translate a
//! buffer of raw on-disk bytes into host-native values of the tagged type,
//! and back. Translation is done in place, per element, with a
//! load-swap-store on each scalar; string types are byte-wise identities and
//! MESS carries no bytes at all.

use super::types::error::{EclError, Result};
use super::types::models::TypeTag;

/// Translate `elems` elements from big-endian on-disk order to host-native
/// order, in place.
///
/// `buf` must hold at least `elems * element_size(tag)` bytes. Fails with
/// `Unsupported` for `X231`; succeeds trivially for `MESS`.
pub fn decode_in_place(buf: &mut [u8], tag: TypeTag, elems: usize) -> Result<()> {
    translate(buf, tag, elems, Direction::ToNative)
}

/// Translate `elems` host-native elements back to big-endian on-disk order,
/// in place. The exact inverse of [`decode_in_place`].
pub fn encode_in_place(buf: &mut [u8], tag: TypeTag, elems: usize) -> Result<()> {
    translate(buf, tag, elems, Direction::ToDisk)
}

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    ToNative,
    ToDisk,
}

fn translate(buf: &mut [u8], tag: TypeTag, elems: usize, dir: Direction) -> Result<()> {
    let total = elems * tag.element_size()?;
    if buf.len() < total {
        return Err(EclError::InvalidArgs(format!(
            "buffer too small: {} bytes for {} elements of {}",
            buf.len(),
            elems,
            tag
        )));
    }

    match tag {
        TypeTag::Inte | TypeTag::Real | TypeTag::Logi => swap32(&mut buf[..total], dir),
        TypeTag::Doub => swap64(&mut buf[..total], dir),
        // String cells are raw ASCII bytes on disk and in memory; MESS has
        // no body at all.
        TypeTag::Char | TypeTag::C0nn(_) | TypeTag::Mess => {}
        TypeTag::X231 => unreachable!("element_size rejects X231"),
    }
    Ok(())
}

fn swap32(buf: &mut [u8], dir: Direction) {
    for chunk in buf.chunks_exact_mut(4) {
        let scalar: [u8; 4] = chunk.try_into().expect("chunk is 4 bytes");
        let out = match dir {
            Direction::ToNative => u32::from_be_bytes(scalar).to_ne_bytes(),
            Direction::ToDisk => u32::from_ne_bytes(scalar).to_be_bytes(),
        };
        chunk.copy_from_slice(&out);
    }
}

fn swap64(buf: &mut [u8], dir: Direction) {
    for chunk in buf.chunks_exact_mut(8) {
        let scalar: [u8; 8] = chunk.try_into().expect("chunk is 8 bytes");
        let out = match dir {
            Direction::ToNative => u64::from_be_bytes(scalar).to_ne_bytes(),
            Direction::ToDisk => u64::from_ne_bytes(scalar).to_be_bytes(),
        };
        chunk.copy_from_slice(&out);
    }
}
