//! Sequential reader for keyword arrays.
//!
//! An array on disk is a 16-byte header record followed by a blocked body:
//!
//! ```text
//! |head| NAME COUNT TYPE |tail| |head| elem .. elem |tail| |head| .. |tail|
//!      +-----------------+          +-------------+
//!       array header                 body segment
//! ```
//!
//! Large bodies are partitioned into segments of at most
//! [`block_length`](crate::TypeTag::block_length) elements each, every
//! segment its own framed record. [`ArrayReader`] reassembles them into one
//! contiguous host-native buffer.

use std::io::Read;

use byteorder::{BigEndian, ByteOrder};
use log::trace;

use super::codec;
use super::f77::RecordReader;
use super::types::error::{EclError, Result};
use super::types::models::{RawArray, TypeTag, ARRAY_HEADER_SIZE};

/// Streams logical arrays off a forward byte source.
///
/// The reader owns a single [`RawArray`] scratch value which is rewritten by
/// every advance; the reference returned by [`next_array`](Self::next_array)
/// is only valid until the next call.
#[derive(Debug)]
pub struct ArrayReader<R> {
    records: RecordReader<R>,
    /// Raw record payload, reused between reads.
    scratch: Vec<u8>,
    last: RawArray,
    ungetted: bool,
    finished: bool,
}

impl<R: Read> ArrayReader<R> {
    pub fn new(stream: R) -> Self {
        ArrayReader {
            records: RecordReader::new(stream),
            scratch: Vec::new(),
            last: RawArray::default(),
            ungetted: false,
            finished: false,
        }
    }

    /// Read the next array, or `Ok(None)` once the stream is exhausted.
    ///
    /// End-of-file is only clean between complete arrays; a stream that
    /// ends mid-record or mid-body is `UnexpectedEof`.
    ///
    /// While an [`unget`](Self::unget) is pending this returns the cached
    /// array again and clears the flag.
    pub fn next_array(&mut self) -> Result<Option<&RawArray>> {
        if self.ungetted {
            self.ungetted = false;
            return Ok(Some(&self.last));
        }

        if self.finished {
            return Ok(None);
        }

        if !self.read_header()? {
            self.finished = true;
            return Ok(None);
        }
        self.read_body()?;

        trace!(
            "array '{}' {} x{}",
            self.last.name_str(),
            self.last.tag,
            self.last.count
        );
        Ok(Some(&self.last))
    }

    /// Push the just-returned array back so the next
    /// [`next_array`](Self::next_array) yields it again.
    ///
    /// One-slot pushback only: calling this twice without an intervening
    /// `next_array`, or before the first one, leaves the reader in an
    /// unspecified (but memory-safe) state.
    pub fn unget(&mut self) {
        self.ungetted = true;
    }

    /// Read and decode the header record. `false` on clean end-of-file.
    fn read_header(&mut self) -> Result<bool> {
        let len = match self.records.read_record(&mut self.scratch)? {
            Some(len) => len,
            None => return Ok(false),
        };

        if len != ARRAY_HEADER_SIZE {
            return Err(EclError::HeaderError(format!(
                "header record is {} bytes, expected {}",
                len, ARRAY_HEADER_SIZE
            )));
        }

        self.last.name.copy_from_slice(&self.scratch[0..8]);
        let count = BigEndian::read_i32(&self.scratch[8..12]);
        let word: [u8; 4] = self.scratch[12..16].try_into().expect("slice is 4 bytes");
        self.last.tag = TypeTag::parse(&word)?;

        if count < 0 {
            return Err(EclError::HeaderError(format!(
                "array '{}' declares negative element count {}",
                self.last.name_str(),
                count
            )));
        }
        self.last.count = count;
        Ok(true)
    }

    /// Reassemble the segmented body into the scratch array.
    ///
    /// Each segment is decoded in place as it is appended. Segment sizes are
    /// not checked against the specified block length, so files with
    /// non-standard blocking still read; only the total element count must
    /// match the header.
    fn read_body(&mut self) -> Result<()> {
        self.last.body.clear();

        let tag = self.last.tag;
        if tag == TypeTag::Mess {
            return Ok(());
        }

        let elem_size = tag.element_size()?;
        let mut remaining = self.last.count as i64;

        while remaining > 0 {
            let len = match self.records.read_record(&mut self.scratch)? {
                Some(len) => len,
                None => {
                    return Err(EclError::UnexpectedEof {
                        context: "array body segment",
                    })
                }
            };

            if len % elem_size != 0 {
                return Err(EclError::ArrayNotTerminated {
                    keyword: self.last.name_str().trim_end().to_string(),
                    remaining,
                });
            }
            let elems = len / elem_size;

            let prev = self.last.body.len();
            self.last.body.extend_from_slice(&self.scratch[..len]);
            codec::decode_in_place(&mut self.last.body[prev..], tag, elems)?;

            remaining -= elems as i64;
        }

        if remaining != 0 {
            return Err(EclError::ArrayNotTerminated {
                keyword: self.last.name_str().trim_end().to_string(),
                remaining,
            });
        }
        Ok(())
    }
}
