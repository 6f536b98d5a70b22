//! Fortran unformatted-sequential record framing.
//!
//! When a Fortran program writes unformatted data, every record is
//! bracketed by equal 32-bit big-endian byte counts:
//!
//! ```text
//! | head | payload (head bytes) | tail |       head == tail
//! ```
//!
//! [`RecordReader`] reads and verifies one such record at a time from any
//! forward byte source. End-of-file is only clean when it falls exactly
//! before a head marker; everywhere else a short read is an error.

use std::io::Read;

use byteorder::{BigEndian, ByteOrder};
use log::trace;

use super::types::error::{EclError, Result};

/// Reads Fortran unformatted records from an underlying byte stream.
///
/// The reader holds no cursor state of its own; it only borrows the
/// position of the stream it wraps.
#[derive(Debug)]
pub struct RecordReader<R> {
    stream: R,
}

impl<R: Read> RecordReader<R> {
    pub fn new(stream: R) -> Self {
        RecordReader { stream }
    }

    /// Consume the reader and return the underlying stream.
    pub fn into_inner(self) -> R {
        self.stream
    }

    /// Read one framed record into `into`, replacing its contents.
    ///
    /// Returns `Ok(Some(len))` with the payload length after a fully
    /// verified record, or `Ok(None)` when the stream ends cleanly before
    /// the head marker. A mismatch between the head and tail markers is
    /// `HeadTailMismatch`; a stream that ends inside the record is
    /// `UnexpectedEof`.
    pub fn read_record(&mut self, into: &mut Vec<u8>) -> Result<Option<usize>> {
        let head = match self.read_marker()? {
            Some(head) => head,
            None => return Ok(None),
        };

        if head < 0 {
            return Err(EclError::NegativeRecordLength(head));
        }

        let len = head as usize;
        into.resize(len, 0);
        self.read_exact(into, "record payload")?;

        let mut tail_bytes = [0u8; 4];
        self.read_exact(&mut tail_bytes, "record tail marker")?;
        let tail = BigEndian::read_i32(&tail_bytes);

        if head != tail {
            return Err(EclError::HeadTailMismatch { head, tail });
        }

        trace!("record: {} payload bytes", len);
        Ok(Some(len))
    }

    /// Read the 4-byte head marker, or detect clean end-of-stream.
    ///
    /// EOF is clean only if not a single byte of the marker could be read.
    fn read_marker(&mut self) -> Result<Option<i32>> {
        let mut buf = [0u8; 4];
        let mut filled = 0;
        while filled < buf.len() {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(EclError::UnexpectedEof {
                        context: "record head marker",
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Some(BigEndian::read_i32(&buf)))
    }

    fn read_exact(&mut self, buf: &mut [u8], context: &'static str) -> Result<()> {
        self.stream.read_exact(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                EclError::UnexpectedEof { context }
            } else {
                EclError::Io(e)
            }
        })
    }
}
