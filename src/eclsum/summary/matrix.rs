//! Streaming a summary data file into a dense row matrix.
//!
//! A data file (`.UNSMRY` or `.Snnnn`) is a sequence of report steps, each
//! opened by a SEQHDR keyword and followed by MINISTEP/PARAMS pairs. Every
//! pair becomes one output row: the report step, the ministep, then the
//! selected PARAMS values in column-plan order.

use std::io::Read;

use log::{debug, info};

use super::super::arrays::ArrayReader;
use super::super::types::error::{EclError, Result};
use super::super::types::models::{RawArray, TypeTag};

/// Rows staged before the first reallocation of the staging buffer.
const INITIAL_ROW_CAPACITY: usize = 64;

/// The ordered selection of PARAMS columns that make up an output row.
///
/// `positions[i]` is the index into the PARAMS vector for the column named
/// `names[i]`. Derived from a specification with
/// [`Smspec::columns`](super::spec::Smspec::columns).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    pub positions: Vec<usize>,
    pub names: Vec<String>,
}

impl ColumnPlan {
    /// Number of selected columns.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Size in bytes of one output row: two 32-bit integers (report step,
    /// ministep) followed by one 32-bit float per selected column.
    pub fn row_size(&self) -> usize {
        8 + 4 * self.len()
    }
}

/// Stream every (report step, ministep) row of a summary data file into a
/// consumer-allocated matrix.
///
/// Rows are staged internally until the stream ends; then `alloc` is called
/// exactly once with the final row count and must return a buffer of
/// exactly `rows * plan.row_size()` bytes (`AllocSize` otherwise), which is
/// filled with the staged rows in on-disk order. All row values are written
/// host-native. The returned slice is not retained past this call.
///
/// Returns the number of rows written.
pub fn read_rows<'a, R, F>(
    arrays: &mut ArrayReader<R>,
    plan: &ColumnPlan,
    alloc: F,
) -> Result<usize>
where
    R: Read,
    F: FnOnce(usize) -> Result<&'a mut [u8]>,
{
    expect_seqhdr(arrays)?;

    let row_size = plan.row_size();
    let mut staged: Vec<u8> = Vec::with_capacity(INITIAL_ROW_CAPACITY * row_size);
    let mut rows = 0usize;
    let mut report_step: i32 = 1;

    loop {
        let ministep = {
            let array = match arrays.next_array()? {
                Some(array) => array,
                // Clean end-of-file between arrays terminates the stream.
                None => break,
            };

            match array.name_str().trim_end() {
                "SEQHDR" => None,
                "MINISTEP" => {
                    if array.tag != TypeTag::Inte || array.len() != 1 {
                        return Err(EclError::BrokenFile(format!(
                            "MINISTEP is {} x{}, expected a single INTE",
                            array.tag,
                            array.len()
                        )));
                    }
                    Some(array.int(0))
                }
                name => {
                    return Err(EclError::BrokenFile(format!(
                        "unexpected keyword '{}', expected SEQHDR or MINISTEP",
                        name
                    )))
                }
            }
        };

        let ministep = match ministep {
            None => {
                report_step += 1;
                // A SEQHDR must be followed by at least one more array;
                // peek via unget so the next iteration sees it.
                match arrays.next_array()? {
                    Some(_) => arrays.unget(),
                    None => {
                        return Err(EclError::UnexpectedEof {
                            context: "array after SEQHDR",
                        })
                    }
                }
                continue;
            }
            Some(ministep) => ministep,
        };

        let params = match arrays.next_array()? {
            Some(array) => array,
            None => {
                return Err(EclError::BrokenFile(
                    "MINISTEP without a following PARAMS".to_string(),
                ))
            }
        };
        check_params(params)?;

        staged.extend_from_slice(&report_step.to_ne_bytes());
        staged.extend_from_slice(&ministep.to_ne_bytes());
        for &pos in &plan.positions {
            let offset = pos * 4;
            if offset + 4 > params.body.len() {
                return Err(EclError::BrokenFile(format!(
                    "PARAMS has {} values, column position {} out of range",
                    params.len(),
                    pos
                )));
            }
            staged.extend_from_slice(&params.body[offset..offset + 4]);
        }
        rows += 1;
    }

    debug!("staged {} rows of {} bytes", rows, row_size);

    let buffer = alloc(rows)?;
    let expected = rows * row_size;
    if buffer.len() != expected {
        return Err(EclError::AllocSize {
            expected,
            actual: buffer.len(),
        });
    }
    buffer.copy_from_slice(&staged);

    info!("summary matrix: {} rows x {} columns", rows, plan.len());
    Ok(rows)
}

/// The data file must open with a SEQHDR keyword of type INTE.
fn expect_seqhdr<R: Read>(arrays: &mut ArrayReader<R>) -> Result<()> {
    let first = match arrays.next_array()? {
        Some(array) => array,
        None => {
            return Err(EclError::BrokenFile(
                "summary data file is empty".to_string(),
            ))
        }
    };
    if first.name_str().trim_end() != "SEQHDR" || first.tag != TypeTag::Inte {
        return Err(EclError::BrokenFile(format!(
            "summary data file starts with '{}' ({}), expected SEQHDR (INTE)",
            first.name_str().trim_end(),
            first.tag
        )));
    }
    Ok(())
}

fn check_params(array: &RawArray) -> Result<()> {
    let name = array.name_str().trim_end();
    if name != "PARAMS" || array.tag != TypeTag::Real {
        return Err(EclError::BrokenFile(format!(
            "expected PARAMS (REAL) after MINISTEP, found '{}' ({})",
            name, array.tag
        )));
    }
    Ok(())
}
