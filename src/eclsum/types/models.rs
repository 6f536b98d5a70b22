//! Core data structures for Eclipse file components.
//!
//! This module defines the fundamental types used throughout the library:
//! - The array type tags and their size metadata
//! - The raw array descriptor produced by the array reader
//! - INTEHEAD unit-system and simulator identifier enumerations

use encoding_rs::WINDOWS_1252;

use super::error::{EclError, Result};

/// Number of elements per body record for numeric arrays.
pub const BLOCK_SIZE_NUMERIC: usize = 1000;
/// Number of elements per body record for string arrays.
pub const BLOCK_SIZE_STRING: usize = 105;

/// Size in bytes of a keyword header payload: 8-byte name, 4-byte count,
/// 4-byte type tag.
pub const ARRAY_HEADER_SIZE: usize = 16;

/// The data type of an array, as tagged on disk.
///
/// On disk the tag is exactly the 4 ASCII bytes of its name. This enum
/// preserves both forms: [`TypeTag::parse`] maps the on-disk word to a
/// variant, and [`TypeTag::name`] maps back.
///
/// `C001`..`C099` are fixed-width string types where the trailing digits are
/// the element width in bytes. `X231` is recognised but reading its payload
/// is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// Signed 32-bit integer.
    Inte,
    /// 32-bit IEEE-754 float.
    Real,
    /// 64-bit IEEE-754 float.
    Doub,
    /// Fixed 8-byte ASCII string, space-padded, never NUL-terminated.
    Char,
    /// 32-bit boolean; zero is false, anything else is true.
    Logi,
    /// Marker keyword with no body.
    Mess,
    /// Fixed-width ASCII string of the given width (1..=99).
    C0nn(u8),
    /// Reserved tag; headers parse but the payload cannot be decoded.
    X231,
}

impl TypeTag {
    /// Map an on-disk 4-byte tag to its variant.
    ///
    /// Returns `InvalidArgs` for any word outside the enumerated set.
    pub fn parse(word: &[u8; 4]) -> Result<TypeTag> {
        match word {
            b"INTE" => Ok(TypeTag::Inte),
            b"REAL" => Ok(TypeTag::Real),
            b"DOUB" => Ok(TypeTag::Doub),
            b"CHAR" => Ok(TypeTag::Char),
            b"LOGI" => Ok(TypeTag::Logi),
            b"MESS" => Ok(TypeTag::Mess),
            b"X231" => Ok(TypeTag::X231),
            &[b'C', b'0', tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => {
                let width = (tens - b'0') * 10 + (ones - b'0');
                if width == 0 {
                    return Err(EclError::InvalidArgs("unknown type tag 'C000'".to_string()));
                }
                Ok(TypeTag::C0nn(width))
            }
            _ => Err(EclError::InvalidArgs(format!(
                "unknown type tag '{}'",
                String::from_utf8_lossy(word)
            ))),
        }
    }

    /// The 4-byte ASCII word for this tag, as it appears on disk.
    pub fn name(self) -> [u8; 4] {
        match self {
            TypeTag::Inte => *b"INTE",
            TypeTag::Real => *b"REAL",
            TypeTag::Doub => *b"DOUB",
            TypeTag::Char => *b"CHAR",
            TypeTag::Logi => *b"LOGI",
            TypeTag::Mess => *b"MESS",
            TypeTag::X231 => *b"X231",
            TypeTag::C0nn(width) => [b'C', b'0', b'0' + width / 10, b'0' + width % 10],
        }
    }

    /// Size in bytes of one element of this type.
    ///
    /// `MESS` arrays carry no body and have element size 0. `X231` is
    /// `Unsupported`.
    pub fn element_size(self) -> Result<usize> {
        match self {
            TypeTag::Inte | TypeTag::Real | TypeTag::Logi => Ok(4),
            TypeTag::Doub | TypeTag::Char => Ok(8),
            TypeTag::Mess => Ok(0),
            TypeTag::C0nn(width) => Ok(width as usize),
            TypeTag::X231 => Err(EclError::Unsupported("X231".to_string())),
        }
    }

    /// The number of elements the producer writes per body record.
    ///
    /// 105 for string types, 1000 for everything else. This is only used to
    /// size temporary buffers; the reader never enforces it against what is
    /// actually on disk, so slightly non-conforming files still read.
    pub fn block_length(self) -> usize {
        match self {
            TypeTag::Char | TypeTag::C0nn(_) => BLOCK_SIZE_STRING,
            _ => BLOCK_SIZE_NUMERIC,
        }
    }

    /// Whether elements of this type are fixed-width character strings.
    pub fn is_string(self) -> bool {
        matches!(self, TypeTag::Char | TypeTag::C0nn(_))
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = self.name();
        write!(f, "{}", String::from_utf8_lossy(&name))
    }
}

/// One logical array as read from disk: the keyword header fields plus the
/// reassembled, host-native body bytes.
///
/// Produced by the array reader, which reuses a single `RawArray` as scratch
/// space; the reference returned by `next_array` is invalidated by the next
/// advance.
#[derive(Debug)]
pub struct RawArray {
    /// 8-byte keyword name, space-padded ASCII.
    pub name: [u8; 8],
    /// Element type.
    pub tag: TypeTag,
    /// Declared element count. Never negative in a successfully read array.
    pub count: i32,
    /// Decoded body: `count * element_size` bytes of host-native values.
    pub body: Vec<u8>,
}

impl Default for RawArray {
    fn default() -> Self {
        RawArray {
            name: [b' '; 8],
            tag: TypeTag::Mess,
            count: 0,
            body: Vec::new(),
        }
    }
}

impl RawArray {
    /// Number of elements in the array.
    pub fn len(&self) -> usize {
        self.count.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The keyword name with trailing padding preserved.
    pub fn name_str(&self) -> &str {
        std::str::from_utf8(&self.name).unwrap_or("????????")
    }

    /// Host-native i32 at element index `idx`. Panics if out of range.
    pub fn int(&self, idx: usize) -> i32 {
        i32::from_ne_bytes(self.cell(idx))
    }

    /// Host-native f32 at element index `idx`.
    pub fn real(&self, idx: usize) -> f32 {
        f32::from_ne_bytes(self.cell(idx))
    }

    /// Host-native f64 at element index `idx`.
    pub fn double(&self, idx: usize) -> f64 {
        f64::from_ne_bytes(self.cell(idx))
    }

    /// Truth value at element index `idx`: zero is false, non-zero true.
    pub fn logical(&self, idx: usize) -> bool {
        u32::from_ne_bytes(self.cell(idx)) != 0
    }

    /// Raw bytes of the string cell at element index `idx`.
    pub fn str_cell(&self, idx: usize) -> &[u8] {
        let width = if self.tag.is_string() {
            self.tag.element_size().unwrap_or(8)
        } else {
            8
        };
        &self.body[idx * width..(idx + 1) * width]
    }

    /// String cell at element index `idx`, decoded with padding preserved.
    ///
    /// Decoded as WINDOWS-1252 so that stray non-ASCII bytes in well names
    /// survive rather than fail.
    pub fn text(&self, idx: usize) -> String {
        let (decoded, _, _) = WINDOWS_1252.decode(self.str_cell(idx));
        decoded.into_owned()
    }

    fn cell<const N: usize>(&self, idx: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.body[idx * N..(idx + 1) * N]);
        out
    }
}

/// Unit system identifier from the first INTEHEAD element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    Metric = 1,
    Field = 2,
    Lab = 3,
    PvtM = 4,
}

impl UnitSystem {
    /// Human-readable unit system name.
    pub fn name(self) -> &'static str {
        match self {
            UnitSystem::Metric => "METRIC",
            UnitSystem::Field => "FIELD",
            UnitSystem::Lab => "LAB",
            UnitSystem::PvtM => "PVT-M",
        }
    }
}

impl TryFrom<i32> for UnitSystem {
    type Error = EclError;
    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Self::Metric),
            2 => Ok(Self::Field),
            3 => Ok(Self::Lab),
            4 => Ok(Self::PvtM),
            _ => Err(EclError::InvalidArgs(format!("unknown unit system: {}", value))),
        }
    }
}

/// Simulator identifier from the second INTEHEAD element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Simulator {
    Eclipse100 = 100,
    Eclipse300 = 300,
    Eclipse300Thermal = 500,
    Intersect = 700,
    FrontSim = 800,
}

impl Simulator {
    /// Human-readable simulator name.
    pub fn name(self) -> &'static str {
        match self {
            Simulator::Eclipse100 => "ECLIPSE 100",
            Simulator::Eclipse300 => "ECLIPSE 300",
            Simulator::Eclipse300Thermal => "ECLIPSE 300 (thermal option)",
            Simulator::Intersect => "INTERSECT",
            Simulator::FrontSim => "FrontSim",
        }
    }
}

impl TryFrom<i32> for Simulator {
    type Error = EclError;
    fn try_from(value: i32) -> Result<Self> {
        match value {
            100 => Ok(Self::Eclipse100),
            300 => Ok(Self::Eclipse300),
            500 => Ok(Self::Eclipse300Thermal),
            700 => Ok(Self::Intersect),
            800 => Ok(Self::FrontSim),
            _ => Err(EclError::InvalidArgs(format!("unknown simulator id: {}", value))),
        }
    }
}
