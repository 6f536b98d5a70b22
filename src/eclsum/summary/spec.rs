//! The summary specification (`.SMSPEC`) model.
//!
//! A specification file describes the layout of the PARAMS vectors in the
//! data files: the DIMENS keyword carries NLIST (the vector length), and the
//! KEYWORDS/WGNAMES/NUMS vectors (plus the optional local-grid vectors)
//! qualify each column. [`Smspec`] collects these in one forward pass and
//! derives the fully qualified column plan.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};

use super::super::arrays::ArrayReader;
use super::super::types::error::{EclError, Result};
use super::super::types::models::{RawArray, Simulator, TypeTag, UnitSystem};
use super::classify::{identifies, partial_identifiers, Qualifier};
use super::matrix::ColumnPlan;

/// The known specification-file keywords.
///
/// Intended for callers that want to check whether every keyword in a file
/// is a recognised specification keyword.
pub fn smspec_keywords() -> &'static [&'static str] {
    &[
        "INTEHEAD", "RESTART", "DIMENS", "KEYWORDS", "WGNAMES", "NAMES", "NUMS", "LGRS",
        "NUMLX", "NUMLY", "NUMLZ", "LENGTHS", "LENUNITS", "MEASRMNT", "UNITS", "STARTDAT",
        "LGRNAMES", "LGRVEC", "LGRTIMES", "RUNTIMEI", "RUNTIMED", "STEPRESN", "XCOORD",
        "YCOORD", "TIMESTMP",
    ]
}

/// Simulation start date from the STARTDAT keyword.
///
/// The format has no seconds field; seconds are embedded in the
/// microseconds value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartDate {
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub hour: i32,
    pub minute: i32,
    pub microsecond: i32,
}

/// A wall-clock timestamp as stored in the RUNTIMEI and TIMESTMP keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

/// Run progress from the RUNTIMEI keyword, with the companion RUNTIMED
/// values attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeMonitor {
    /// A flag value of 2 marks a completed run.
    pub finished: bool,
    pub initial_report: i32,
    pub current_report: i32,
    pub initial_timestamp: Timestamp,
    pub current_timestamp: Timestamp,
    /// The report number assigned to BASIC output.
    pub basic: i32,
    /// Values of the RUNTIMED keyword.
    pub double: Vec<f64>,
}

/// LGRS values; written as CHAR by some producers and INTE by others.
#[derive(Debug, Clone, PartialEq)]
pub enum LgrValues {
    Names(Vec<String>),
    Indices(Vec<i32>),
}

impl LgrValues {
    fn len(&self) -> usize {
        match self {
            LgrValues::Names(v) => v.len(),
            LgrValues::Indices(v) => v.len(),
        }
    }

    /// The display form of entry `idx`, or `None` when it is a void marker.
    fn qualifier(&self, idx: usize) -> Option<String> {
        match self {
            LgrValues::Names(v) => {
                let name = &v[idx];
                if is_void_str(name) {
                    None
                } else {
                    Some(name.clone())
                }
            }
            LgrValues::Indices(v) => {
                let num = v[idx];
                if is_void_int(num) {
                    None
                } else {
                    Some(num.to_string())
                }
            }
        }
    }
}

/// A parsed summary specification.
///
/// String vectors keep their cell values with trailing padding stripped.
#[derive(Debug, Default)]
pub struct Smspec {
    /// Number of entries in each PARAMS vector.
    pub nlist: i32,
    /// Grid dimensions (NDIVIX, NDIVIY, NDIVIZ) from DIMENS.
    pub grid_shape: Option<(i32, i32, i32)>,
    pub keywords: Vec<String>,
    pub wgnames: Vec<String>,
    pub nums: Vec<i32>,
    pub lgrs: Option<LgrValues>,
    pub numlx: Option<Vec<i32>>,
    pub numly: Option<Vec<i32>>,
    pub numlz: Option<Vec<i32>>,
    pub units: Option<Vec<String>>,
    /// Measurement descriptors per column, reassembled from the MEASRMNT
    /// cell groups. Empty when the file carries no MEASRMNT.
    pub measurements: Vec<String>,
    pub lengths: Option<Vec<f32>>,
    pub lenunits: Option<String>,
    pub lgrnames: Option<Vec<String>>,
    pub lgrvec: Option<Vec<i32>>,
    pub lgrtimes: Option<Vec<i32>>,
    pub unit_system: Option<UnitSystem>,
    pub simulator: Option<Simulator>,
    pub start_date: Option<StartDate>,
    pub runtime_monitor: Option<RuntimeMonitor>,
    pub step_reason: Option<String>,
    pub xcoord: Option<Vec<f32>>,
    pub ycoord: Option<Vec<f32>>,
    pub timestamp: Option<Timestamp>,
}

impl Smspec {
    /// Load a specification from a `.SMSPEC` file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Smspec> {
        let mut arrays = super::super::open(path.as_ref())?;
        Smspec::parse(&mut arrays)
    }

    /// Collect the specification keywords from an array stream.
    ///
    /// Unrecognised keywords are skipped. DIMENS, KEYWORDS, WGNAMES and
    /// NUMS are mandatory; missing ones are `BrokenFile`.
    pub fn parse<R: Read>(arrays: &mut ArrayReader<R>) -> Result<Smspec> {
        let mut spec = Smspec::default();
        let mut have_dimens = false;
        // Raw (untrimmed) MEASRMNT cells and the runtime vectors are grouped
        // after the pass, once NLIST is known.
        let mut measrmnt: Vec<String> = Vec::new();
        let mut runtimei: Vec<i32> = Vec::new();
        let mut runtimed: Vec<f64> = Vec::new();

        while let Some(array) = arrays.next_array()? {
            let name = array.name_str().trim_end().to_string();
            match name.as_str() {
                "DIMENS" => {
                    expect_tag(array, TypeTag::Inte, "DIMENS")?;
                    if array.is_empty() {
                        return Err(EclError::BrokenFile("DIMENS is empty".to_string()));
                    }
                    spec.nlist = array.int(0);
                    if array.len() >= 4 {
                        spec.grid_shape = Some((array.int(1), array.int(2), array.int(3)));
                    }
                    have_dimens = true;
                }
                "KEYWORDS" => {
                    expect_string(array, "KEYWORDS")?;
                    spec.keywords = text_cells(array);
                }
                "WGNAMES" => {
                    expect_string(array, "WGNAMES")?;
                    spec.wgnames = text_cells(array);
                }
                "NUMS" => {
                    expect_tag(array, TypeTag::Inte, "NUMS")?;
                    spec.nums = int_cells(array);
                }
                "LGRS" => {
                    spec.lgrs = Some(match array.tag {
                        TypeTag::Inte => LgrValues::Indices(int_cells(array)),
                        tag if tag.is_string() => LgrValues::Names(text_cells(array)),
                        tag => {
                            return Err(EclError::BrokenFile(format!(
                                "LGRS has type {}, expected CHAR or INTE",
                                tag
                            )))
                        }
                    });
                }
                "NUMLX" => {
                    expect_tag(array, TypeTag::Inte, "NUMLX")?;
                    spec.numlx = Some(int_cells(array));
                }
                "NUMLY" => {
                    expect_tag(array, TypeTag::Inte, "NUMLY")?;
                    spec.numly = Some(int_cells(array));
                }
                "NUMLZ" => {
                    expect_tag(array, TypeTag::Inte, "NUMLZ")?;
                    spec.numlz = Some(int_cells(array));
                }
                "UNITS" => {
                    expect_string(array, "UNITS")?;
                    spec.units = Some(text_cells(array));
                }
                "MEASRMNT" => {
                    expect_string(array, "MEASRMNT")?;
                    measrmnt = raw_text_cells(array);
                }
                "LENGTHS" => {
                    expect_tag(array, TypeTag::Real, "LENGTHS")?;
                    spec.lengths = Some(real_cells(array));
                }
                "LENUNITS" => {
                    expect_string(array, "LENUNITS")?;
                    if !array.is_empty() {
                        spec.lenunits = Some(array.text(0).trim_end().to_string());
                    }
                }
                "LGRNAMES" => {
                    expect_string(array, "LGRNAMES")?;
                    spec.lgrnames = Some(text_cells(array));
                }
                "LGRVEC" => {
                    expect_tag(array, TypeTag::Inte, "LGRVEC")?;
                    spec.lgrvec = Some(int_cells(array));
                }
                "LGRTIMES" => {
                    expect_tag(array, TypeTag::Inte, "LGRTIMES")?;
                    spec.lgrtimes = Some(int_cells(array));
                }
                "RUNTIMEI" => {
                    expect_tag(array, TypeTag::Inte, "RUNTIMEI")?;
                    runtimei = int_cells(array);
                }
                "RUNTIMED" => {
                    expect_tag(array, TypeTag::Doub, "RUNTIMED")?;
                    runtimed = doub_cells(array);
                }
                "STEPRESN" => {
                    expect_string(array, "STEPRESN")?;
                    let combined = raw_text_cells(array).concat();
                    spec.step_reason = Some(combined.trim_end().to_string());
                }
                "XCOORD" => {
                    expect_tag(array, TypeTag::Real, "XCOORD")?;
                    spec.xcoord = Some(real_cells(array));
                }
                "YCOORD" => {
                    expect_tag(array, TypeTag::Real, "YCOORD")?;
                    spec.ycoord = Some(real_cells(array));
                }
                "INTEHEAD" => spec.read_intehead(array),
                "STARTDAT" => spec.read_startdat(array),
                "TIMESTMP" => {
                    expect_tag(array, TypeTag::Inte, "TIMESTMP")?;
                    spec.read_timestmp(array);
                }
                _ => debug!("skipping specification keyword '{}'", name),
            }
        }

        if !have_dimens {
            return Err(EclError::BrokenFile("specification has no DIMENS".to_string()));
        }
        spec.check_lengths()?;

        if !measrmnt.is_empty() {
            spec.measurements = group_measurements(&measrmnt, spec.nlist)?;
        }
        if !runtimei.is_empty() {
            spec.runtime_monitor = build_runtime_monitor(&runtimei, runtimed);
        }

        info!(
            "specification loaded: nlist={}, {} keywords",
            spec.nlist,
            spec.keywords.len()
        );
        Ok(spec)
    }

    fn read_intehead(&mut self, array: &RawArray) {
        if array.len() < 2 {
            warn!("INTEHEAD has {} elements, expected 2", array.len());
            return;
        }
        let unit = array.int(0);
        let simulator = array.int(1);
        match UnitSystem::try_from(unit) {
            Ok(system) => self.unit_system = Some(system),
            Err(_) => warn!("unrecognised unit system identifier: {}", unit),
        }
        match Simulator::try_from(simulator) {
            Ok(simulator) => self.simulator = Some(simulator),
            Err(_) => warn!("unrecognised simulator identifier: {}", simulator),
        }
    }

    fn read_startdat(&mut self, array: &RawArray) {
        if array.len() < 3 {
            warn!("STARTDAT has {} elements, expected at least 3", array.len());
            return;
        }
        let at = |idx: usize| if idx < array.len() { array.int(idx) } else { 0 };
        self.start_date = Some(StartDate {
            day: at(0),
            month: at(1),
            year: at(2),
            hour: at(3),
            minute: at(4),
            microsecond: at(5),
        });
    }

    fn read_timestmp(&mut self, array: &RawArray) {
        if array.len() < 6 {
            warn!("TIMESTMP has {} elements, expected 6", array.len());
            return;
        }
        self.timestamp = Some(timestamp_fields(&int_cells(array)));
    }

    fn check_lengths(&self) -> Result<()> {
        let nlist = self.nlist.max(0) as usize;
        let lengths: [(&str, usize); 3] = [
            ("KEYWORDS", self.keywords.len()),
            ("WGNAMES", self.wgnames.len()),
            ("NUMS", self.nums.len()),
        ];
        for (name, len) in lengths {
            if len == 0 {
                return Err(EclError::BrokenFile(format!(
                    "specification has no {}",
                    name
                )));
            }
            if len != nlist {
                return Err(EclError::BrokenFile(format!(
                    "{} has {} entries, NLIST is {}",
                    name, len, nlist
                )));
            }
        }

        let optional: [(&str, Option<usize>); 7] = [
            ("LGRS", self.lgrs.as_ref().map(LgrValues::len)),
            ("NUMLX", self.numlx.as_ref().map(Vec::len)),
            ("NUMLY", self.numly.as_ref().map(Vec::len)),
            ("NUMLZ", self.numlz.as_ref().map(Vec::len)),
            ("LENGTHS", self.lengths.as_ref().map(Vec::len)),
            ("XCOORD", self.xcoord.as_ref().map(Vec::len)),
            ("YCOORD", self.ycoord.as_ref().map(Vec::len)),
        ];
        for (name, len) in optional {
            if let Some(len) = len {
                if len != nlist {
                    return Err(EclError::BrokenFile(format!(
                        "{} has {} entries, NLIST is {}",
                        name, len, nlist
                    )));
                }
            }
        }
        Ok(())
    }

    /// Derive the fully qualified column plan.
    ///
    /// Each column name is the keyword followed by its required qualifiers,
    /// joined with `separator`. Columns whose required qualifier carries a
    /// void marker (`":+:+:+:+"`, all blanks, or a negative number) are
    /// dropped. Duplicate qualified names keep the first occurrence.
    ///
    /// A qualifier vector that is absent from the file contributes nothing;
    /// the column is kept without it.
    pub fn columns(&self, separator: &str) -> ColumnPlan {
        let mut plan = ColumnPlan::default();
        let mut seen = HashSet::new();

        'columns: for (pos, keyword) in self.keywords.iter().enumerate() {
            let mut name = keyword.clone();

            for &qualifier in partial_identifiers() {
                if identifies(qualifier, keyword) == 0 {
                    continue;
                }
                let value = match self.qualifier_value(qualifier, pos) {
                    QualifierValue::Value(value) => value,
                    QualifierValue::Void => continue 'columns,
                    QualifierValue::Absent => continue,
                };
                name.push_str(separator);
                name.push_str(&value);
            }

            if seen.insert(name.clone()) {
                plan.positions.push(pos);
                plan.names.push(name);
            }
        }

        debug!(
            "column plan: {} of {} columns qualified",
            plan.len(),
            self.keywords.len()
        );
        plan
    }

    fn qualifier_value(&self, qualifier: Qualifier, pos: usize) -> QualifierValue {
        match qualifier {
            Qualifier::Wgnames => {
                let name = &self.wgnames[pos];
                if is_void_str(name) {
                    QualifierValue::Void
                } else {
                    QualifierValue::Value(name.clone())
                }
            }
            Qualifier::Nums => int_qualifier(Some(self.nums.as_slice()), pos),
            Qualifier::Lgrs => match &self.lgrs {
                None => QualifierValue::Absent,
                Some(lgrs) => match lgrs.qualifier(pos) {
                    Some(value) => QualifierValue::Value(value),
                    None => QualifierValue::Void,
                },
            },
            Qualifier::Numlx => int_qualifier(self.numlx.as_deref(), pos),
            Qualifier::Numly => int_qualifier(self.numly.as_deref(), pos),
            Qualifier::Numlz => int_qualifier(self.numlz.as_deref(), pos),
        }
    }
}

enum QualifierValue {
    Value(String),
    Void,
    Absent,
}

fn int_qualifier(values: Option<&[i32]>, pos: usize) -> QualifierValue {
    match values {
        None => QualifierValue::Absent,
        Some(values) => {
            let num = values[pos];
            if is_void_int(num) {
                QualifierValue::Void
            } else {
                QualifierValue::Value(num.to_string())
            }
        }
    }
}

/// A string qualifier marking a garbage column: `":+:+:+:+"` or all blanks.
fn is_void_str(value: &str) -> bool {
    value == ":+:+:+:+" || value.is_empty()
}

/// A numeric qualifier marking a garbage column.
fn is_void_int(value: i32) -> bool {
    value < 0
}

fn expect_tag(array: &RawArray, tag: TypeTag, name: &str) -> Result<()> {
    if array.tag != tag {
        return Err(EclError::BrokenFile(format!(
            "{} has type {}, expected {}",
            name, array.tag, tag
        )));
    }
    Ok(())
}

fn expect_string(array: &RawArray, name: &str) -> Result<()> {
    if !array.tag.is_string() {
        return Err(EclError::BrokenFile(format!(
            "{} has type {}, expected a string type",
            name, array.tag
        )));
    }
    Ok(())
}

/// All cells of a string array, trailing padding stripped.
fn text_cells(array: &RawArray) -> Vec<String> {
    (0..array.len())
        .map(|idx| array.text(idx).trim_end().to_string())
        .collect()
}

/// All cells of a string array with padding kept, for values that span
/// several consecutive cells.
fn raw_text_cells(array: &RawArray) -> Vec<String> {
    (0..array.len()).map(|idx| array.text(idx)).collect()
}

fn int_cells(array: &RawArray) -> Vec<i32> {
    (0..array.len()).map(|idx| array.int(idx)).collect()
}

fn real_cells(array: &RawArray) -> Vec<f32> {
    (0..array.len()).map(|idx| array.real(idx)).collect()
}

fn doub_cells(array: &RawArray) -> Vec<f64> {
    (0..array.len()).map(|idx| array.double(idx)).collect()
}

/// Reassemble MEASRMNT cells into one descriptor per column.
///
/// The keyword holds a fixed number of consecutive cells per column; a
/// descriptor is the concatenation of its group with the trailing padding
/// stripped.
fn group_measurements(cells: &[String], nlist: i32) -> Result<Vec<String>> {
    let nlist = nlist.max(0) as usize;
    if nlist == 0 || cells.len() % nlist != 0 {
        return Err(EclError::BrokenFile(format!(
            "MEASRMNT has {} cells, not a multiple of NLIST {}",
            cells.len(),
            nlist
        )));
    }

    let group = cells.len() / nlist;
    Ok(cells
        .chunks(group)
        .map(|chunk| chunk.concat().trim_end().to_string())
        .collect())
}

/// RUNTIMEI layout: flag, initial and current report numbers, the two
/// six-element timestamps, then the BASIC assignment at index 34.
fn build_runtime_monitor(values: &[i32], double: Vec<f64>) -> Option<RuntimeMonitor> {
    if values.len() < 35 {
        warn!("RUNTIMEI has {} elements, expected at least 35", values.len());
        return None;
    }
    Some(RuntimeMonitor {
        finished: values[0] == 2,
        initial_report: values[1],
        current_report: values[2],
        initial_timestamp: timestamp_fields(&values[3..9]),
        current_timestamp: timestamp_fields(&values[9..15]),
        basic: values[34],
        double,
    })
}

fn timestamp_fields(values: &[i32]) -> Timestamp {
    Timestamp {
        year: values[0],
        month: values[1],
        day: values[2],
        hour: values[3],
        minute: values[4],
        second: values[5],
    }
}
