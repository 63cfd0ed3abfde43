//! Feature table construction
//!
//! A raw table is plain text with one residue per line:
//!
//! ```text
//! # comment lines start with the comment marker
//! A 0.98754 0.00030 0.00023 ...
//! R 0.00044 0.98974 0.00019 ...
//! ```
//!
//! [`FeatureTableBuilder`] parses that text, derives the synonym and
//! ambiguity entries, optionally renormalizes every row to sum to 1.0,
//! and appends an all-zero row for the missing-residue marker. The result
//! is an immutable [`FeatureTable`].
use super::residue::{
    is_derived, AMBIGUOUS_RESIDUES, MISSING_RESIDUE, SYNONYM_RESIDUES, UNKNOWN_RESIDUE,
};
use crate::error::{FeatureError, Result};
use candle_core::{Device, Tensor};
use itertools::Itertools;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use tracing::{debug, warn};

pub const DEFAULT_COMMENT_MARKER: char = '#';

/// Decimal digits used when writing a table back to text.
pub const RAW_TABLE_PRECISION: usize = 4;

/// Policy flags for building a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Divide every row by its own sum.
    pub normalize: bool,
    /// `X` is the uniform distribution when set, the zero vector otherwise.
    pub average: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            average: true,
        }
    }
}

impl TableOptions {
    /// Reject combinations that can never build.
    ///
    /// `normalize` without `average` leaves `X` as the zero vector, which
    /// cannot be normalized.
    pub fn validate(&self) -> Result<()> {
        if self.normalize && !self.average {
            return Err(FeatureError::InvalidOptions(
                "normalize=true requires average=true: a zero `X` row cannot be normalized"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Rows parsed from raw text, before expansion.
#[derive(Debug, Clone)]
struct RawTable {
    feature_count: usize,
    codes: Vec<char>,
    rows: Vec<Vec<f32>>,
}

impl RawTable {
    fn position(&self, code: char) -> Option<usize> {
        self.codes.iter().position(|&c| c == code)
    }

    fn row(&self, code: char) -> Result<&[f32]> {
        self.position(code)
            .map(|idx| self.rows[idx].as_slice())
            .ok_or(FeatureError::MissingBaseResidue(code))
    }

    /// Last write wins; an overwritten code keeps its first position.
    fn insert(&mut self, code: char, values: Vec<f32>) {
        match self.position(code) {
            Some(idx) => self.rows[idx] = values,
            None => {
                self.codes.push(code);
                self.rows.push(values);
            }
        }
    }
}

fn parse_raw_table(raw: &str, comment_marker: char) -> Result<RawTable> {
    let mut table = RawTable {
        feature_count: 0,
        codes: Vec::new(),
        rows: Vec::new(),
    };
    // set by the first data row, including an ignored `.` row
    let mut expected: Option<usize> = None;

    for (idx, line) in raw.lines().enumerate() {
        let line_number = idx + 1;
        if line.starts_with(comment_marker) || line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let token = fields.next().unwrap_or_default();
        let mut chars = token.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(code), None) if code == MISSING_RESIDUE || code.is_ascii_alphabetic() => {
                code.to_ascii_uppercase()
            }
            _ => {
                return Err(FeatureError::MissingResidueCode {
                    line_number,
                    token: token.to_string(),
                })
            }
        };

        let values = fields
            .map(|field| match field.parse::<f32>() {
                Ok(value) if value.is_finite() => Ok(value),
                Ok(_) => Err(FeatureError::NonFiniteValue {
                    line_number,
                    residue: code,
                    token: field.to_string(),
                }),
                Err(_) => Err(FeatureError::MalformedNumber {
                    line_number,
                    line: line.to_string(),
                    token: field.to_string(),
                }),
            })
            .collect::<Result<Vec<f32>>>()?;

        if values.is_empty() {
            return Err(FeatureError::EmptyRow {
                line_number,
                residue: code,
            });
        }
        match expected {
            None => expected = Some(values.len()),
            Some(count) if count != values.len() => {
                return Err(FeatureError::InconsistentFeatureCount {
                    residue: code,
                    expected: count,
                    found: values.len(),
                });
            }
            Some(_) => {}
        }

        if code == MISSING_RESIDUE {
            warn!(line_number, "ignoring row for the missing-residue marker");
            continue;
        }
        if table.position(code).is_some() {
            warn!(line_number, residue = %code, "duplicate residue row overwrites earlier row");
        }
        table.insert(code, values);
    }

    if table.codes.is_empty() {
        return Err(FeatureError::EmptyTable);
    }
    table.feature_count = expected.unwrap_or_default();
    Ok(table)
}

fn elementwise_mean(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b).map(|(x, y)| (x + y) / 2.0).collect()
}

/// Add `U`, `O`, `X`, `B`, `J` and `Z`. Runs before normalization.
fn expand_derived(table: &mut RawTable, average: bool) -> Result<()> {
    let mut derived: Vec<(char, Vec<f32>)> = Vec::with_capacity(6);

    for (synonym, base) in SYNONYM_RESIDUES {
        derived.push((synonym, table.row(base)?.to_vec()));
    }

    let fill = if average {
        1.0 / table.feature_count as f32
    } else {
        0.0
    };
    derived.push((UNKNOWN_RESIDUE, vec![fill; table.feature_count]));

    for (code, [first, second]) in AMBIGUOUS_RESIDUES {
        derived.push((code, elementwise_mean(table.row(first)?, table.row(second)?)));
    }

    for (code, values) in derived {
        if table.position(code).is_some() {
            warn!(residue = %code, "replacing parsed row with derived values");
        }
        table.insert(code, values);
    }
    Ok(())
}

fn normalize_rows(table: &mut RawTable) -> Result<()> {
    for (code, row) in table.codes.iter().zip(table.rows.iter_mut()) {
        let total: f32 = row.iter().sum();
        if total == 0.0 {
            return Err(FeatureError::ZeroSumNormalization(*code));
        }
        row.iter_mut().for_each(|v| *v /= total);
    }
    Ok(())
}

/// Builds a [`FeatureTable`] from raw text.
///
/// Residue letters are case-folded to upper case, so a lower-case row
/// overwrites the upper-case one. Values must be finite: `nan` and `inf`
/// are rejected.
///
/// ```ignore
/// let table = FeatureTableBuilder::new(raw)
///     .normalize(false)
///     .average(false)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct FeatureTableBuilder<'a> {
    raw: &'a str,
    options: TableOptions,
    comment_marker: char,
}

impl<'a> FeatureTableBuilder<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            options: TableOptions::default(),
            comment_marker: DEFAULT_COMMENT_MARKER,
        }
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.options.normalize = normalize;
        self
    }

    pub fn average(mut self, average: bool) -> Self {
        self.options.average = average;
        self
    }

    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    pub fn comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    pub fn build(self) -> Result<FeatureTable> {
        self.options.validate()?;

        let mut table = parse_raw_table(self.raw, self.comment_marker)?;
        let parsed_rows = table.codes.len();
        expand_derived(&mut table, self.options.average)?;
        if self.options.normalize {
            normalize_rows(&mut table)?;
        }
        table.insert(MISSING_RESIDUE, vec![0.0; table.feature_count]);

        debug!(
            parsed_rows,
            entries = table.codes.len(),
            feature_count = table.feature_count,
            normalize = self.options.normalize,
            average = self.options.average,
            "built feature table"
        );
        FeatureTable::from_rows(table, self.options)
    }
}

/// One residue's row, for serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub residue: char,
    pub values: Vec<f32>,
}

/// Immutable residue → feature vector mapping.
///
/// Rows are kept in a dense `(entries × feature_count)` array; lookups go
/// through a code → row index map.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    codes: Vec<char>,
    index: HashMap<char, usize>,
    values: Array2<f32>,
    options: TableOptions,
}

impl FeatureTable {
    fn from_rows(table: RawTable, options: TableOptions) -> Result<Self> {
        let RawTable {
            feature_count,
            codes,
            rows,
        } = table;
        let values = Array2::from_shape_vec(
            (codes.len(), feature_count),
            rows.into_iter().flatten().collect(),
        )?;
        let index = codes.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Ok(Self {
            codes,
            index,
            values,
            options,
        })
    }

    pub fn feature_count(&self) -> usize {
        self.values.ncols()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn options(&self) -> TableOptions {
        self.options
    }

    pub fn contains(&self, code: char) -> bool {
        self.index.contains_key(&code)
    }

    pub fn get(&self, code: char) -> Option<ArrayView1<'_, f32>> {
        self.index
            .get(&code)
            .map(|&row| self.values.index_axis(Axis(0), row))
    }

    /// Residue codes in table order: parsed rows, derived rows, missing marker.
    pub fn codes(&self) -> &[char] {
        &self.codes
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, ArrayView1<'_, f32>)> + '_ {
        self.codes
            .iter()
            .copied()
            .zip(self.values.axis_iter(Axis(0)))
    }

    /// All rows as a `(entries × feature_count)` view, in [`Self::codes`] order.
    pub fn as_array(&self) -> ArrayView2<'_, f32> {
        self.values.view()
    }

    pub fn row_sum(&self, code: char) -> Option<f32> {
        self.get(code).map(|row| row.sum())
    }

    pub fn entries(&self) -> Vec<TableEntry> {
        self.iter()
            .map(|(residue, row)| TableEntry {
                residue,
                values: row.to_vec(),
            })
            .collect()
    }

    pub fn to_tensor(&self, device: &Device) -> Result<Tensor> {
        let data: Vec<f32> = self.values.iter().copied().collect();
        Ok(Tensor::from_vec(data, (self.len(), self.feature_count()), device)?)
    }

    /// Write the table in raw text form, rounded to [`RAW_TABLE_PRECISION`] digits.
    ///
    /// Derived rows are written too; they are recomputed when the text is
    /// parsed again.
    pub fn write_raw<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(
            writer,
            "# feature_count={} normalize={} average={}",
            self.feature_count(),
            self.options.normalize,
            self.options.average
        )?;
        for (code, row) in self.iter() {
            let values = row
                .iter()
                .map(|v| format!("{:.*}", RAW_TABLE_PRECISION, v))
                .join(" ");
            writeln!(writer, "{} {}", code, values)?;
        }
        Ok(())
    }

    pub fn to_raw_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_raw(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Codes present in the table that were derived rather than parsed.
    pub fn derived_codes(&self) -> Vec<char> {
        self.codes.iter().copied().filter(|&c| is_derived(c)).collect()
    }
}
