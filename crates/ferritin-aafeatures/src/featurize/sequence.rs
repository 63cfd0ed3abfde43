//! Sequence encoders.
//!
//! Turn a protein sequence into per-residue feature arrays by table lookup,
//! and into one-hot style label arrays for training.
use super::residue::{
    residue_kind, standard_index, ResidueKind, SecondaryStructure, MISSING_RESIDUE,
    STANDARD_RESIDUES,
};
use super::table::FeatureTable;
use crate::error::{FeatureError, Result};
use crate::utilities::ndarray_to_tensor_f32;
use candle_core::{Device, Tensor};
use ndarray::{concatenate, s, Array2, Array3, ArrayView1, Axis};
use tracing::debug;

pub struct SequenceEncoder<'a> {
    table: &'a FeatureTable,
}

impl<'a> SequenceEncoder<'a> {
    pub fn new(table: &'a FeatureTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FeatureTable {
        self.table
    }

    pub fn feature_count(&self) -> usize {
        self.table.feature_count()
    }

    fn lookup(&self, residue: char, position: usize) -> Result<ArrayView1<'a, f32>> {
        let code = residue.to_ascii_uppercase();
        self.table
            .get(code)
            .ok_or(FeatureError::UnknownResidue { residue, position })
    }

    /// Encode a sequence as a `(length × feature_count)` array.
    ///
    /// Lower-case letters are looked up as upper-case. Codes missing from the
    /// table are an error; nothing is substituted.
    pub fn encode(&self, sequence: &str) -> Result<Array2<f32>> {
        let residues: Vec<char> = sequence.chars().collect();
        let mut encoded = Array2::<f32>::zeros((residues.len(), self.feature_count()));
        for (position, (&residue, mut row)) in residues
            .iter()
            .zip(encoded.axis_iter_mut(Axis(0)))
            .enumerate()
        {
            row.assign(&self.lookup(residue, position)?);
        }
        debug!(length = residues.len(), "encoded sequence");
        Ok(encoded)
    }

    /// Rows for the missing-residue marker, used to pad windows.
    fn padding(&self, rows: usize) -> Result<Array2<f32>> {
        let missing = self.lookup(MISSING_RESIDUE, 0)?;
        Ok(Array2::from_shape_fn((rows, self.feature_count()), |(_, j)| missing[j]))
    }

    fn encode_padded(&self, sequence: &str, flank: usize) -> Result<Array2<f32>> {
        let body = self.encode(sequence)?;
        let pad = self.padding(flank)?;
        Ok(concatenate(Axis(0), &[pad.view(), body.view(), pad.view()])?)
    }

    /// Window of `2 * flank + 1` residues centred on `center`. Positions
    /// outside the sequence take the missing-residue vector.
    pub fn encode_window(&self, sequence: &str, center: usize, flank: usize) -> Result<Array2<f32>> {
        let length = sequence.chars().count();
        if center >= length {
            return Err(FeatureError::WindowOutOfRange { center, length });
        }
        let padded = self.encode_padded(sequence, flank)?;
        Ok(padded.slice(s![center..center + 2 * flank + 1, ..]).to_owned())
    }

    /// Every window of the sequence: `(length × (2 * flank + 1) × feature_count)`.
    pub fn encode_windows(&self, sequence: &str, flank: usize) -> Result<Array3<f32>> {
        let padded = self.encode_padded(sequence, flank)?;
        let length = padded.nrows() - 2 * flank;
        let width = 2 * flank + 1;
        let mut windows = Array3::<f32>::zeros((length, width, self.feature_count()));
        for (center, mut window) in windows.axis_iter_mut(Axis(0)).enumerate() {
            window.assign(&padded.slice(s![center..center + width, ..]));
        }
        Ok(windows)
    }

    pub fn encode_tensor(&self, sequence: &str, device: &Device) -> Result<Tensor> {
        ndarray_to_tensor_f32(&self.encode(sequence)?, device)
    }
}

/// Residue labels as a `(length × 20)` array over [`STANDARD_RESIDUES`].
///
/// - standard residues are one-hot
/// - `U`/`O` label as `C`/`K`
/// - ambiguity codes split the mass evenly over their constituents
/// - the missing marker is all zero
pub fn label_residues(sequence: &str) -> Result<Array2<f32>> {
    let residues: Vec<char> = sequence.chars().collect();
    let mut labels = Array2::<f32>::zeros((residues.len(), STANDARD_RESIDUES.len()));

    for (position, &residue) in residues.iter().enumerate() {
        let code = residue.to_ascii_uppercase();
        let kind = residue_kind(code)
            .ok_or_else(|| FeatureError::UnknownResidue { residue, position })?;
        let constituents: Vec<char> = match kind {
            ResidueKind::Standard => vec![code],
            ResidueKind::Synonym(base) => vec![base],
            ResidueKind::Ambiguous(codes) => codes.to_vec(),
            ResidueKind::Missing => continue,
        };
        let weight = 1.0 / constituents.len() as f32;
        for aa in constituents {
            if let Some(col) = standard_index(aa) {
                labels[[position, col]] += weight;
            }
        }
    }
    Ok(labels)
}

/// Q8 secondary-structure labels as a `(length × 8)` one-hot array.
pub fn label_secondary_structure(secondary_structure: &str) -> Result<Array2<f32>> {
    let codes: Vec<char> = secondary_structure.chars().collect();
    let mut labels = Array2::<f32>::zeros((codes.len(), SecondaryStructure::COUNT));
    for (position, &code) in codes.iter().enumerate() {
        let ss = SecondaryStructure::from_code(code)
            .ok_or(FeatureError::UnknownSecondaryStructure { code, position })?;
        labels[[position, ss.to_index()]] = 1.0;
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::featurize::table::FeatureTableBuilder;
    use approx::assert_abs_diff_eq;

    const TABLE: &str = "D 1.0 3.0
N 3.0 1.0
C 0.5 0.5
K 2.0 2.0
I 1.0 0.0
L 0.0 1.0
E 4.0 2.0
Q 2.0 4.0
";

    fn table() -> FeatureTable {
        FeatureTableBuilder::new(TABLE)
            .normalize(false)
            .average(false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_encode_sequence() -> Result<()> {
        let table = table();
        let encoder = SequenceEncoder::new(&table);
        let encoded = encoder.encode("DnB.")?;
        assert_eq!(encoded.dim(), (4, 2));
        assert_eq!(encoded.row(0).to_vec(), vec![1.0, 3.0]);
        assert_eq!(encoded.row(1).to_vec(), vec![3.0, 1.0]);
        assert_eq!(encoded.row(2).to_vec(), vec![2.0, 2.0]);
        assert_eq!(encoded.row(3).to_vec(), vec![0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_unknown_residue_is_an_error() {
        let table = table();
        let encoder = SequenceEncoder::new(&table);
        // A has no row in the synthetic table
        let err = encoder.encode("DDA").unwrap_err();
        assert!(matches!(
            err,
            FeatureError::UnknownResidue {
                residue: 'A',
                position: 2
            }
        ));
    }

    #[test]
    fn test_windows_are_padded_with_missing() -> Result<()> {
        let table = table();
        let encoder = SequenceEncoder::new(&table);

        let window = encoder.encode_window("DNC", 0, 2)?;
        assert_eq!(window.dim(), (5, 2));
        assert_eq!(window.row(0).to_vec(), vec![0.0, 0.0]);
        assert_eq!(window.row(1).to_vec(), vec![0.0, 0.0]);
        assert_eq!(window.row(2).to_vec(), vec![1.0, 3.0]);
        assert_eq!(window.row(4).to_vec(), vec![0.5, 0.5]);

        let windows = encoder.encode_windows("DNC", 1)?;
        assert_eq!(windows.dim(), (3, 3, 2));
        assert_eq!(windows.slice(s![1, .., ..]), encoder.encode("DNC")?);
        assert_eq!(windows.slice(s![2, 2, ..]).to_vec(), vec![0.0, 0.0]);

        let err = encoder.encode_window("DNC", 3, 1).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::WindowOutOfRange {
                center: 3,
                length: 3
            }
        ));
        Ok(())
    }

    #[test]
    fn test_encode_tensor() -> Result<()> {
        let table = table();
        let encoder = SequenceEncoder::new(&table);
        let tensor = encoder.encode_tensor("DNCK", &Device::Cpu)?;
        assert_eq!(tensor.dims(), &[4, 2]);
        Ok(())
    }

    #[test]
    fn test_label_residues() -> Result<()> {
        let labels = label_residues("AUB.X")?;
        assert_eq!(labels.dim(), (5, 20));
        assert_eq!(labels[[0, 0]], 1.0);
        // U labels as C
        assert_eq!(labels[[1, 4]], 1.0);
        // B splits over N and D
        assert_eq!(labels[[2, 2]], 0.5);
        assert_eq!(labels[[2, 3]], 0.5);
        assert_eq!(labels.row(3).sum(), 0.0);
        assert_abs_diff_eq!(labels.row(4).sum(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(labels[[4, 7]], 0.05, epsilon = 1e-7);

        assert!(matches!(
            label_residues("A*").unwrap_err(),
            FeatureError::UnknownResidue {
                residue: '*',
                position: 1
            }
        ));
        Ok(())
    }

    #[test]
    fn test_label_secondary_structure() -> Result<()> {
        let labels = label_secondary_structure("HE-")?;
        assert_eq!(labels.dim(), (3, 8));
        assert_eq!(labels[[0, 0]], 1.0);
        assert_eq!(labels[[1, 2]], 1.0);
        assert_eq!(labels[[2, 7]], 1.0);
        assert_eq!(labels.sum(), 3.0);
        assert!(label_secondary_structure("HX").is_err());
        Ok(())
    }
}
