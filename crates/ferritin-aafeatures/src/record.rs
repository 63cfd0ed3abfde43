//! Labelled training records.
//!
//! A record pairs an encoded sequence with its residue labels and is stored
//! as a safetensors buffer holding two ravelled f32 tensors:
//!
//! - `dta`: `N * F` values, N residues by F table features
//! - `lbl`: `N * 20` values, one column per standard residue
//!
//! The buffer does not record `F`; readers pass the feature count of the
//! table the record was encoded with.
use crate::error::{FeatureError, Result};
use crate::featurize::residue::STANDARD_RESIDUES;
use crate::featurize::sequence::{label_residues, SequenceEncoder};
use candle_core::{Device, Tensor};
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

pub const DATA_KEY: &str = "dta";
pub const LABEL_KEY: &str = "lbl";

#[derive(Debug, Clone, PartialEq)]
pub struct LabelledRecord {
    pub data: Array2<f32>,
    pub label: Array2<f32>,
}

impl LabelledRecord {
    pub fn new(data: Array2<f32>, label: Array2<f32>) -> Result<Self> {
        if data.nrows() != label.nrows() {
            return Err(FeatureError::LengthMismatch {
                data: data.nrows(),
                labels: label.nrows(),
            });
        }
        Ok(Self { data, label })
    }

    pub fn from_sequence(encoder: &SequenceEncoder, sequence: &str) -> Result<Self> {
        Self::new(encoder.encode(sequence)?, label_residues(sequence)?)
    }

    pub fn sequence_length(&self) -> usize {
        self.data.nrows()
    }

    pub fn feature_count(&self) -> usize {
        self.data.ncols()
    }

    /// Ravelled `dta` and `lbl` tensors.
    pub fn to_tensors(&self, device: &Device) -> Result<HashMap<String, Tensor>> {
        let mut tensors = HashMap::new();
        tensors.insert(DATA_KEY.to_string(), ravel(&self.data, device)?);
        tensors.insert(LABEL_KEY.to_string(), ravel(&self.label, device)?);
        Ok(tensors)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let tensors = self.to_tensors(&Device::Cpu)?;
        Ok(safetensors::serialize(tensors, &None)?)
    }

    pub fn deserialize(buffer: &[u8], feature_count: usize) -> Result<Self> {
        let tensors = candle_core::safetensors::load_buffer(buffer, &Device::Cpu)?;
        let data = unravel(&tensors, DATA_KEY, feature_count)?;
        let label = unravel(&tensors, LABEL_KEY, STANDARD_RESIDUES.len())?;
        Self::new(data, label)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.serialize()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P, feature_count: usize) -> Result<Self> {
        let buffer = std::fs::read(path)?;
        Self::deserialize(&buffer, feature_count)
    }
}

fn ravel(arr: &Array2<f32>, device: &Device) -> Result<Tensor> {
    let values: Vec<f32> = arr.iter().copied().collect();
    let len = values.len();
    Ok(Tensor::from_vec(values, len, device)?)
}

fn unravel(tensors: &HashMap<String, Tensor>, key: &str, columns: usize) -> Result<Array2<f32>> {
    let tensor = tensors
        .get(key)
        .ok_or_else(|| FeatureError::MissingRecordField(key.to_string()))?;
    let values = tensor.flatten_all()?.to_vec1::<f32>()?;
    let rows = if columns == 0 { 0 } else { values.len() / columns };
    Ok(Array2::from_shape_vec((rows, columns), values)?)
}
