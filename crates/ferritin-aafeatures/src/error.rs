use std::sync::Arc;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeatureError>;

/// Failures raised while building feature tables or encoding sequences.
///
/// Table construction never returns a partially built table: any of the
/// parsing, expansion or normalization variants aborts the whole build.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("line {line_number}: could not parse `{token}` as a number in `{line}`")]
    MalformedNumber {
        line_number: usize,
        line: String,
        token: String,
    },

    #[error("line {line_number}: expected a single residue letter, found `{token}`")]
    MissingResidueCode { line_number: usize, token: String },

    #[error("line {line_number}: residue `{residue}` has non-finite value `{token}`")]
    NonFiniteValue {
        line_number: usize,
        residue: char,
        token: String,
    },

    #[error("line {line_number}: residue `{residue}` has no feature values")]
    EmptyRow { line_number: usize, residue: char },

    #[error("residue `{residue}` has {found} features, expected {expected}")]
    InconsistentFeatureCount {
        residue: char,
        expected: usize,
        found: usize,
    },

    #[error("raw table contains no data rows")]
    EmptyTable,

    #[error("raw table is missing base residue `{0}`")]
    MissingBaseResidue(char),

    #[error("cannot normalize residue `{0}`: features sum to zero")]
    ZeroSumNormalization(char),

    #[error("invalid table options: {0}")]
    InvalidOptions(String),

    #[error("unknown residue `{residue}` at position {position}")]
    UnknownResidue { residue: char, position: usize },

    #[error("unknown secondary structure code `{code}` at position {position}")]
    UnknownSecondaryStructure { code: char, position: usize },

    #[error("window center {center} is outside a sequence of length {length}")]
    WindowOutOfRange { center: usize, length: usize },

    #[error("unknown encoding `{name}`; available: {available}")]
    UnknownEncoding { name: String, available: String },

    #[error("preset `{encoding}` failed to build")]
    Preset {
        encoding: String,
        #[source]
        source: Arc<FeatureError>,
    },

    #[error("data has {data} rows but labels have {labels}")]
    LengthMismatch { data: usize, labels: usize },

    #[error("record is missing the `{0}` tensor")]
    MissingRecordField(String),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Tensor(#[from] candle_core::Error),

    #[error(transparent)]
    SafeTensors(#[from] safetensors::SafeTensorError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
