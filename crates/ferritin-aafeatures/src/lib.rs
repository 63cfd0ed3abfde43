//! # ferritin-aafeatures
//!
//! Amino-acid feature tables for protein machine-learning pipelines.
//!
//! __ferritin-aafeatures__ provides functionality for:
//! * Building residue → feature-vector tables from raw text, including the
//!   synonym (`U`, `O`), ambiguity (`X`, `B`, `J`, `Z`) and missing (`.`) codes
//! * Two preset tables selectable by name: `AANDXred` and `JTTP01dist`
//! * Encoding sequences into `(length × features)` arrays and residue labels
//! * Writing labelled records as safetensors
//!
//! The main entry point is [`FeatureTableBuilder`], or [`AaEncoding`] for the presets.
//!
//! ```ignore
//! use ferritin_aafeatures::{AaEncoding, SequenceEncoder};
//!
//! let table = AaEncoding::from_name("JTTP01dist")?.build()?;
//! let features = SequenceEncoder::new(&table).encode("MKTAYIAK")?;
//! ```
pub mod error;
pub mod featurize;
pub mod record;
pub mod utilities;

pub use self::error::{FeatureError, Result};
pub use self::featurize::presets::{aandx_reduced, jtt_p01_dist, AaEncoding, TableConstructor};
pub use self::featurize::residue::{
    residue_kind, ResidueKind, SecondaryStructure, FULL_TABLE_SIZE, MISSING_RESIDUE,
    STANDARD_RESIDUES,
};
pub use self::featurize::sequence::{label_residues, label_secondary_structure, SequenceEncoder};
pub use self::featurize::table::{FeatureTable, FeatureTableBuilder, TableEntry, TableOptions};
pub use self::record::LabelledRecord;
pub use self::utilities::{ndarray_to_tensor_f32, tensor_to_ndarray_f32};
