//! Amino-acid featurizers
//!
//! Per-residue numeric features for protein sequence models:
//! - Feature tables built from raw residue → vector text
//! - Named preset tables (exchangeability, reduced AAindex properties)
//! - Sequence, window and label encoders over a built table
pub mod presets;
pub mod residue;
pub mod sequence;
pub mod table;
