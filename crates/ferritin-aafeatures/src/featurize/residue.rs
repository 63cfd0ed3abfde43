//! # Residue alphabets
//!
//! Single-letter residue codes understood by the feature tables:
//!
//! - 20 standard amino acids, in the row order used by the JTT matrix
//! - synonyms: selenocysteine `U` (as `C`) and pyrrolysine `O` (as `K`)
//! - ambiguity codes: `X` (any), `B` (D/N), `J` (I/L), `Z` (E/Q)
//! - the missing-residue marker `.`
//!
//! Also holds the Q8 secondary-structure alphabet used for structure labels.
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Placeholder for a missing residue. Always encodes as the zero vector.
pub const MISSING_RESIDUE: char = '.';

/// Standard residues in label/column order.
pub const STANDARD_RESIDUES: [char; 20] = [
    'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W',
    'Y', 'V',
];

/// Non-standard residues that copy the vector of a standard residue.
pub const SYNONYM_RESIDUES: [(char, char); 2] = [('U', 'C'), ('O', 'K')];

/// Two-way ambiguity codes resolved by averaging their constituents.
pub const AMBIGUOUS_RESIDUES: [(char, [char; 2]); 3] =
    [('B', ['D', 'N']), ('J', ['I', 'L']), ('Z', ['E', 'Q'])];

/// Fully ambiguous residue.
pub const UNKNOWN_RESIDUE: char = 'X';

/// Entries in a table built from a complete standard source:
/// 20 standard + U, O, X, B, J, Z + missing marker.
pub const FULL_TABLE_SIZE: usize = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueKind {
    Standard,
    Synonym(char),
    Ambiguous(&'static [char]),
    Missing,
}

#[rustfmt::skip]
pub fn residue_kind(code: char) -> Option<ResidueKind> {
    match code {
        'A' | 'R' | 'N' | 'D' | 'C' |
        'Q' | 'E' | 'G' | 'H' | 'I' |
        'L' | 'K' | 'M' | 'F' | 'P' |
        'S' | 'T' | 'W' | 'Y' | 'V' => Some(ResidueKind::Standard),
        'U' => Some(ResidueKind::Synonym('C')),
        'O' => Some(ResidueKind::Synonym('K')),
        'B' => Some(ResidueKind::Ambiguous(&['D', 'N'])),
        'J' => Some(ResidueKind::Ambiguous(&['I', 'L'])),
        'Z' => Some(ResidueKind::Ambiguous(&['E', 'Q'])),
        'X' => Some(ResidueKind::Ambiguous(&STANDARD_RESIDUES)),
        MISSING_RESIDUE => Some(ResidueKind::Missing),
        _ => None,
    }
}

/// Column of a standard residue in a 20-wide label array.
pub fn standard_index(code: char) -> Option<usize> {
    STANDARD_RESIDUES.iter().position(|&aa| aa == code)
}

/// Residue codes whose vectors are derived rather than parsed.
pub fn is_derived(code: char) -> bool {
    matches!(
        residue_kind(code),
        Some(ResidueKind::Synonym(_)) | Some(ResidueKind::Ambiguous(_)) | Some(ResidueKind::Missing)
    )
}

/// Q8 (DSSP) secondary structure classes.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum SecondaryStructure {
    /// Alpha helix
    #[strum(serialize = "H")] AlphaHelix = 0,
    /// Isolated beta-bridge residue
    #[strum(serialize = "B")] BetaBridge = 1,
    /// Strand
    #[strum(serialize = "E")] Strand = 2,
    /// 3-10 helix
    #[strum(serialize = "G")] Helix310 = 3,
    /// Pi helix
    #[strum(serialize = "I")] PiHelix = 4,
    #[strum(serialize = "T")] Turn = 5,
    #[strum(serialize = "S")] Bend = 6,
    #[strum(serialize = "-")] Coil = 7,
}

impl SecondaryStructure {
    pub const COUNT: usize = 8;

    pub fn from_code(code: char) -> Option<Self> {
        Self::iter().find(|ss| ss.code() == code)
    }

    #[rustfmt::skip]
    pub const fn code(&self) -> char {
        match self {
            Self::AlphaHelix => 'H', Self::BetaBridge => 'B',
            Self::Strand => 'E',     Self::Helix310 => 'G',
            Self::PiHelix => 'I',    Self::Turn => 'T',
            Self::Bend => 'S',       Self::Coil => '-',
        }
    }

    pub fn to_index(&self) -> usize {
        *self as usize
    }
}
