//! Preset amino-acid encodings.
//!
//! # Encodings:
//! * `AANDXred` - 11 principal components of the AAindex1 property database.
//!   Each residue's position in an abstract physicochemical property space;
//!   left as signed, unnormalized values.
//! * `JTTP01dist` - JTT amino-acid exchange probabilities at P(0.01). Each
//!   row is renormalized to a distribution, giving a rough measure of how
//!   readily a residue is substituted by each of the others.
//!
//! Registration order is the order of [`AaEncoding::iter`], which is also the
//! order shown on the command line.
use super::table::{FeatureTable, FeatureTableBuilder, TableOptions};
use crate::error::{FeatureError, Result};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// JTT amino-acid exchange probabilities at P(0.01).
/// Jones D.T., Taylor W.R. and Thornton J.M. (1992) CABIOS 8:275-282
pub const JTT_P01_DATA: &str = include_str!("tabledata/jtt_p01.txt");

/// AAindex1 properties reduced by PCA to 11 components (>90% of variance of
/// the standardized properties). Kawashima et al. (2008) NAR 36, D202-D205
pub const AANDX_RED_DATA: &str = include_str!("tabledata/aaindex_reduced.txt");

pub type TableConstructor = fn() -> Result<FeatureTable>;

/// Exchangeability table from the JTT P(0.01) matrix.
pub fn jtt_p01_dist() -> Result<FeatureTable> {
    AaEncoding::JttP01Dist.build()
}

/// Reduced AAindex property table.
pub fn aandx_reduced() -> Result<FeatureTable> {
    AaEncoding::AandxReduced.build()
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum AaEncoding {
    #[strum(serialize = "AANDXred")]
    AandxReduced,
    #[strum(serialize = "JTTP01dist")]
    JttP01Dist,
}

static AANDX_RED_TABLE: OnceLock<std::result::Result<FeatureTable, Arc<FeatureError>>> =
    OnceLock::new();
static JTT_P01_TABLE: OnceLock<std::result::Result<FeatureTable, Arc<FeatureError>>> =
    OnceLock::new();

impl AaEncoding {
    /// Look up an encoding by its registered (case-sensitive) name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| FeatureError::UnknownEncoding {
            name: name.to_string(),
            available: Self::names().join(", "),
        })
    }

    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    pub fn names() -> Vec<&'static str> {
        Self::iter().map(|encoding| encoding.name()).collect()
    }

    pub fn raw_data(&self) -> &'static str {
        match self {
            Self::AandxReduced => AANDX_RED_DATA,
            Self::JttP01Dist => JTT_P01_DATA,
        }
    }

    pub fn options(&self) -> TableOptions {
        match self {
            Self::AandxReduced => TableOptions {
                normalize: false,
                average: false,
            },
            Self::JttP01Dist => TableOptions {
                normalize: true,
                average: true,
            },
        }
    }

    pub fn constructor(&self) -> TableConstructor {
        match self {
            Self::AandxReduced => aandx_reduced,
            Self::JttP01Dist => jtt_p01_dist,
        }
    }

    /// Build a fresh table from the embedded data.
    pub fn build(&self) -> Result<FeatureTable> {
        FeatureTableBuilder::new(self.raw_data())
            .options(self.options())
            .build()
    }

    /// Process-wide table, built on first use and shared afterwards.
    pub fn shared(&self) -> Result<&'static FeatureTable> {
        let cell = match self {
            Self::AandxReduced => &AANDX_RED_TABLE,
            Self::JttP01Dist => &JTT_P01_TABLE,
        };
        cell.get_or_init(|| self.build().map_err(Arc::new))
            .as_ref()
            .map_err(|source| FeatureError::Preset {
                encoding: self.to_string(),
                source: Arc::clone(source),
            })
    }

    /// Ordered `(name, constructor)` pairs for every registered encoding.
    pub fn registry() -> Vec<(&'static str, TableConstructor)> {
        Self::iter()
            .map(|encoding| (encoding.name(), encoding.constructor()))
            .collect()
    }
}
