//! ferritin-test-data
//!
//! Raw feature tables embedded in the crate for use in testing.
//!
//! The test files are represented as `TestFile` objects which package the raw
//! bytes and create temporary files for programs to operate on.
use std::fs;
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use ferritin_test_data::TestFile;
/// let (table_file, _temp) = TestFile::table_minimal().create_temp().unwrap();
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// Two features per residue; rows for D, N, C, K, I, L, E and Q only.
    pub fn table_minimal() -> Self {
        Self {
            filebinary: include_bytes!("../data/tables/minimal.txt"),
            suffix: "txt",
        }
    }
    /// Same residues as `table_minimal` but the `N` row has three features.
    pub fn table_ragged() -> Self {
        Self {
            filebinary: include_bytes!("../data/tables/ragged.txt"),
            suffix: "txt",
        }
    }
    /// Non-numeric feature value on line 2.
    pub fn table_malformed() -> Self {
        Self {
            filebinary: include_bytes!("../data/tables/malformed.txt"),
            suffix: "txt",
        }
    }

    pub fn contents(&self) -> &'static str {
        std::str::from_utf8(self.filebinary).unwrap_or_default()
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }
}
