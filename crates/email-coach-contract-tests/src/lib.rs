//! Schema fixtures shared by the contract validation tests.

use std::path::{Path, PathBuf};

/// Root of the frozen JSON schemas and their fixtures.
pub fn contracts_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../contracts")
}

/// Absolute path of one file under [`contracts_dir`].
pub fn contract_file(relative: &str) -> PathBuf {
    contracts_dir().join(relative)
}
