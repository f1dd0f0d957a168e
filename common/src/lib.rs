use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

use tracing::debug;

pub mod config;
pub mod error;
pub mod record;
pub mod table;
pub mod util;

pub use config::{BlankLines, TableSettings};
pub use error::TabulateError;
pub use record::ResultRecord;
pub use table::ResultTable;

/// What [`tabulate_file`] wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabulateSummary {
    pub output: PathBuf,
    pub workloads: usize,
    pub databases: usize,
}

/// Reads a results log from `input` and writes its table to `output`.
///
/// The table is rendered completely before `output` is touched, so a malformed
/// input never leaves a truncated file behind. An existing `output` is overwritten.
pub fn tabulate_file(
    input: &Path,
    output: &Path,
    settings: &TableSettings,
) -> Result<TabulateSummary, TabulateError> {
    debug!("Reading results from {}", input.display());
    let data = read_to_string(input).map_err(|err| TabulateError::io(input, err))?;
    let table = ResultTable::parse(&data, settings)?;
    let rendered = table.render(settings)?;

    debug!("Writing {} bytes to {}", rendered.len(), output.display());
    write(output, rendered).map_err(|err| TabulateError::io(output, err))?;

    Ok(TabulateSummary {
        output: output.to_path_buf(),
        workloads: table.len(),
        databases: table.databases().count(),
    })
}
