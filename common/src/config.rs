use std::{fs::read_to_string, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::TabulateError;

pub const DEFAULT_COLUMN_WIDTH: usize = 15;
pub const DEFAULT_PLACEHOLDER: &str = "###";
pub const DEFAULT_HEADER_LABEL: &str = "workload";
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".tsv";

/// What to do with lines that contain nothing but whitespace
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankLines {
    #[default]
    Skip,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableSettings {
    /// Every label and cell is right-padded with spaces to this many characters
    pub column_width: usize,
    /// Rendered for (workload, database) pairs that were never recorded
    pub placeholder: String,
    /// Label of the first header column
    pub header_label: String,
    /// Appended to the input path to derive the output path
    pub output_suffix: String,
    pub blank_lines: BlankLines,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            header_label: DEFAULT_HEADER_LABEL.to_owned(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_owned(),
            blank_lines: BlankLines::default(),
        }
    }
}

impl TableSettings {
    pub fn from_yaml(data: &str) -> Result<Self, serde_yml::Error> {
        // serde_yml does not accept an empty document as an empty mapping
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(data)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, TabulateError> {
        let data = read_to_string(path).map_err(|err| TabulateError::io(path, err))?;
        Self::from_yaml(&data).map_err(|source| TabulateError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
