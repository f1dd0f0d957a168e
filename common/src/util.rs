use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Right-pads `label` with spaces up to `width` characters. Longer labels are left as is.
pub fn pad(label: &str, width: usize) -> String {
    format!("{label:<width$}")
}

/// Appends `suffix` to the last component of `input`, ie. `results.txt` -> `results.txt.tsv`
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(input.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}
