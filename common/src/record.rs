use tracing::warn;

use crate::{config::BlankLines, error::TabulateError};

/// One benchmark result: `<workload> <database> <load throughput> <run throughput>`
///
/// Throughputs are kept as the raw tokens, no numeric validation is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub workload: String,
    pub database: String,
    pub load_throughput: String,
    pub run_throughput: String,
}

impl ResultRecord {
    /// Parses one input line. `line_no` is 1-based and only used for reporting.
    ///
    /// Returns `Ok(None)` for a blank line when `blank_lines` is [`BlankLines::Skip`].
    pub fn parse_line(
        line_no: usize,
        line: &str,
        blank_lines: BlankLines,
    ) -> Result<Option<Self>, TabulateError> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        if tokens.is_empty() && blank_lines == BlankLines::Skip {
            return Ok(None);
        }

        let [workload, database, load, run, rest @ ..] = tokens.as_slice() else {
            return Err(TabulateError::MalformedRecord {
                line: line_no,
                content: line.to_owned(),
                tokens: tokens.len(),
            });
        };
        if !rest.is_empty() {
            warn!(
                "Ignoring {} extra field(s) on line {line_no}: {rest:?}",
                rest.len()
            );
        }

        Ok(Some(Self {
            workload: (*workload).to_owned(),
            database: (*database).to_owned(),
            load_throughput: (*load).to_owned(),
            run_throughput: (*run).to_owned(),
        }))
    }

    /// The cell text, ie. `100k/200k`
    pub fn display_value(&self) -> String {
        format!("{}k/{}k", self.load_throughput, self.run_throughput)
    }
}
