use std::collections::{BTreeSet, HashMap};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::{config::TableSettings, error::TabulateError, record::ResultRecord, util::pad};

/// Cross-tabulation of benchmark results, workloads as rows and databases as columns.
///
/// Labels are kept in ordered sets so rows and columns always come out in byte order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultTable {
    cells: HashMap<String, HashMap<String, String>>,
    workloads: BTreeSet<String>,
    databases: BTreeSet<String>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a whole results log. Stops at the first malformed line.
    pub fn parse(input: &str, settings: &TableSettings) -> Result<Self, TabulateError> {
        let mut table = Self::new();
        for (idx, line) in input.lines().enumerate() {
            if let Some(record) = ResultRecord::parse_line(idx + 1, line, settings.blank_lines)? {
                table.insert(record);
            }
        }
        debug!(
            "Parsed {} workloads x {} databases",
            table.workloads.len(),
            table.databases.len()
        );
        Ok(table)
    }

    /// Records a result. A later result for the same (workload, database) pair replaces the earlier one.
    pub fn insert(&mut self, record: ResultRecord) {
        let value = record.display_value();
        let row = self.cells.entry(record.workload.clone()).or_default();
        if let Some(previous) = row.insert(record.database.clone(), value) {
            debug!(
                "Replacing earlier result {previous} for ({}, {})",
                record.workload, record.database
            );
        }
        self.workloads.insert(record.workload);
        self.databases.insert(record.database);
    }

    pub fn get(&self, workload: &str, database: &str) -> Option<&str> {
        self.cells
            .get(workload)
            .and_then(|row| row.get(database))
            .map(String::as_str)
    }

    pub fn workloads(&self) -> impl Iterator<Item = &str> {
        self.workloads.iter().map(String::as_str)
    }

    pub fn databases(&self) -> impl Iterator<Item = &str> {
        self.databases.iter().map(String::as_str)
    }

    /// Number of distinct workloads, ie. rows
    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }

    /// Renders the tab separated table. Every field is padded to `settings.column_width`,
    /// lines end with `\n` on every platform.
    pub fn render(&self, settings: &TableSettings) -> Result<String, TabulateError> {
        let width = settings.column_width;
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(Terminator::Any(b'\n'))
            .quote_style(QuoteStyle::Necessary)
            .from_writer(Vec::new());

        let header = std::iter::once(pad(&settings.header_label, width))
            .chain(self.databases().map(|db| pad(db, width)));
        writer.write_record(header)?;

        for workload in self.workloads() {
            let row = std::iter::once(pad(workload, width)).chain(self.databases().map(|db| {
                pad(
                    self.get(workload, db).unwrap_or(&settings.placeholder),
                    width,
                )
            }));
            writer.write_record(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| TabulateError::Render(err.into_error().into()))?;
        // Only UTF-8 fields were written
        String::from_utf8(bytes).map_err(|err| {
            TabulateError::Render(
                std::io::Error::new(std::io::ErrorKind::InvalidData, err.utf8_error()).into(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "load-a db1 100 200\nload-b db2 50 75\nload-a db2 10 20\n";

    fn settings() -> TableSettings {
        TableSettings::default()
    }

    fn split_row(line: &str) -> Vec<&str> {
        line.split('\t').map(str::trim_end).collect()
    }

    #[test]
    fn example_table() {
        let table = ResultTable::parse(EXAMPLE, &settings()).unwrap();
        assert_eq!(table.workloads().collect::<Vec<_>>(), ["load-a", "load-b"]);
        assert_eq!(table.databases().collect::<Vec<_>>(), ["db1", "db2"]);
        assert_eq!(table.get("load-a", "db1"), Some("100k/200k"));
        assert_eq!(table.get("load-a", "db2"), Some("10k/20k"));
        assert_eq!(table.get("load-b", "db1"), None);
        assert_eq!(table.get("load-b", "db2"), Some("50k/75k"));
    }

    #[test]
    fn example_rendering() {
        let table = ResultTable::parse(EXAMPLE, &settings()).unwrap();
        let expected = concat!(
            "workload       \tdb1            \tdb2            \n",
            "load-a         \t100k/200k      \t10k/20k        \n",
            "load-b         \t###            \t50k/75k        \n",
        );
        assert_eq!(table.render(&settings()).unwrap(), expected);
    }

    #[test]
    fn last_write_wins() {
        let input = "wl db 1 2\nwl other 3 4\nwl db 5 6\n";
        let table = ResultTable::parse(input, &settings()).unwrap();
        assert_eq!(table.get("wl", "db"), Some("5k/6k"));
        assert_eq!(table.get("wl", "other"), Some("3k/4k"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn rows_and_columns_are_sorted_and_rectangular() {
        let input = "zeta pg 1 1\nalpha rocks 2 2\nBeta mongo 3 3\nalpha pg 4 4\n";
        let table = ResultTable::parse(input, &settings()).unwrap();
        let rendered = table.render(&settings()).unwrap();
        let lines = rendered.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 1 + 3);
        assert_eq!(split_row(lines[0]), ["workload", "mongo", "pg", "rocks"]);
        let rows = lines[1..]
            .iter()
            .map(|line| split_row(line))
            .collect::<Vec<_>>();
        assert_eq!(
            rows.iter().map(|row| row[0]).collect::<Vec<_>>(),
            ["Beta", "alpha", "zeta"]
        );
        assert!(rows.iter().all(|row| row.len() == 4));
        assert_eq!(rows[1], ["alpha", "###", "4k/4k", "2k/2k"]);
    }

    #[test]
    fn empty_input_renders_header_only() {
        let table = ResultTable::parse("", &settings()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.render(&settings()).unwrap(), "workload       \n");
    }

    #[test]
    fn custom_settings() {
        let settings = TableSettings {
            column_width: 4,
            placeholder: "-".to_owned(),
            header_label: "wl".to_owned(),
            ..TableSettings::default()
        };
        let table = ResultTable::parse(EXAMPLE, &settings).unwrap();
        let expected = concat!(
            "wl  \tdb1 \tdb2 \n",
            "load-a\t100k/200k\t10k/20k\n",
            "load-b\t-   \t50k/75k\n",
        );
        assert_eq!(table.render(&settings).unwrap(), expected);
    }

    #[test]
    fn malformed_line_aborts_with_line_number() {
        let input = "load-a db1 100 200\n\nload-b db2\n";
        match ResultTable::parse(input, &settings()) {
            Err(TabulateError::MalformedRecord { line, tokens, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(tokens, 2);
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let input = "c x 1 1\na y 2 2\nb z 3 3\na x 4 4\n";
        let first = ResultTable::parse(input, &settings()).unwrap();
        let second = ResultTable::parse(input, &settings()).unwrap();
        assert_eq!(
            first.render(&settings()).unwrap(),
            second.render(&settings()).unwrap()
        );
    }
}
