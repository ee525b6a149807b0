//! Delimited text tables with a header row.
//!
//! Junction tables are passed through untouched apart from the columns this
//! tool adds, so rows are kept as plain strings in their original column order.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::parsing::ParseError;

/// Pick a delimiter from the file extension: tab for `.tsv`/`.txt`/`.tab`, comma otherwise
#[must_use]
pub fn delimiter_for_path(path: &Path) -> u8 {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("tsv" | "txt" | "tab") => b'\t',
        _ => b',',
    }
}

/// An in-memory delimited table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a required column.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingColumn` if no header matches `name`.
    pub fn require_column(&self, name: &str) -> Result<usize, ParseError> {
        self.find_column(name)
            .ok_or_else(|| ParseError::MissingColumn {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    /// Insert a column at `index`, one value per row.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::ColumnLength` if `values` does not have one entry per
    /// row; the table is left unchanged.
    pub fn insert_column(
        &mut self,
        index: usize,
        name: &str,
        values: Vec<String>,
    ) -> Result<(), ParseError> {
        self.check_column_length(name, &values)?;
        let index = index.min(self.headers.len());
        self.headers.insert(index, name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            // Short rows are padded so the new value lands under its header
            if row.len() < index {
                row.resize(index, String::new());
            }
            row.insert(index, value);
        }
        Ok(())
    }

    /// Overwrite the column called `name` if present, otherwise append it.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::ColumnLength` if `values` does not have one entry per
    /// row; the table is left unchanged.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<(), ParseError> {
        match self.find_column(name) {
            Some(index) => {
                self.check_column_length(name, &values)?;
                for (row, value) in self.rows.iter_mut().zip(values) {
                    if row.len() <= index {
                        row.resize(index + 1, String::new());
                    }
                    row[index] = value;
                }
                Ok(())
            }
            None => {
                let end = self.headers.len();
                self.insert_column(end, name, values)
            }
        }
    }

    fn check_column_length(&self, name: &str, values: &[String]) -> Result<(), ParseError> {
        if values.len() == self.rows.len() {
            Ok(())
        } else {
            Err(ParseError::ColumnLength {
                column: name.to_string(),
                values: values.len(),
                rows: self.rows.len(),
            })
        }
    }

    /// Remove the column called `name`, if present
    pub fn remove_column(&mut self, name: &str) {
        if let Some(index) = self.find_column(name) {
            self.headers.remove(index);
            for row in &mut self.rows {
                row.remove(index);
            }
        }
    }

    /// Value of `column` in `row`, or `""` for short rows
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows[row].get(column).map_or("", String::as_str)
    }
}

/// Read a delimited file with a header row.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, `ParseError::Csv` on
/// malformed rows, or `ParseError::InvalidFormat` if the header row is missing.
pub fn read_table(path: &Path, delimiter: u8) -> Result<Table, ParseError> {
    let file = std::fs::File::open(path)?;
    read_table_from(file, delimiter)
}

/// Read a delimited table from any reader.
///
/// # Errors
///
/// Returns `ParseError::Csv` on malformed rows or `ParseError::InvalidFormat` if
/// the header row is missing.
pub fn read_table_from<R: std::io::Read>(reader: R, delimiter: u8) -> Result<Table, ParseError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(String::is_empty) {
        return Err(ParseError::InvalidFormat(
            "Table has no header row".to_string(),
        ));
    }

    let width = headers.len();
    let mut table = Table::new(headers);
    for result in reader.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        // Short rows read as missing values, like an empty cell
        row.resize(width.max(row.len()), String::new());
        table.rows.push(row);
    }

    Ok(table)
}

/// Write a table with its header row.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be created or `ParseError::Csv`
/// if writing fails.
pub fn write_table(path: &Path, table: &Table, delimiter: u8) -> Result<(), ParseError> {
    let file = std::fs::File::create(path)?;
    write_table_to(file, table, delimiter)
}

/// Write a table with its header row to any writer.
///
/// # Errors
///
/// Returns `ParseError::Csv` if writing fails.
pub fn write_table_to<W: std::io::Write>(
    writer: W,
    table: &Table,
    delimiter: u8,
) -> Result<(), ParseError> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(writer);

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
