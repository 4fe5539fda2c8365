//! Tabular data parsed from an uploaded CSV.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV has no columns")]
    NoColumns,

    #[error("CSV contains no data rows")]
    Empty,
}

/// A fully numeric column projected out of a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// Rows-by-named-columns table. Cells are kept as the strings the CSV
/// carried; numeric projection happens on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Parse CSV text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(DatasetError::NoColumns);
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    /// Columns where every cell parses as a finite float. Everything else
    /// (text, empty cells, NaN) disqualifies the whole column.
    pub fn numeric_columns(&self) -> Vec<NumericColumn> {
        (0..self.headers.len())
            .filter_map(|col| {
                let mut values = Vec::with_capacity(self.rows.len());
                for row in &self.rows {
                    match row.get(col)?.parse::<f64>() {
                        Ok(v) if v.is_finite() => values.push(v),
                        _ => return None,
                    }
                }
                Some(NumericColumn {
                    name: self.headers[col].clone(),
                    values,
                })
            })
            .collect()
    }

    /// Project the named columns, in the order given. Names that do not
    /// match a header are skipped.
    pub fn select(&self, names: &[String]) -> Dataset {
        let positions: Vec<usize> = names
            .iter()
            .filter_map(|name| self.headers.iter().position(|h| h == name))
            .collect();

        Dataset {
            headers: positions.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| positions.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// Write the table back out as CSV.
    pub fn write_csv(&self, path: &Path) -> Result<(), DatasetError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "x1,label,y\n1.0,a,2.0\n2.0,b,4.0\n3.0,c,6.0\n";

    #[test]
    fn parses_headers_and_rows() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.headers(), ["x1", "label", "y"]);
        assert_eq!(dataset.n_rows(), 3);
        assert_eq!(dataset.n_cols(), 3);
    }

    #[test]
    fn numeric_projection_drops_text_columns() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let numeric = dataset.numeric_columns();
        let names: Vec<&str> = numeric.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["x1", "y"]);
        assert_eq!(numeric[1].values, [2.0, 4.0, 6.0]);
    }

    #[test]
    fn select_projects_in_given_order() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let projected = dataset.select(&["y".to_string(), "x1".to_string()]);
        assert_eq!(projected.headers(), ["y", "x1"]);
        assert_eq!(projected.n_rows(), 3);
    }

    #[test]
    fn empty_csv_is_an_error() {
        let err = Dataset::from_reader("x1,y\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn ragged_rows_are_an_error() {
        let err = Dataset::from_reader("a,b,c\n1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    #[test]
    fn write_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        dataset.write_csv(&path).unwrap();

        let reread = Dataset::from_path(&path).unwrap();
        assert_eq!(reread, dataset);
    }
}
