use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which values to pull out of a series file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Leading lines skipped unconditionally.
    pub header_rows: usize,
    /// Zero-based index of the value column.
    pub column: usize,
    /// Stop after this many data rows; `None` reads to the end.
    pub max_rows: Option<usize>,
}

#[derive(Debug, Error)]
pub enum XvgError {
    #[error("I/O error for '{path}': {source}", path = path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Malformed row in '{path}' at line {line}: {kind}", path = path.display())]
    MalformedRow {
        path: PathBuf,
        line: usize,
        kind: RowErrorKind,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowErrorKind {
    #[error("expected {expected} columns like the first data row, found {found}")]
    ColumnCount { expected: usize, found: usize },
    #[error("column {column} is missing (row has {found} columns)")]
    MissingColumn { column: usize, found: usize },
    #[error("value '{value}' in column {column} is not a number")]
    NotNumeric { column: usize, value: String },
}

pub struct XvgFile;

impl XvgFile {
    /// Reads one column of a whitespace-delimited series.
    ///
    /// After `header_rows` lines are skipped, blank lines and lines starting with `#`
    /// or `@` are ignored and do not count toward `max_rows`. Every data row must have
    /// the same number of fields as the first one. `origin` only labels errors.
    pub fn read_column(
        reader: impl BufRead,
        spec: &ColumnSpec,
        origin: &Path,
    ) -> Result<Vec<f64>, XvgError> {
        let mut values = Vec::new();
        let mut expected_fields: Option<usize> = None;

        for (idx, line_res) in reader.lines().enumerate() {
            if idx < spec.header_rows {
                continue;
            }
            if spec.max_rows.is_some_and(|max| values.len() >= max) {
                break;
            }

            let line = line_res.map_err(|source| XvgError::Io {
                path: origin.to_path_buf(),
                source,
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(['#', '@']) {
                continue;
            }

            let malformed = |kind| XvgError::MalformedRow {
                path: origin.to_path_buf(),
                line: idx + 1,
                kind,
            };

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            let expected = *expected_fields.get_or_insert(fields.len());
            if fields.len() != expected {
                return Err(malformed(RowErrorKind::ColumnCount {
                    expected,
                    found: fields.len(),
                }));
            }

            let raw = fields.get(spec.column).ok_or_else(|| {
                malformed(RowErrorKind::MissingColumn {
                    column: spec.column,
                    found: fields.len(),
                })
            })?;
            let value = raw.parse::<f64>().map_err(|_| {
                malformed(RowErrorKind::NotNumeric {
                    column: spec.column,
                    value: raw.to_string(),
                })
            })?;
            values.push(value);
        }

        Ok(values)
    }

    pub fn read_column_from_path(path: &Path, spec: &ColumnSpec) -> Result<Vec<f64>, XvgError> {
        let file = File::open(path).map_err(|source| XvgError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_column(BufReader::new(file), spec, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const COLUMNS: ColumnSpec = ColumnSpec {
        header_rows: 3,
        column: 1,
        max_rows: None,
    };

    fn read(content: &str, spec: &ColumnSpec) -> Result<Vec<f64>, XvgError> {
        XvgFile::read_column(Cursor::new(content), spec, Path::new("inline.xvg"))
    }

    #[test]
    fn header_rows_are_skipped_even_when_numeric() {
        let content = "1 99\n2 99\n3 99\n0.0 1.5\n0.1 2.5\n";
        assert_eq!(read(content, &COLUMNS).unwrap(), vec![1.5, 2.5]);
    }

    #[test]
    fn comment_and_directive_lines_are_ignored() {
        let content = "# GROMACS\n# header\n@ title \"pull\"\n@ xaxis\n\n0.0 -12.25\n# note\n0.2 3e2\n";
        assert_eq!(read(content, &COLUMNS).unwrap(), vec![-12.25, 300.0]);
    }

    #[test]
    fn row_cap_limits_data_rows() {
        let content = "h\nh\nh\n0 1\n1 2\n2 3\n3 not-a-number\n";
        let spec = ColumnSpec {
            max_rows: Some(3),
            ..COLUMNS
        };
        assert_eq!(read(content, &spec).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn non_numeric_value_is_reported_with_its_line() {
        let content = "h\nh\nh\n0 1\n1 abc\n";
        match read(content, &COLUMNS) {
            Err(XvgError::MalformedRow { line, kind, .. }) => {
                assert_eq!(line, 5);
                assert_eq!(
                    kind,
                    RowErrorKind::NotNumeric {
                        column: 1,
                        value: "abc".into()
                    }
                );
            }
            other => panic!("expected a malformed row, got {other:?}"),
        }
    }

    #[test]
    fn inconsistent_column_count_is_rejected() {
        let content = "h\nh\nh\n0 1\n1 2 3\n";
        assert!(matches!(
            read(content, &COLUMNS),
            Err(XvgError::MalformedRow {
                line: 5,
                kind: RowErrorKind::ColumnCount {
                    expected: 2,
                    found: 3
                },
                ..
            })
        ));
    }

    #[test]
    fn missing_value_column_is_rejected() {
        let content = "h\nh\nh\n0\n1\n";
        assert!(matches!(
            read(content, &COLUMNS),
            Err(XvgError::MalformedRow {
                kind: RowErrorKind::MissingColumn { column: 1, found: 1 },
                ..
            })
        ));
    }

    #[test]
    fn reads_from_a_file_on_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "@ header\n@ header\n@ header\n0.00 5.5\n0.02 6.5").unwrap();
        let values = XvgFile::read_column_from_path(file.path(), &COLUMNS).unwrap();
        assert_eq!(values, vec![5.5, 6.5]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = XvgFile::read_column_from_path(Path::new("/nonexistent/pullf1.xvg"), &COLUMNS);
        assert!(matches!(result, Err(XvgError::Io { .. })));
    }
}
