pub mod decode;

pub use decode::{decode_with_fallback, SourceEncoding};

use crate::error::LoadError;
use crate::table::{Cell, ColumnKind, Table};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A table read from disk together with how it was read.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub path: PathBuf,
    pub encoding: SourceEncoding,
    pub table: Table,
}

/// Reads comma-separated files with a header row into a [`Table`].
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    required_column: Option<String>,
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject files whose (normalized) header lacks `column`.
    pub fn with_required_column<S: Into<String>>(mut self, column: S) -> Self {
        self.required_column = Some(column.into());
        self
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<LoadedTable, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_bytes(&bytes, path)
    }

    /// Same as [`CsvLoader::load`] for bytes already in memory; `path` is used for messages.
    pub fn load_bytes(&self, bytes: &[u8], path: &Path) -> Result<LoadedTable, LoadError> {
        let (text, encoding) =
            decode_with_fallback(bytes).ok_or_else(|| LoadError::Undecodable {
                path: path.to_path_buf(),
            })?;

        let table = parse_csv(&text, path)?;

        if let Some(ref column) = self.required_column {
            if !table.has_column(column) {
                return Err(LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.clone(),
                });
            }
        }

        Ok(LoadedTable {
            path: path.to_path_buf(),
            encoding,
            table,
        })
    }
}

/// Parses decoded CSV text. The first non-blank record is the header.
///
/// All records are read before any cell is typed: each column gets a single
/// [`ColumnKind`] chosen from every field it holds.
pub fn parse_csv(text: &str, path: &Path) -> Result<Table, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut header: Option<Vec<String>> = None;
    let mut records: Vec<StringRecord> = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if record.len() == 1 && record[0].is_empty() {
            continue;
        }

        match header {
            None => {
                let raw: Vec<String> = record.iter().map(str::to_string).collect();
                header = Some(normalize_headers(&raw));
            }
            Some(ref columns) => {
                if record.len() > columns.len() {
                    return Err(LoadError::TooManyFields {
                        line: record.position().map(|p| p.line()).unwrap_or_default(),
                        expected: columns.len(),
                        found: record.len(),
                    });
                }
                records.push(record);
            }
        }
    }

    let columns = header.ok_or_else(|| LoadError::Empty {
        path: path.to_path_buf(),
    })?;

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|col| ColumnKind::infer(records.iter().map(|r| r.get(col).unwrap_or(""))))
        .collect();

    let mut table = Table::new(columns);
    for record in &records {
        let row = kinds
            .iter()
            .enumerate()
            .map(|(col, &kind)| Cell::parse(record.get(col).unwrap_or(""), kind))
            .collect();
        table.push_row(row);
    }

    Ok(table)
}

/// Gives every column a unique, non-blank label.
///
/// Empty labels become `Unnamed: <position>` (whitespace-only labels are kept
/// as they are); a repeated label `X` becomes
/// `X.1`, `X.2`, ... skipping any name already taken.
pub fn normalize_headers(raw: &[String]) -> Vec<String> {
    let named: Vec<String> = raw
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if h.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                h.clone()
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::new();
    let mut result = Vec::with_capacity(named.len());

    for name in named {
        if taken.insert(name.clone()) {
            result.push(name);
            continue;
        }

        let mut suffix = 1;
        let unique = loop {
            let candidate = format!("{}.{}", name, suffix);
            if !taken.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        taken.insert(unique.clone());
        result.push(unique);
    }

    result
}
