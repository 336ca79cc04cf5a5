use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvExtractError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("No extracted data available yet")]
    NoData,

    #[error("Settings error: {message}")]
    Settings { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while turning a file on disk into a [`crate::Table`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is neither valid UTF-8 nor Shift-JIS text")]
    Undecodable { path: PathBuf },

    #[error("Malformed CSV in {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Line {line} has {found} fields but the header has {expected}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{path} has no header row")]
    Empty { path: PathBuf },

    #[error("Column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: String },
}

/// The fixed extraction rules do not fit the loaded table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Column '{column}' not found")]
    ConditionColumnMissing { column: String },

    #[error("Column position {position} is out of range (table has {available} columns)")]
    ColumnOutOfRange { position: usize, available: usize },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Destination directory does not exist: {path}")]
    MissingDirectory { path: PathBuf },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CsvExtractError {
    fn user_message(&self) -> String {
        match self {
            CsvExtractError::Load(LoadError::MissingColumn { column, .. })
            | CsvExtractError::Config(ConfigError::ConditionColumnMissing { column }) => {
                format!("Column '{}' was not found in the CSV file", column)
            }
            CsvExtractError::Load(e) => format!("Failed to load CSV: {}", e),
            CsvExtractError::Config(e) => format!("Extraction failed: {}", e),
            CsvExtractError::Export(e) => format!("Failed to save: {}", e),
            CsvExtractError::NoData => {
                "There is no data yet. Load a CSV file first.".to_string()
            }
            CsvExtractError::Settings { message } => {
                format!("Settings error: {}", message)
            }
            CsvExtractError::Io(e) => format!("IO operation failed: {}", e),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CsvExtractError::Load(LoadError::Undecodable { .. }) => Some(
                "Re-save the file as UTF-8 or Shift-JIS (cp932) CSV and try again.".to_string(),
            ),
            CsvExtractError::Load(LoadError::Unreadable { .. }) => Some(
                "Check that the path exists and that you have permission to read it.".to_string(),
            ),
            CsvExtractError::Load(LoadError::MissingColumn { .. })
            | CsvExtractError::Config(ConfigError::ConditionColumnMissing { .. }) => Some(
                "Make sure this is the expected export: the 10th column must have a blank header."
                    .to_string(),
            ),
            CsvExtractError::Config(ConfigError::ColumnOutOfRange { .. }) => Some(
                "The file has fewer columns than the extraction rules expect.".to_string(),
            ),
            CsvExtractError::Export(_) => Some(
                "Choose a different destination or close the workbook if it is open elsewhere."
                    .to_string(),
            ),
            CsvExtractError::NoData => Some("Use 'open <path>' to load a CSV file.".to_string()),
            CsvExtractError::Settings { .. } => Some(
                "Check your settings file syntax, or regenerate it with --generate-config."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CsvExtractError {
    fn from(error: toml::de::Error) -> Self {
        CsvExtractError::Settings {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CsvExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = CsvExtractError::NoData;
        assert!(error.user_message().contains("Load a CSV file first"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_missing_column_reads_the_same_from_loader_and_extractor() {
        let from_loader = CsvExtractError::from(LoadError::MissingColumn {
            path: PathBuf::from("in.csv"),
            column: "Unnamed: 9".to_string(),
        });
        let from_extractor = CsvExtractError::from(ConfigError::ConditionColumnMissing {
            column: "Unnamed: 9".to_string(),
        });
        assert_eq!(from_loader.user_message(), from_extractor.user_message());
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error = CsvExtractError::from(toml_error);
        assert!(matches!(error, CsvExtractError::Settings { .. }));
    }

    #[test]
    fn test_out_of_range_message() {
        let error = ConfigError::ColumnOutOfRange {
            position: 160,
            available: 12,
        };
        assert_eq!(
            error.to_string(),
            "Column position 160 is out of range (table has 12 columns)"
        );
    }
}
