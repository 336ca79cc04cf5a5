use crate::error::{CsvExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Presentation and export settings.
///
/// Extraction rules are not part of the settings file; they are fixed in
/// [`crate::ExtractionConfig::builtin`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Widest a grid column may get, in terminal cells.
    pub max_column_width: usize,
    /// 0 renders every row.
    pub max_rows: usize,
    pub show_grid: bool,
    pub zebra_stripes: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub sheet_name: String,
    pub bold_header: bool,
    pub autofit: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_column_width: 40,
            max_rows: 0,
            show_grid: true,
            zebra_stripes: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            bold_header: true,
            autofit: false,
        }
    }
}

pub const DEFAULT_CONFIG_PATHS: &[&str] = &["csvextract.toml", ".csvextract.toml"];

const MAX_SHEET_NAME_LEN: usize = 31;
const INVALID_SHEET_NAME_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CsvExtractError::Settings {
                message: format!("Settings file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CsvExtractError::Settings {
            message: format!("Failed to read settings file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| CsvExtractError::Settings {
            message: format!("Failed to parse settings file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in DEFAULT_CONFIG_PATHS {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(width) = cli_args.max_column_width {
            self.display.max_column_width = width;
        }

        if let Some(max_rows) = cli_args.max_rows {
            self.display.max_rows = max_rows;
        }

        if let Some(show_grid) = cli_args.show_grid {
            self.display.show_grid = show_grid;
        }

        if let Some(ref sheet_name) = cli_args.sheet_name {
            self.export.sheet_name = sheet_name.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| CsvExtractError::Settings {
            message: format!("Failed to serialize settings: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CsvExtractError::Settings {
            message: format!("Failed to write settings file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.display.max_column_width == 0 {
            return Err(CsvExtractError::Settings {
                message: "Maximum column width must be greater than 0".to_string(),
            });
        }

        let name = &self.export.sheet_name;
        if name.trim().is_empty() {
            return Err(CsvExtractError::Settings {
                message: "Sheet name must not be empty".to_string(),
            });
        }

        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(CsvExtractError::Settings {
                message: format!(
                    "Sheet name must be {} characters or less",
                    MAX_SHEET_NAME_LEN
                ),
            });
        }

        if name.contains(INVALID_SHEET_NAME_CHARS) {
            return Err(CsvExtractError::Settings {
                message: format!("Sheet name '{}' contains one of []:*?/\\", name),
            });
        }

        Ok(())
    }

}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_column_width: Option<usize>,
    pub max_rows: Option<usize>,
    pub show_grid: Option<bool>,
    pub sheet_name: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_column_width(mut self, width: Option<usize>) -> Self {
        self.max_column_width = width;
        self
    }

    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_show_grid(mut self, show_grid: Option<bool>) -> Self {
        self.show_grid = show_grid;
        self
    }

    pub fn with_sheet_name(mut self, sheet_name: Option<String>) -> Self {
        self.sheet_name = sheet_name;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.max_column_width, 40);
        assert!(config.display.show_grid);
        assert_eq!(config.export.sheet_name, "Sheet1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.display.max_column_width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.export.sheet_name = "a".repeat(32);
        assert!(config.validate().is_err());

        config.export.sheet_name = "Q1/Q2".to_string();
        assert!(config.validate().is_err());

        config.export.sheet_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.export.sheet_name = "抽出結果".to_string();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.export.sheet_name, "抽出結果");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[display]\nmax_rows = 25").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.display.max_rows, 25);
        assert_eq!(config.display.max_column_width, 40);
        assert_eq!(config.export.sheet_name, "Sheet1");
    }

    #[test]
    fn test_missing_file_is_settings_error() {
        let err = Config::load_from_file("/no/such/csvextract.toml").unwrap_err();
        assert!(matches!(err, CsvExtractError::Settings { .. }));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_max_column_width(Some(12))
            .with_show_grid(Some(false))
            .with_sheet_name(Some("Result".to_string()));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.display.max_column_width, 12);
        assert!(!config.display.show_grid);
        assert_eq!(config.display.max_rows, 0);
        assert_eq!(config.export.sheet_name, "Result");
    }

    #[test]
    fn test_saved_defaults_have_no_extraction_rules() {
        let temp_file = NamedTempFile::new().unwrap();
        Config::default().save_to_file(temp_file.path()).unwrap();

        let sample = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(sample.contains("[display]"));
        assert!(sample.contains("[export]"));
        assert!(!sample.contains("start_row"));
    }
}
