use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "csvextract")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract a fixed row/column window from a CSV export and save it as a workbook")]
#[command(
    long_about = "csvextract loads a CSV file (UTF-8 or Shift-JIS), keeps the header rows and \
                  every row from row 70 on whose 10th column is filled in, projects the fixed \
                  set of columns, shows the result as a grid and optionally saves it as .xlsx."
)]
#[command(before_help = "📂 csvextract - CSV extraction viewer")]
#[command(after_help = "EXAMPLES:\n  \
    csvextract export.csv\n  \
    csvextract export.csv --save result.xlsx\n  \
    csvextract export.csv --output-format json --no-grid\n  \
    csvextract --interactive")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// CSV file to load
    #[arg(
        value_parser = validate_input_path,
        required_unless_present_any = ["interactive", "generate_config"]
    )]
    pub input: Option<PathBuf>,

    /// Save the extracted result to this workbook
    #[arg(
        short,
        long,
        value_parser = validate_save_path,
        conflicts_with = "interactive",
        help = "Workbook to save the result to (.xlsx is added when missing)"
    )]
    pub save: Option<PathBuf>,

    /// Read commands (open, show, save, quit) from standard input
    #[arg(short, long)]
    pub interactive: bool,

    /// Settings file path
    #[arg(short, long, help = "Path to TOML settings file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Maximum grid column width
    #[arg(long, help = "Widest a grid column may be (terminal cells)")]
    pub max_width: Option<usize>,

    /// Maximum number of rows to display
    #[arg(long, help = "Display at most this many rows (0 = all)")]
    pub max_rows: Option<usize>,

    /// Do not print the result grid
    #[arg(long)]
    pub no_grid: bool,

    /// Worksheet name used when saving
    #[arg(long)]
    pub sheet_name: Option<String>,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors and the data itself)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample settings file
    #[arg(long, help = "Generate a sample settings file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_max_column_width(self.max_width)
            .with_max_rows(self.max_rows)
            .with_show_grid(if self.no_grid { Some(false) } else { None })
            .with_sheet_name(self.sheet_name.clone())
    }
}

/// Accepts any path except a directory; missing files are reported by the loader.
pub fn validate_input_path(s: &str) -> std::result::Result<PathBuf, String> {
    if s.trim().is_empty() {
        return Err("Input path must not be empty".to_string());
    }

    let path = PathBuf::from(s);
    if path.is_dir() {
        return Err(format!("{} is a directory, expected a CSV file", s));
    }

    Ok(path)
}

pub fn validate_save_path(s: &str) -> std::result::Result<PathBuf, String> {
    if s.trim().is_empty() {
        return Err("Save path must not be empty".to_string());
    }

    let path = Path::new(s);
    if path.is_dir() {
        return Err(format!("{} is a directory, expected a workbook file name", s));
    }

    Ok(crate::exporter::with_default_extension(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli_with_input(input: &str) -> Cli {
        Cli {
            input: Some(PathBuf::from(input)),
            save: None,
            interactive: false,
            config: None,
            output_format: OutputFormat::Human,
            max_width: None,
            max_rows: None,
            no_grid: false,
            sheet_name: None,
            verbose: 0,
            quiet: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_validate_input_path() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_input_path("data.csv").is_ok());
        assert!(validate_input_path("").is_err());
        assert!(validate_input_path(temp_dir.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_validate_save_path_adds_extension() {
        assert_eq!(
            validate_save_path("result").unwrap(),
            PathBuf::from("result.xlsx")
        );
        assert_eq!(
            validate_save_path("result.xlsx").unwrap(),
            PathBuf::from("result.xlsx")
        );
        assert!(validate_save_path(" ").is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut cli = cli_with_input("data.csv");
        cli.no_grid = true;
        cli.max_width = Some(10);

        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.show_grid, Some(false));
        assert_eq!(overrides.max_column_width, Some(10));
        assert_eq!(overrides.sheet_name, None);
    }

    #[test]
    fn test_load_config_rejects_invalid_overrides() {
        let mut cli = cli_with_input("data.csv");
        cli.sheet_name = Some("a:b".to_string());
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from(["csvextract", "in.csv", "-s", "out", "-vv"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("in.csv")));
        assert_eq!(cli.save, Some(PathBuf::from("out.xlsx")));
        assert_eq!(cli.verbose, 2);

        assert!(Cli::try_parse_from(["csvextract", "in.csv", "-q", "-v"]).is_err());
        assert!(Cli::try_parse_from(["csvextract", "--interactive"]).is_ok());
        assert!(Cli::try_parse_from(["csvextract", "-i", "-s", "out.xlsx"]).is_err());
    }
}
