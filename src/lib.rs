pub mod cli;
pub mod config;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod loader;
pub mod session;
pub mod table;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, DisplayConfig, ExportConfig};
pub use error::{ConfigError, CsvExtractError, ExportError, LoadError, Result, UserFriendlyError};

// Core functionality re-exports
pub use exporter::{ExportReport, XlsxExporter};
pub use extractor::{extract, extract_with_stats, ExtractionConfig, ExtractionStats};
pub use loader::{CsvLoader, LoadedTable, SourceEncoding};
pub use session::{ExtractionOutcome, Session};
pub use table::{Cell, ColumnKind, Table};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use chrono::Utc;
use std::path::Path;

/// Application controller: owns the settings, the output and the current result.
///
/// Actions run one at a time. A failed action reports its error and leaves the
/// current result as it was.
pub struct CsvExtract {
    config: Config,
    rules: ExtractionConfig,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    session: Session,
}

impl CsvExtract {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);

        Self {
            config,
            rules: ExtractionConfig::builtin(),
            output_formatter,
            progress_manager,
            session: Session::new(),
        }
    }

    /// Create CsvExtract instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet))
    }

    /// Loads `path`, extracts it and makes the result current.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&ExtractionOutcome> {
        let path = path.as_ref();
        self.output_formatter
            .start_operation(&format!("Loading {}", path.display()));

        let spinner = self
            .progress_manager
            .create_spinner(&format!("Reading {}", path.display()));
        let loaded = CsvLoader::new()
            .with_required_column(self.rules.condition_column.as_str())
            .load(path);
        ui::progress::finish_spinner(&spinner);
        let loaded = loaded?;

        self.output_formatter.debug(&format!(
            "Decoded as {}: {} rows x {} columns",
            loaded.encoding,
            loaded.table.row_count(),
            loaded.table.column_count()
        ));

        let (table, stats) = extract_with_stats(&loaded.table, &self.rules)?;

        let outcome = ExtractionOutcome {
            source: loaded.path,
            encoding: loaded.encoding,
            stats,
            table,
            loaded_at: Utc::now(),
        };

        let outcome = self.session.replace(outcome);
        self.output_formatter.print_load_summary(outcome);
        Ok(outcome)
    }

    /// Displays the current result.
    pub fn show_current(&self) -> Result<()> {
        let outcome = self.session.require_current()?;
        self.output_formatter
            .print_table(&outcome.table, &self.config.display);
        Ok(())
    }

    /// Writes the current result to `path` (`.xlsx` is appended when there is no extension).
    pub fn save_result<P: AsRef<Path>>(&self, path: P) -> Result<ExportReport> {
        let outcome = self.session.require_current()?;
        let path = exporter::with_default_extension(path.as_ref());

        self.output_formatter
            .start_operation(&format!("Saving {}", path.display()));

        let spinner = self
            .progress_manager
            .create_spinner(&format!("Writing {}", path.display()));
        let report = XlsxExporter::from_config(&self.config.export).export(&outcome.table, &path);
        ui::progress::finish_spinner(&spinner);
        let report = report?;

        self.output_formatter.print_export_report(&report);
        Ok(report)
    }

    /// Generate sample settings file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &CsvExtractError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
