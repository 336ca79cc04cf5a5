use crate::config::DisplayConfig;
use crate::error::{CsvExtractError, UserFriendlyError};
use crate::exporter::ExportReport;
use crate::session::ExtractionOutcome;
use crate::table::Table;
use crate::ui::grid::{GridRenderer, GridStyle};
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static FOLDER: Emoji = Emoji("📂 ", "> ");
static FLOPPY: Emoji = Emoji("💾 ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => eprintln!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", FOLDER, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &CsvExtractError) {
        let user_message = error.user_message();

        // Saving before loading is a warning, not a failure
        if matches!(error, CsvExtractError::NoData) {
            self.warning(&user_message);
        } else {
            self.error(&user_message);
        }

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    // Summary and reporting
    pub fn print_load_summary(&self, outcome: &ExtractionOutcome) {
        if !self.should_show_message(0) {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                let mut summary = serde_json::to_value(outcome).unwrap_or_default();
                if let Some(obj) = summary.as_object_mut() {
                    obj.insert("type".to_string(), serde_json::json!("load_summary"));
                }
                self.print_json_object(&summary);
            }
            _ => {
                self.success(&format!(
                    "Loaded {}: {} rows extracted ({} encoding)",
                    outcome.source.display(),
                    outcome.stats.output_rows,
                    outcome.encoding
                ));
                self.debug(&format!(
                    "{} input rows, {} from the start row, {} matched, {} always included, {} duplicates removed",
                    outcome.stats.input_rows,
                    outcome.stats.window_rows,
                    outcome.stats.filtered_rows,
                    outcome.stats.always_included_rows,
                    outcome.stats.duplicates_removed
                ));
            }
        }
    }

    pub fn print_export_report(&self, report: &ExportReport) {
        if !self.should_show_message(0) {
            return;
        }

        match self.mode {
            OutputMode::Json => {
                let mut value = serde_json::to_value(report).unwrap_or_default();
                if let Some(obj) = value.as_object_mut() {
                    obj.insert("type".to_string(), serde_json::json!("export_report"));
                }
                self.print_json_object(&value);
            }
            OutputMode::Human if self.use_colors => {
                println!(
                    "{}{} {}",
                    FLOPPY,
                    style("Saved").green().bold(),
                    style(report.path.display()).cyan()
                );
                self.info(&format!(
                    "{} rows x {} columns to sheet '{}' in {}",
                    report.rows,
                    report.columns,
                    report.sheet_name,
                    format_duration(report.duration)
                ));
            }
            _ => {
                self.success(&format!("Saved {}", report.path.display()));
                self.info(&format!(
                    "{} rows x {} columns to sheet '{}' in {}",
                    report.rows,
                    report.columns,
                    report.sheet_name,
                    format_duration(report.duration)
                ));
            }
        }
    }

    /// Prints the table itself. This is the program's data output, so quiet mode keeps it.
    pub fn print_table(&self, table: &Table, display: &DisplayConfig) {
        match self.mode {
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "table",
                    "columns": table.columns(),
                    "rows": table.rows(),
                }));
            }
            OutputMode::Human | OutputMode::Plain => {
                if !display.show_grid {
                    return;
                }
                let grid_style = match self.mode {
                    OutputMode::Human => GridStyle::Unicode,
                    _ => GridStyle::Ascii,
                };
                let renderer = GridRenderer::from_config(display, grid_style, self.use_colors);
                for line in renderer.render(table) {
                    println!("{}", line);
                }
            }
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error | MessageType::Warning => {
                    eprintln!("{}{}", emoji, color_fn(message))
                }
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error | MessageType::Warning => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
