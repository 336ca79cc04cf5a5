use clap::Parser;
use csvextract::{
    Cli, ConfigError, CsvExtract, CsvExtractError, LoadError, OutputFormatter, OutputMode,
    UserFriendlyError,
};
use std::io;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let mut app = match CsvExtract::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.interactive {
        return handle_interactive(&cli, &mut app);
    }

    let Some(ref input) = cli.input else {
        app.handle_error(&CsvExtractError::NoData);
        return exit_code_for(&CsvExtractError::NoData);
    };

    let loaded = app.load_file(input).map(|_| ());
    if let Err(e) = loaded.and_then(|_| app.show_current()) {
        app.handle_error(&e);
        return exit_code_for(&e);
    }

    if let Some(ref save_path) = cli.save {
        if let Err(e) = app.save_result(save_path) {
            app.handle_error(&e);
            return exit_code_for(&e);
        }
    }

    0
}

fn handle_interactive(cli: &Cli, app: &mut CsvExtract) -> i32 {
    let formatter = app.output_formatter();
    formatter.info(&format!("csvextract {}", csvextract::version_info()));
    if formatter.mode() != OutputMode::Json {
        formatter.info("Type 'help' for a list of commands");
    }

    // A file given on the command line is opened before the first prompt
    if let Some(ref input) = cli.input {
        let loaded = app.load_file(input).map(|_| ());
        if let Err(e) = loaded.and_then(|_| app.show_current()) {
            app.handle_error(&e);
        }
    }

    let stdin = io::stdin();
    csvextract::ui::run_interactive(app, stdin.lock())
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "csvextract.toml".to_string());

    match CsvExtract::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample settings file: {}", config_path);
            println!("\nTo use these settings:");
            println!("  csvextract <file.csv> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate settings file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn exit_code_for(error: &CsvExtractError) -> i32 {
    match error {
        CsvExtractError::Settings { .. } => 2,
        CsvExtractError::Load(LoadError::MissingColumn { .. }) => 4,
        CsvExtractError::Load(_) => 3,
        CsvExtractError::Config(ConfigError::ConditionColumnMissing { .. })
        | CsvExtractError::Config(ConfigError::ColumnOutOfRange { .. }) => 4,
        CsvExtractError::Export(_) => 5,
        CsvExtractError::NoData => 6,
        CsvExtractError::Io(_) => 1,
    }
}

fn print_startup_error(error: &CsvExtractError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvextract::cli::OutputFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cli(config: Option<PathBuf>) -> Cli {
        Cli {
            input: None,
            save: None,
            interactive: false,
            config,
            output_format: OutputFormat::Plain,
            max_width: None,
            max_rows: None,
            no_grid: false,
            sheet_name: None,
            verbose: 0,
            quiet: true,
            generate_config: true,
        }
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let exit_code = handle_generate_config(&cli(Some(config_path.clone())));
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[display]"));
    }

    #[test]
    fn test_generate_config_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("missing").join("test.toml");

        assert_eq!(handle_generate_config(&cli(Some(config_path))), 1);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&CsvExtractError::NoData), 6);
        assert_eq!(
            exit_code_for(&CsvExtractError::Load(LoadError::Undecodable {
                path: PathBuf::from("x.csv")
            })),
            3
        );
        assert_eq!(
            exit_code_for(&CsvExtractError::Config(ConfigError::ColumnOutOfRange {
                position: 160,
                available: 10
            })),
            4
        );
    }
}
