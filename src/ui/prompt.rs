//! Line-oriented command loop: the terminal stand-in for the open/save buttons.

use crate::CsvExtract;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Show,
    Save(PathBuf),
    Help,
    Quit,
    /// A blank line.
    Nothing,
    MissingArgument(&'static str),
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
Commands:
  open <file.csv>    load a CSV file and extract the result
  show               display the current result
  save <file.xlsx>   save the current result as a workbook
  help               show this help
  quit               leave";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, unquote(rest.trim())),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "open" | "load" | "o" => {
            if rest.is_empty() {
                Command::MissingArgument("open")
            } else {
                Command::Open(PathBuf::from(rest))
            }
        }
        "save" | "s" => {
            if rest.is_empty() {
                Command::MissingArgument("save")
            } else {
                Command::Save(PathBuf::from(rest))
            }
        }
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Paths with spaces may be wrapped in matching quotes.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Runs commands from `input` until `quit` or end of input.
///
/// Failed actions are reported and the loop carries on with the previous result intact.
pub fn run_interactive<R: BufRead>(app: &mut CsvExtract, input: R) -> i32 {
    let show_prompt = app.output_formatter().mode() != crate::OutputMode::Json;
    let mut lines = input.lines();

    loop {
        if show_prompt {
            print!("csvextract> ");
            io::stdout().flush().ok();
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                app.handle_error(&e.into());
                return 1;
            }
            None => break,
        };

        match parse_command(&line) {
            Command::Open(path) => {
                let loaded = app.load_file(&path).map(|_| ());
                if let Err(e) = loaded.and_then(|_| app.show_current()) {
                    app.handle_error(&e);
                }
            }
            Command::Show => {
                if let Err(e) = app.show_current() {
                    app.handle_error(&e);
                }
            }
            Command::Save(path) => {
                if let Err(e) = app.save_result(&path) {
                    app.handle_error(&e);
                }
            }
            Command::Help => println!("{}", HELP_TEXT),
            Command::Quit => break,
            Command::Nothing => {}
            Command::MissingArgument(verb) => app
                .output_formatter()
                .warning(&format!("'{}' needs a file path", verb)),
            Command::Unknown(verb) => app
                .output_formatter()
                .warning(&format!("Unknown command '{}'. Type 'help' for a list.", verb)),
        }
    }

    0
}
