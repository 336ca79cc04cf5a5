pub mod grid;
pub mod output;
pub mod progress;
pub mod prompt;

pub use grid::{GridRenderer, GridStyle};
pub use output::{OutputFormatter, OutputMode};
pub use progress::ProgressManager;
pub use prompt::{parse_command, run_interactive, Command};
