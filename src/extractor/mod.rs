pub mod extract;
pub mod rules;

pub use extract::{extract, extract_with_stats, resolve_columns, ExtractionStats, ResolvedColumn};
pub use rules::ExtractionConfig;
