use serde::Serialize;
use std::collections::BTreeSet;

/// Which rows and columns to pull out of a loaded table.
///
/// The production rules are fixed at build time ([`ExtractionConfig::builtin`]);
/// other values exist for tests and library callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionConfig {
    /// First row position eligible for the filtered set.
    pub start_row: usize,
    /// A row from `start_row` on is kept when this column holds a value.
    pub condition_column: String,
    /// Output columns by position, in output order. Repeats are allowed.
    pub selected_columns: Vec<usize>,
    /// Rows always placed ahead of the filtered rows. Positions past the end are ignored.
    pub always_include_row_positions: BTreeSet<usize>,
}

impl ExtractionConfig {
    pub const START_ROW: usize = 70;
    pub const CONDITION_COLUMN: &'static str = "Unnamed: 9";
    pub const ALWAYS_INCLUDE: [usize; 3] = [1, 2, 3];

    pub fn builtin() -> Self {
        let selected_columns = [9, 35, 37, 130, 134, 104, 105, 80, 81, 82, 83]
            .into_iter()
            .chain(156..=160)
            .chain([150, 151])
            .chain(115..=117)
            .collect();

        Self {
            start_row: Self::START_ROW,
            condition_column: Self::CONDITION_COLUMN.to_string(),
            selected_columns,
            always_include_row_positions: Self::ALWAYS_INCLUDE.into_iter().collect(),
        }
    }
}
