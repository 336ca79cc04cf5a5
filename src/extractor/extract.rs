use crate::error::ConfigError;
use crate::extractor::ExtractionConfig;
use crate::table::{Cell, Table};
use serde::Serialize;
use std::collections::HashSet;

/// A selected output column, resolved against a table's header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub label: String,
    pub position: usize,
}

/// Resolves `selected` positions into `(label, position)` pairs, in order.
pub fn resolve_columns(
    table: &Table,
    selected: &[usize],
) -> Result<Vec<ResolvedColumn>, ConfigError> {
    let available = table.column_count();
    selected
        .iter()
        .map(|&position| {
            table
                .columns()
                .get(position)
                .map(|label| ResolvedColumn {
                    label: label.clone(),
                    position,
                })
                .ok_or(ConfigError::ColumnOutOfRange {
                    position,
                    available,
                })
        })
        .collect()
}

/// Row counts observed at each stage of an extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub input_rows: usize,
    pub window_rows: usize,
    pub filtered_rows: usize,
    pub always_included_rows: usize,
    pub duplicates_removed: usize,
    pub output_rows: usize,
}

pub fn extract(table: &Table, config: &ExtractionConfig) -> Result<Table, ConfigError> {
    extract_with_stats(table, config).map(|(result, _)| result)
}

/// Applies the extraction rules to `table`, leaving it untouched.
pub fn extract_with_stats(
    table: &Table,
    config: &ExtractionConfig,
) -> Result<(Table, ExtractionStats), ConfigError> {
    let condition = table.position_of(&config.condition_column).ok_or_else(|| {
        ConfigError::ConditionColumnMissing {
            column: config.condition_column.clone(),
        }
    })?;
    let columns = resolve_columns(table, &config.selected_columns)?;

    let project = |row: &[Cell]| -> Vec<Cell> {
        columns.iter().map(|c| row[c.position].clone()).collect()
    };

    let always_included: Vec<Vec<Cell>> = config
        .always_include_row_positions
        .iter()
        .filter_map(|&position| table.row(position))
        .map(project)
        .collect();

    let window = table.rows().get(config.start_row..).unwrap_or_default();
    let filtered: Vec<Vec<Cell>> = window
        .iter()
        .filter(|row| row[condition].is_present())
        .map(|row| project(row.as_slice()))
        .collect();

    let mut stats = ExtractionStats {
        input_rows: table.row_count(),
        window_rows: window.len(),
        filtered_rows: filtered.len(),
        always_included_rows: always_included.len(),
        ..Default::default()
    };

    let mut result = Table::new(columns.into_iter().map(|c| c.label).collect());
    let mut seen: HashSet<Vec<Cell>> = HashSet::new();

    for row in always_included.into_iter().chain(filtered) {
        if seen.contains(&row) {
            stats.duplicates_removed += 1;
            continue;
        }
        seen.insert(row.clone());
        result.push_row(row);
    }

    stats.output_rows = result.row_count();
    Ok((result, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::Path;

    fn int(n: i64) -> Cell {
        Cell::Integer(n)
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    /// Columns `id`, `flag`, `value`; row i has id i.
    fn sample_table(rows: usize, flagged: &[usize]) -> Table {
        let mut table = Table::new(vec!["id".into(), "flag".into(), "value".into()]);
        for i in 0..rows {
            let flag = if flagged.contains(&i) { text("x") } else { Cell::Empty };
            table.push_row(vec![int(i as i64), flag, int(i as i64 * 10)]);
        }
        table
    }

    fn config(start_row: usize, columns: &[usize], always: &[usize]) -> ExtractionConfig {
        ExtractionConfig {
            start_row,
            condition_column: "flag".to_string(),
            selected_columns: columns.to_vec(),
            always_include_row_positions: always.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    fn ids(table: &Table) -> Vec<Cell> {
        table.rows().iter().map(|r| r[0].clone()).collect()
    }

    #[test]
    fn test_missing_condition_column_is_config_error() {
        let table = Table::from_rows(vec!["a".into()], vec![vec![int(1)]]);
        let err = extract(&table, &config(0, &[0], &[])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ConditionColumnMissing {
                column: "flag".to_string()
            }
        );
    }

    #[test]
    fn test_selected_column_out_of_range_is_config_error() {
        let table = sample_table(5, &[]);
        let err = extract(&table, &config(0, &[0, 3], &[])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ColumnOutOfRange {
                position: 3,
                available: 3
            }
        );
    }

    #[test]
    fn test_output_column_count_matches_selection_including_repeats() {
        let table = sample_table(10, &[5]);
        let result = extract(&table, &config(0, &[2, 0, 2], &[])).unwrap();
        assert_eq!(result.column_count(), 3);
        assert_eq!(result.columns(), &["value", "id", "value"]);
        assert_eq!(result.row(0).unwrap(), &[int(50), int(5), int(50)]);
    }

    #[test]
    fn test_rows_before_start_row_only_come_from_always_include() {
        let table = sample_table(20, &[2, 4, 12, 15]);
        let result = extract(&table, &config(10, &[0], &[])).unwrap();
        assert_eq!(ids(&result), vec![int(12), int(15)]);

        let result = extract(&table, &config(10, &[0], &[4])).unwrap();
        assert_eq!(ids(&result), vec![int(4), int(12), int(15)]);
    }

    #[test]
    fn test_always_included_rows_come_first_in_table_order() {
        let table = sample_table(20, &[11, 13]);
        let result = extract(&table, &config(10, &[0], &[3, 1, 2])).unwrap();
        assert_eq!(ids(&result), vec![int(1), int(2), int(3), int(11), int(13)]);
    }

    #[test]
    fn test_out_of_range_always_include_positions_are_ignored() {
        // Intentional leniency: positions past the end are skipped, not an error.
        let table = sample_table(5, &[4]);
        let result = extract(&table, &config(2, &[0], &[1, 99])).unwrap();
        assert_eq!(ids(&result), vec![int(1), int(4)]);
    }

    #[test]
    fn test_start_row_past_end_yields_only_always_included_rows() {
        let table = sample_table(5, &[0, 1, 2, 3, 4]);
        let (result, stats) = extract_with_stats(&table, &config(100, &[0], &[0])).unwrap();
        assert_eq!(ids(&result), vec![int(0)]);
        assert_eq!(stats.window_rows, 0);
        assert_eq!(stats.filtered_rows, 0);
    }

    #[test]
    fn test_duplicate_of_always_included_row_is_kept_once_in_front() {
        let mut table = sample_table(10, &[]);
        // Row 10 projects to the same values as always-included row 1.
        table.push_row(vec![int(1), text("x"), int(10)]);
        table.push_row(vec![int(99), text("x"), int(990)]);

        let (result, stats) = extract_with_stats(&table, &config(8, &[0, 2], &[1])).unwrap();
        assert_eq!(ids(&result), vec![int(1), int(99)]);
        assert_eq!(stats.duplicates_removed, 1);
    }

    #[test]
    fn test_duplicates_among_filtered_rows_are_removed() {
        let table = Table::from_rows(
            vec!["flag".into(), "v".into()],
            vec![
                vec![text("x"), Cell::Empty],
                vec![text("x"), Cell::Empty],
                vec![text("y"), Cell::Empty],
                vec![text("x"), Cell::Empty],
            ],
        );
        let result = extract(&table, &config(0, &[0, 1], &[])).unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.row(0).unwrap(), &[text("x"), Cell::Empty]);
        assert_eq!(result.row(1).unwrap(), &[text("y"), Cell::Empty]);
    }

    #[test]
    fn test_projection_decides_duplicates() {
        // Rows differ only in a column that is not selected.
        let table = sample_table(6, &[3, 4]);
        let result = extract(&table, &config(0, &[1], &[])).unwrap();
        assert_eq!(result.row_count(), 1);
    }

    #[test]
    fn test_extraction_is_idempotent_and_leaves_input_untouched() {
        let table = sample_table(30, &[1, 22, 25, 27]);
        let before = table.clone();
        let rules = config(20, &[2, 1, 0], &[1, 2, 3]);

        let first = extract(&table, &rules).unwrap();
        let second = extract(&table, &rules).unwrap();

        assert_eq!(first, second);
        assert_eq!(table, before);
    }

    #[test]
    fn test_leading_zeros_survive_in_text_columns() {
        let table = crate::loader::parse_csv("flag,code\nx,001\nx,ABC\nx,1\n", Path::new("t.csv"))
            .unwrap();
        let result = extract(&table, &config(0, &[1], &[])).unwrap();
        assert_eq!(ids(&result), vec![text("001"), text("ABC"), text("1")]);
    }

    #[test]
    fn test_equal_numbers_in_a_float_column_are_duplicates() {
        let table =
            crate::loader::parse_csv("flag,v\nx,1\nx,1.0\nx,\n", Path::new("t.csv")).unwrap();
        let (result, stats) = extract_with_stats(&table, &config(0, &[1], &[])).unwrap();
        assert_eq!(ids(&result), vec![Cell::Float(1.0), Cell::Empty]);
        assert_eq!(stats.duplicates_removed, 1);
    }

    #[test]
    fn test_resolve_columns_keeps_order_and_labels() {
        let table = sample_table(1, &[]);
        let resolved = resolve_columns(&table, &[2, 0, 2]).unwrap();
        let labels: Vec<&str> = resolved.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["value", "id", "value"]);
        assert_eq!(resolved[1].position, 0);
    }
}
