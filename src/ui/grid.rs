//! Terminal grid rendering of a result table.

use crate::config::DisplayConfig;
use crate::table::{Cell, Table};
use console::{measure_text_width, pad_str, style, truncate_str, Alignment};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    /// Box-drawing borders.
    Unicode,
    Ascii,
}

struct Borders {
    horizontal: char,
    vertical: char,
    top: [char; 3],
    middle: [char; 3],
    bottom: [char; 3],
}

const UNICODE_BORDERS: Borders = Borders {
    horizontal: '─',
    vertical: '│',
    top: ['┌', '┬', '┐'],
    middle: ['├', '┼', '┤'],
    bottom: ['└', '┴', '┘'],
};

const ASCII_BORDERS: Borders = Borders {
    horizontal: '-',
    vertical: '|',
    top: ['+', '+', '+'],
    middle: ['+', '+', '+'],
    bottom: ['+', '+', '+'],
};

/// Light blue shading for every other row.
const ZEBRA_COLOR: u8 = 195;

pub struct GridRenderer {
    grid_style: GridStyle,
    max_column_width: usize,
    max_rows: usize,
    zebra_stripes: bool,
    use_colors: bool,
}

impl GridRenderer {
    pub fn new(grid_style: GridStyle, use_colors: bool) -> Self {
        Self::from_config(&DisplayConfig::default(), grid_style, use_colors)
    }

    pub fn from_config(config: &DisplayConfig, grid_style: GridStyle, use_colors: bool) -> Self {
        Self {
            grid_style,
            max_column_width: config.max_column_width.max(1),
            max_rows: config.max_rows,
            zebra_stripes: config.zebra_stripes,
            use_colors,
        }
    }

    /// Renders `table` into printable lines, including borders and an overflow footer.
    pub fn render(&self, table: &Table) -> Vec<String> {
        let borders = match self.grid_style {
            GridStyle::Unicode => &UNICODE_BORDERS,
            GridStyle::Ascii => &ASCII_BORDERS,
        };

        let shown = if self.max_rows == 0 {
            table.rows()
        } else {
            &table.rows()[..table.row_count().min(self.max_rows)]
        };

        let widths = self.column_widths(table, shown);
        let mut lines = Vec::with_capacity(shown.len() + 4);

        lines.push(rule(borders, borders.top, &widths));

        let header: Vec<String> = table.columns().iter().map(|c| display_text(c)).collect();
        let header_line = self.format_row(borders, &header, &widths);
        lines.push(if self.use_colors {
            style(header_line).bold().to_string()
        } else {
            header_line
        });

        lines.push(rule(borders, borders.middle, &widths));

        for (index, row) in shown.iter().enumerate() {
            let values: Vec<String> = row.iter().map(cell_text).collect();
            let line = self.format_row(borders, &values, &widths);
            if self.use_colors && self.zebra_stripes && index % 2 == 0 {
                lines.push(style(line).black().on_color256(ZEBRA_COLOR).to_string());
            } else {
                lines.push(line);
            }
        }

        lines.push(rule(borders, borders.bottom, &widths));

        let hidden = table.row_count() - shown.len();
        if hidden > 0 {
            lines.push(format!(
                "… {} more row{}",
                hidden,
                if hidden == 1 { "" } else { "s" }
            ));
        }

        lines
    }

    /// Width per column: the wider of label and longest value, capped.
    fn column_widths(&self, table: &Table, rows: &[Vec<Cell>]) -> Vec<usize> {
        table
            .columns()
            .iter()
            .enumerate()
            .map(|(col, label)| {
                let widest_value = rows
                    .iter()
                    .map(|row| measure_text_width(&cell_text(&row[col])))
                    .max()
                    .unwrap_or(0);
                measure_text_width(&display_text(label))
                    .max(widest_value)
                    .clamp(1, self.max_column_width)
            })
            .collect()
    }

    fn format_row(&self, borders: &Borders, values: &[String], widths: &[usize]) -> String {
        let mut line = String::new();
        line.push(borders.vertical);
        for (value, &width) in values.iter().zip(widths) {
            let fitted = if measure_text_width(value) > width {
                truncate_str(value, width, "…")
            } else {
                Cow::Borrowed(value.as_str())
            };
            line.push(' ');
            line.push_str(&pad_str(&fitted, width, Alignment::Center, None));
            line.push(' ');
            line.push(borders.vertical);
        }
        line
    }
}

fn rule(borders: &Borders, corners: [char; 3], widths: &[usize]) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|w| borders.horizontal.to_string().repeat(w + 2))
        .collect();
    format!(
        "{}{}{}",
        corners[0],
        segments.join(&corners[1].to_string()),
        corners[2]
    )
}

/// Missing values render as an empty cell.
fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => display_text(s),
        other => other.to_string(),
    }
}

fn display_text(s: &str) -> String {
    s.replace(['\r', '\n', '\t'], " ")
}
