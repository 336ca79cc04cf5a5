use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::table::{Cell, Table};
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{
    ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet, XlsxError,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const XLSX_EXTENSION: &str = "xlsx";

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub sheet_name: String,
    pub rows: usize,
    pub columns: usize,
    pub duration: Duration,
    pub saved_at: DateTime<Utc>,
}

/// Writes a [`Table`] to a single-sheet workbook: header row first, no index column.
pub struct XlsxExporter {
    sheet_name: String,
    bold_header: bool,
    autofit: bool,
}

impl XlsxExporter {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            sheet_name: config.sheet_name.clone(),
            bold_header: config.bold_header,
            autofit: config.autofit,
        }
    }

    pub fn export(&self, table: &Table, path: &Path) -> Result<ExportReport, ExportError> {
        let start_time = Instant::now();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ExportError::MissingDirectory {
                    path: parent.to_path_buf(),
                });
            }
        }

        let workbook_error = |source: XlsxError| ExportError::Workbook {
            path: path.to_path_buf(),
            source,
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook
            .add_worksheet()
            .set_name(&self.sheet_name)
            .map_err(workbook_error)?;

        self.write_table(worksheet, table).map_err(workbook_error)?;

        if self.autofit {
            worksheet.autofit();
        }

        workbook.save(path).map_err(workbook_error)?;

        Ok(ExportReport {
            path: path.to_path_buf(),
            sheet_name: self.sheet_name.clone(),
            rows: table.row_count(),
            columns: table.column_count(),
            duration: start_time.elapsed(),
            saved_at: Utc::now(),
        })
    }

    fn write_table(&self, worksheet: &mut Worksheet, table: &Table) -> Result<(), XlsxError> {
        let header_format = if self.bold_header {
            Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
        } else {
            Format::new()
        };

        for (col, label) in table.columns().iter().enumerate() {
            worksheet.write_string_with_format(0, to_col(col)?, label.as_str(), &header_format)?;
        }

        for (index, row) in table.rows().iter().enumerate() {
            let row_num = to_row(index + 1)?;
            for (col, cell) in row.iter().enumerate() {
                let col_num = to_col(col)?;
                match cell {
                    Cell::Empty => {}
                    Cell::Integer(_) | Cell::Float(_) => {
                        if let Some(n) = cell.as_f64() {
                            worksheet.write_number(row_num, col_num, n)?;
                        }
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(row_num, col_num, s.as_str())?;
                    }
                }
            }
        }

        Ok(())
    }
}

fn to_row(index: usize) -> Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn to_col(index: usize) -> Result<ColNum, XlsxError> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Appends `.xlsx` when `path` has no extension.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(XLSX_EXTENSION)
    }
}
