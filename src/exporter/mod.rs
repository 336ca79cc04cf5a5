pub mod xlsx;

pub use xlsx::{with_default_extension, ExportReport, XlsxExporter, XLSX_EXTENSION};
