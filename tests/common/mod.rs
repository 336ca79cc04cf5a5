#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Wide enough for every column the built-in rules select.
pub const COLUMNS: usize = 170;

/// Header with blanks at positions 9 and 35 and a repeated `qty` at 130 and 134.
pub fn header() -> Vec<String> {
    (0..COLUMNS)
        .map(|c| match c {
            9 | 35 => String::new(),
            130 | 134 => "qty".to_string(),
            _ => format!("c{}", c),
        })
        .collect()
}

/// Data row `r`: column 9 is filled only when `flagged`; column 35 holds the number `r`.
pub fn data_row(r: usize, flagged: bool) -> Vec<String> {
    (0..COLUMNS)
        .map(|c| match c {
            9 if flagged => format!("r{}c9", r),
            9 => String::new(),
            35 => r.to_string(),
            _ => format!("r{}c{}", r, c),
        })
        .collect()
}

pub fn rows(count: usize, flagged: &[usize]) -> Vec<Vec<String>> {
    (0..count)
        .map(|r| data_row(r, flagged.contains(&r)))
        .collect()
}

pub fn to_csv(header: &[String], rows: &[Vec<String>]) -> String {
    let mut text = header.join(",");
    text.push('\n');
    for row in rows {
        text.push_str(&row.join(","));
        text.push('\n');
    }
    text
}

/// 101 data rows (0..=100); column 9 filled in rows 1 and 50 and five rows from 70 on.
pub fn standard_csv() -> String {
    to_csv(&header(), &rows(101, &STANDARD_FLAGGED))
}

pub const STANDARD_FLAGGED: [usize; 7] = [1, 50, 72, 75, 80, 90, 99];

pub fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Parses JSON-lines output and returns the first object of the given `type`.
pub fn json_object(stdout: &[u8], kind: &str) -> Option<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .find(|value| value["type"] == kind)
}
