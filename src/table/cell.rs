use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Field texts that count as a missing value, in addition to blank fields.
pub const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single scalar value of a [`super::Table`].
#[derive(Debug, Clone, Default)]
pub enum Cell {
    #[default]
    Empty,
    Integer(i64),
    /// Always finite; negative zero is stored as zero.
    Float(f64),
    Text(String),
}

/// The representation shared by every present field of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    /// The narrowest kind that holds every present field: integers widen to
    /// floats, and a single non-numeric field makes the whole column text.
    pub fn infer<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut kind = ColumnKind::Integer;
        for field in fields.into_iter().filter(|f| !is_missing_field(f)) {
            let trimmed = field.trim();
            if kind == ColumnKind::Integer && trimmed.parse::<i64>().is_ok() {
                continue;
            }
            if parse_float(trimmed).is_some() {
                kind = ColumnKind::Float;
                continue;
            }
            return ColumnKind::Text;
        }
        kind
    }
}

/// Blank, whitespace-only and marker fields are missing in every column kind.
pub fn is_missing_field(field: &str) -> bool {
    field.trim().is_empty() || MISSING_MARKERS.contains(&field)
}

fn parse_float(trimmed: &str) -> Option<f64> {
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(if f == 0.0 { 0.0 } else { f }),
        _ => None,
    }
}

impl Cell {
    /// Converts a raw CSV field of a column of the given kind.
    ///
    /// Text columns keep fields verbatim, so `001` and `1` stay distinct there.
    pub fn parse(field: &str, kind: ColumnKind) -> Self {
        if is_missing_field(field) {
            return Cell::Empty;
        }

        let trimmed = field.trim();
        let typed = match kind {
            ColumnKind::Integer => trimmed.parse::<i64>().ok().map(Cell::Integer),
            ColumnKind::Float => parse_float(trimmed).map(Cell::Float),
            ColumnKind::Text => None,
        };
        typed.unwrap_or_else(|| Cell::Text(field.to_string()))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(n) => Some(*n as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Empty, Cell::Empty) => true,
            (Cell::Integer(a), Cell::Integer(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => a.to_bits() == b.to_bits(),
            (Cell::Text(a), Cell::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Empty => {}
            Cell::Integer(n) => n.hash(state),
            Cell::Float(f) => f.to_bits().hash(state),
            Cell::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Integer(n) => write!(f, "{}", n),
            // Debug keeps the trailing ".0" on integral floats
            Cell::Float(x) => write!(f, "{:?}", x),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Integer(n) => serializer.serialize_i64(*n),
            Cell::Float(x) => serializer.serialize_f64(*x),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}
