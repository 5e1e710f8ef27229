/// A single cell value as read from a spreadsheet
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Date/time rendered by the loader (ISO-8601 where possible)
    DateTime(String),
    /// Spreadsheet error value such as `#N/A`
    Error(String),
}

impl Cell {
    /// Convert the cell to trimmed text.
    ///
    /// Returns `None` for empty cells and for cells whose text is blank.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text = match self {
            Self::Empty => return None,
            Self::Text(s) | Self::DateTime(s) | Self::Error(s) => s.trim().to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => format_float(*f),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
        };

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// True if the cell holds a truthy value.
    ///
    /// Any non-empty string counts, whitespace included. Zero and `FALSE`
    /// do not.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Text(s) | Self::DateTime(s) | Self::Error(s) => !s.is_empty(),
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Bool(b) => *b,
        }
    }
}

/// Whole numbers stored as floats (the usual case in spreadsheets) print without a fraction
#[allow(clippy::cast_possible_truncation)]
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Text(s)
        }
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

/// An in-memory worksheet: ordered rows of ordered cells.
///
/// Rows may have different lengths. Row 0 is the first row of the sheet
/// (row 1 as shown to users).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Worksheet name, when the source format has one
    pub name: Option<String>,

    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    #[must_use]
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { name: None, rows }
    }

    /// Build a sheet from rows of text; empty strings become empty cells.
    pub fn from_text_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|c| Cell::from(Into::<String>::into(c)))
                    .collect()
            })
            .collect();
        Self::new(rows)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by 0-based index
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Get a cell by 0-based row and column; `None` if either is out of range
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
