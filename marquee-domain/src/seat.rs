use serde::{Deserialize, Serialize};

/// Rows are addressed by a single letter, so a grid never has more than 26.
pub const MAX_ROWS: u8 = 26;

/// One seat position in a showing's grid.
///
/// Rows are 0-based internally and rendered as a letter (`0` ⇒ `a`);
/// columns are 1-based, matching the token form customers type (`"b3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seat {
    pub row: u8,
    pub col: u32,
}

impl Seat {
    /// Parse a canonical seat token: one row letter followed by the column
    /// number. Case-insensitive on the letter; leading zeros in the column
    /// are rejected so every seat has exactly one token form.
    pub fn parse(token: &str) -> Option<Seat> {
        let mut chars = token.chars();
        let row_ch = chars.next()?;
        if !row_ch.is_ascii_alphabetic() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') {
            return None;
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let col: u32 = digits.parse().ok()?;
        let row = row_ch.to_ascii_lowercase() as u8 - b'a';
        Some(Seat { row, col })
    }

    /// Canonical lowercase token for this seat, e.g. `"b3"`.
    pub fn token(&self) -> String {
        format!("{}{}", (b'a' + self.row) as char, self.col)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Seat grid needs at least one row and one column")]
    Empty,

    #[error("Row count {0} exceeds the single-letter limit of 26")]
    TooManyRows(u8),
}

/// Dimensions of a showing's seat grid. Every showing currently uses the
/// default 4×5 arrangement; the dimensions are configuration, not constants.
///
/// Deserialization goes through [`SeatGrid::new`], so a config cannot
/// smuggle in an empty grid or more rows than letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridDimensions")]
pub struct SeatGrid {
    rows: u8,
    cols: u32,
}

/// Raw config form of [`SeatGrid`], validated on conversion.
#[derive(Debug, Deserialize)]
struct GridDimensions {
    #[serde(default = "default_rows")]
    rows: u8,
    #[serde(default = "default_cols")]
    cols: u32,
}

impl TryFrom<GridDimensions> for SeatGrid {
    type Error = GridError;

    fn try_from(dims: GridDimensions) -> Result<SeatGrid, GridError> {
        SeatGrid::new(dims.rows, dims.cols)
    }
}

fn default_rows() -> u8 {
    4
}

fn default_cols() -> u32 {
    5
}

impl Default for SeatGrid {
    fn default() -> Self {
        SeatGrid {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

impl SeatGrid {
    pub fn new(rows: u8, cols: u32) -> Result<SeatGrid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if rows > MAX_ROWS {
            return Err(GridError::TooManyRows(rows));
        }
        Ok(SeatGrid { rows, cols })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn capacity(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn contains(&self, seat: &Seat) -> bool {
        seat.row < self.rows && seat.col >= 1 && seat.col <= self.cols
    }

    /// All seats of the grid in row-major order (`a1`, `a2`, .., `d5`).
    pub fn seats(self) -> impl Iterator<Item = Seat> {
        (0..self.rows).flat_map(move |row| (1..=self.cols).map(move |col| Seat { row, col }))
    }
}
