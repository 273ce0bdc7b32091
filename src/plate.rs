use std::fmt;
use std::str::FromStr;

use crate::error::{PlateMapError, PlateMapResult};

pub use kurbo::Point;

/// Number of rows on the plate (letters A-H).
pub const NUM_ROWS: u8 = 8;
/// Number of columns on the plate (numbers 1-12).
pub const NUM_COLS: u8 = 12;

/// Row letters in grid order.
pub const ROW_LETTERS: [char; NUM_ROWS as usize] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// One addressable position on the 8x12 grid, e.g. `A1` or `H12`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WellId {
    row: u8, // 0..NUM_ROWS
    col: u8, // 0..NUM_COLS
}

impl WellId {
    /// Create a well from 0-based row/column indices.
    pub fn new(row: u8, col: u8) -> PlateMapResult<Self> {
        if row >= NUM_ROWS || col >= NUM_COLS {
            return Err(PlateMapError::input(format!(
                "well indices ({row}, {col}) outside the 8x12 grid"
            )));
        }
        Ok(Self { row, col })
    }

    /// 0-based row index (row A = 0).
    pub fn row(self) -> u8 {
        self.row
    }

    /// 0-based column index (column 1 = 0).
    pub fn col(self) -> u8 {
        self.col
    }

    /// Row letter, `A`..`H`.
    pub fn row_letter(self) -> char {
        ROW_LETTERS[self.row as usize]
    }

    /// 1-based column number, `1`..`12`.
    pub fn column_number(self) -> u8 {
        self.col + 1
    }

    /// All 96 wells in row-major order (A1..A12, B1..).
    pub fn all() -> impl Iterator<Item = WellId> {
        (0..NUM_ROWS).flat_map(|row| (0..NUM_COLS).map(move |col| WellId { row, col }))
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.column_number())
    }
}

impl FromStr for WellId {
    type Err = PlateMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let row_letter = chars
            .next()
            .ok_or_else(|| PlateMapError::input("empty well identifier"))?;
        let row = ROW_LETTERS
            .iter()
            .position(|&r| r == row_letter.to_ascii_uppercase())
            .ok_or_else(|| {
                PlateMapError::input(format!("well '{s}': row must be a letter A-H"))
            })?;
        let col: u8 = chars.as_str().parse().map_err(|_| {
            PlateMapError::input(format!("well '{s}': column must be a number 1-12"))
        })?;
        if !(1..=NUM_COLS).contains(&col) {
            return Err(PlateMapError::input(format!(
                "well '{s}': column {col} outside 1-12"
            )));
        }
        Ok(Self {
            row: row as u8,
            col: col - 1,
        })
    }
}

/// Fixed pixel geometry of the rendered plate.
///
/// Dimensions are equivalent to a letter-landscape page at 300 DPI. The grid
/// is centered horizontally and sits 150 px below the vertical center so the
/// title block has room above it.
#[derive(Clone, Copy, Debug)]
pub struct PlateLayout;

impl PlateLayout {
    /// Canvas width in pixels.
    pub const WIDTH: u32 = 3300;
    /// Canvas height in pixels.
    pub const HEIGHT: u32 = 2550;
    /// Well diameter in pixels.
    pub const WELL_DIAMETER: f64 = 210.0;
    /// Gap between adjacent well outlines in pixels.
    pub const WELL_PADDING: f64 = 30.0;
    /// Width of the well outline ring in pixels.
    pub const OUTLINE_WIDTH: f64 = 6.0;
    /// Center-to-center distance between adjacent wells.
    pub const PITCH: f64 = Self::WELL_DIAMETER + Self::WELL_PADDING;

    /// Left edge of the top-left well's bounding box.
    pub const X_START: f64 = (Self::WIDTH as f64 - NUM_COLS as f64 * Self::PITCH) / 2.0;
    /// Top edge of the top-left well's bounding box.
    pub const Y_START: f64 =
        (Self::HEIGHT as f64 - NUM_ROWS as f64 * Self::PITCH) / 2.0 + 150.0;

    /// Row/column index label font size in pixels.
    pub const INDEX_FONT_SIZE: f32 = 90.0;
    /// Well annotation font size in pixels (before auto-shrink).
    pub const ANNOTATION_FONT_SIZE: f32 = 45.0;
    /// Title font size in pixels.
    pub const TITLE_FONT_SIZE: f32 = 120.0;
    /// Subtitle and date stamp font size in pixels.
    pub const SMALL_FONT_SIZE: f32 = 60.0;

    /// Pixel center of `well` on the canvas.
    pub fn well_center(well: WellId) -> Point {
        let x = Self::X_START + f64::from(well.col()) * Self::PITCH + Self::WELL_DIAMETER / 2.0;
        let y = Self::Y_START + f64::from(well.row()) * Self::PITCH + Self::WELL_DIAMETER / 2.0;
        Point::new(x, y)
    }
}
