use super::direction::Direction;
use ratatui::layout::Position;
use thiserror::Error;

/// A point on the playing field, measured in the same units as
/// [`Grid::width()`] and [`Grid::height()`].  Points produced by the
/// simulation are always multiples of the cell size; a point may lie outside
/// the field only transiently, before boundary handling.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Point {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Point {
    pub(crate) const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// Return the point `distance` units away in direction `dir`
    pub(crate) fn offset(self, dir: Direction, distance: i32) -> Point {
        let (dx, dy) = dir.delta();
        Point {
            x: self.x.saturating_add(dx.saturating_mul(distance)),
            y: self.y.saturating_add(dy.saturating_mul(distance)),
        }
    }
}

/// Geometry of the playing field: a `width` × `height` area divided into
/// square cells with sides of length `cell_size`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Grid {
    /// Create a grid, rejecting dimensions that cannot hold a single cell.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `cell_size` is zero, if either dimension is zero or
    /// smaller than one cell, or if a dimension does not fit in an `i32`.
    pub(crate) fn new(width: u32, height: u32, cell_size: u32) -> Result<Grid, GridError> {
        if cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }
        if width == 0 || height == 0 {
            return Err(GridError::Empty { width, height });
        }
        if width < cell_size || height < cell_size {
            return Err(GridError::SmallerThanCell {
                width,
                height,
                cell_size,
            });
        }
        let conv = |n: u32| i32::try_from(n).map_err(|_| GridError::TooLarge(n));
        Ok(Grid {
            width: conv(width)?,
            height: conv(height)?,
            cell_size: conv(cell_size)?,
        })
    }

    /// Create a grid that is `columns` cells wide and `rows` cells tall
    pub(crate) fn from_cells(columns: u16, rows: u16, cell_size: u32) -> Result<Grid, GridError> {
        let width = u32::from(columns).saturating_mul(cell_size);
        let height = u32::from(rows).saturating_mul(cell_size);
        Grid::new(width, height, cell_size)
    }

    pub(crate) fn width(self) -> i32 {
        self.width
    }

    pub(crate) fn height(self) -> i32 {
        self.height
    }

    pub(crate) fn cell_size(self) -> i32 {
        self.cell_size
    }

    /// Number of whole cells across the field
    pub(crate) fn columns(self) -> i32 {
        self.width / self.cell_size
    }

    /// Number of whole cells down the field
    pub(crate) fn rows(self) -> i32 {
        self.height / self.cell_size
    }

    pub(crate) fn contains(self, p: Point) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// Round `n` down to the nearest multiple of the cell size
    pub(crate) fn snap(self, n: i32) -> i32 {
        n.div_euclid(self.cell_size) * self.cell_size
    }

    /// The top-left corner of the cell at (`column`, `row`)
    pub(crate) fn cell(self, column: i32, row: i32) -> Point {
        Point::new(column * self.cell_size, row * self.cell_size)
    }

    /// Wrap each axis of `p` that has left the field around to the opposite
    /// edge.  Leaving the far edge lands on 0; leaving the near edge lands on
    /// the last whole cell.
    pub(crate) fn wrap(self, p: Point) -> Point {
        Point {
            x: wrap_axis(p.x, self.width, self.cell_size),
            y: wrap_axis(p.y, self.height, self.cell_size),
        }
    }

    /// Return the terminal cell at which the field cell containing `p` is
    /// drawn, relative to the top-left of the field
    pub(crate) fn to_screen(self, p: Point) -> Option<Position> {
        if !self.contains(p) {
            return None;
        }
        let x = u16::try_from(p.x / self.cell_size).ok()?;
        let y = u16::try_from(p.y / self.cell_size).ok()?;
        Some(Position::new(x, y))
    }
}

fn wrap_axis(n: i32, max: i32, cell_size: i32) -> i32 {
    if n >= max {
        0
    } else if n < 0 {
        ((max - 1) / cell_size) * cell_size
    } else {
        n
    }
}

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub(crate) enum GridError {
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("playing field must be nonempty; got {width}x{height}")]
    Empty { width: u32, height: u32 },
    #[error("playing field of {width}x{height} cannot hold a cell of size {cell_size}")]
    SmallerThanCell {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    #[error("playing field dimension {0} is too large")]
    TooLarge(u32),
    #[error("playing field is {columns} cells wide, but the snake needs {needed}")]
    TooSmall { columns: i32, needed: usize },
}
