use crate::error::{GameError, Result};

/// A cell on the arena grid, addressed as (row, col) from the arena's top-left
/// border corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset as (d_row, d_col)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Bordered playing field. The interior spans rows `1..=height-2` and columns
/// `1..=width-2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    height: u16,
    width: u16,
}

impl Arena {
    pub fn new(height: u16, width: u16) -> Result<Self> {
        let interior_cells =
            u32::from(height.saturating_sub(2)) * u32::from(width.saturating_sub(2));

        if interior_cells < 2 {
            return Err(GameError::ArenaTooSmall { height, width });
        }

        Ok(Self { height, width })
    }

    /// Arena for a terminal of the given size, inset two cells on every side.
    pub fn for_terminal(term_height: u16, term_width: u16) -> Result<Self> {
        Self::new(term_height.saturating_sub(4), term_width.saturating_sub(4))
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn max_row(&self) -> u16 {
        self.height - 2
    }

    pub fn max_col(&self) -> u16 {
        self.width - 2
    }

    pub fn center(&self) -> Position {
        Position::new(self.height / 2, self.width / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (1..=self.max_row()).contains(&pos.row) && (1..=self.max_col()).contains(&pos.col)
    }

    /// Clamps a signed (row, col) pair into the interior, one axis at a time.
    pub fn clamp(&self, row: i32, col: i32) -> Position {
        Position {
            row: row.clamp(1, i32::from(self.max_row())) as u16,
            col: col.clamp(1, i32::from(self.max_col())) as u16,
        }
    }

    /// Moves `from` one cell towards `direction`, stopping at the border.
    pub fn step(&self, from: Position, direction: Direction) -> Position {
        let (d_row, d_col) = direction.delta();
        self.clamp(i32::from(from.row) + d_row, i32::from(from.col) + d_col)
    }

    /// Interior cells in row-major order.
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        (1..=self.max_row())
            .flat_map(move |row| (1..=self.max_col()).map(move |col| Position::new(row, col)))
    }
}
