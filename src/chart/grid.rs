//! 4x4 grid addressing and the panel transforms applied by play modes.

/// Cells per side of the panel grid.
pub const GRID_SIDE: u8 = 4;
/// Total cells of the panel grid.
pub const GRID_CELLS: usize = (GRID_SIDE * GRID_SIDE) as usize;

/// A cell of the 4x4 panel grid. Always within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    row: u8,
    col: u8,
}

impl GridPos {
    /// The top-left cell.
    pub const MIN: Self = Self { row: 0, col: 0 };

    /// Creates a position when both `row` and `col` are in `0..4`.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < GRID_SIDE && col < GRID_SIDE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Creates a position from a linear cell index in `0..16`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < GRID_CELLS {
            Some(Self {
                row: (index / GRID_SIDE as usize) as u8,
                col: (index % GRID_SIDE as usize) as u8,
            })
        } else {
            None
        }
    }

    /// The row of the cell, in `0..4`.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// The column of the cell, in `0..4`.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The linear cell index `row * 4 + col`, in `0..16`.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.row * GRID_SIDE + self.col) as usize
    }

    /// This cell rotated around the panel center.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        let last = GRID_SIDE - 1;
        match rotation {
            Rotation::Deg0 => self,
            Rotation::Deg90 => Self {
                row: last - self.col,
                col: self.row,
            },
            Rotation::Deg180 => Self {
                row: last - self.row,
                col: last - self.col,
            },
            Rotation::Deg270 => Self {
                row: self.col,
                col: last - self.row,
            },
        }
    }

    /// This cell moved to the row of `other`, keeping its column.
    #[must_use]
    pub const fn with_row_of(self, other: Self) -> Self {
        Self {
            row: other.row,
            col: self.col,
        }
    }

    /// This cell moved to the column of `other`, keeping its row.
    #[must_use]
    pub const fn with_col_of(self, other: Self) -> Self {
        Self {
            row: self.row,
            col: other.col,
        }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rotation of the panel by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    /// Identity.
    #[default]
    Deg0,
    /// Quarter turn counting rows downward.
    Deg90,
    /// Half turn.
    Deg180,
    /// Three-quarter turn.
    Deg270,
}

impl Rotation {
    /// Maps an angle in degrees onto a rotation. Any multiple of 90 is
    /// accepted; other angles round down to the next lower quarter turn,
    /// which mirrors how play modes pass `90 * k`.
    #[must_use]
    pub const fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) / 90 {
            1 => Self::Deg90,
            2 => Self::Deg180,
            3 => Self::Deg270,
            _ => Self::Deg0,
        }
    }
}

/// A caller-supplied permutation of all 16 cells, used by shuffle play modes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMap([GridPos; GRID_CELLS]);

impl CellMap {
    /// Creates a map when `table` is a permutation (every cell appears once).
    #[must_use]
    pub fn new(table: [GridPos; GRID_CELLS]) -> Option<Self> {
        let mut seen = [false; GRID_CELLS];
        for pos in &table {
            if std::mem::replace(&mut seen[pos.index()], true) {
                return None;
            }
        }
        Some(Self(table))
    }

    /// The identity map.
    #[must_use]
    pub fn identity() -> Self {
        let mut table = [GridPos { row: 0, col: 0 }; GRID_CELLS];
        for (index, slot) in table.iter_mut().enumerate() {
            *slot = GridPos {
                row: (index / GRID_SIDE as usize) as u8,
                col: (index % GRID_SIDE as usize) as u8,
            };
        }
        Self(table)
    }

    /// Where the map sends `pos`.
    #[must_use]
    pub const fn apply(&self, pos: GridPos) -> GridPos {
        self.0[pos.index()]
    }
}

/// A pair of row/column permutations, used by the row-column shuffle mode.
/// Unlike [`CellMap`], it always keeps hold note shapes valid: cells sharing
/// a row or column still share one after the remap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisMap {
    rows: [u8; GRID_SIDE as usize],
    cols: [u8; GRID_SIDE as usize],
}

impl AxisMap {
    /// Creates a map when both `rows` and `cols` are permutations of `0..4`.
    #[must_use]
    pub fn new(rows: [u8; GRID_SIDE as usize], cols: [u8; GRID_SIDE as usize]) -> Option<Self> {
        fn is_permutation(axis: &[u8; GRID_SIDE as usize]) -> bool {
            let mut seen = [false; GRID_SIDE as usize];
            axis.iter().all(|&v| {
                (v as usize) < seen.len() && !std::mem::replace(&mut seen[v as usize], true)
            })
        }
        (is_permutation(&rows) && is_permutation(&cols)).then_some(Self { rows, cols })
    }

    /// Where the map sends `pos`.
    #[must_use]
    pub const fn apply(&self, pos: GridPos) -> GridPos {
        GridPos {
            row: self.rows[pos.row as usize],
            col: self.cols[pos.col as usize],
        }
    }
}
