//! Structural measurements of a settled grid.
//!
//! All metrics are computed in one pass over rows and one pass over columns
//! of a grid that has already been melted (see
//! [`BitGrid::compact_into`](gatris_engine::BitGrid::compact_into)).
//!
//! - **Row transitions**: occupied/empty changes scanning each row left to
//!   right, with an occupied cell assumed before column 0 and an empty one
//!   after the last column.
//! - **Column transitions**: the same scanning each column top to bottom,
//!   with empty cells assumed above row 0 and below the last row.
//! - **Holes**: per column, empty cells below the topmost occupied cell.
//! - **Well sums**: per column, each maximal vertical run of empty cells
//!   whose neighbours are occupied at every depth (edge columns need only
//!   their single neighbour) adds `k(k+1)/2` for a run of length `k`.

use gatris_engine::BitGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardMetrics {
    pub row_transitions: usize,
    pub column_transitions: usize,
    pub holes: usize,
    pub well_sums: usize,
}

impl BoardMetrics {
    #[must_use]
    pub fn from_grid(grid: &BitGrid) -> Self {
        let mut metrics = Self {
            row_transitions: row_transitions(grid),
            ..Self::default()
        };
        for x in 0..grid.width() {
            metrics.add_column(grid, x);
        }
        metrics
    }

    fn add_column(&mut self, grid: &BitGrid, x: usize) {
        let width = grid.width();
        let height = grid.height();
        let cell_at = |row: u32, x: usize| (row >> x) & 1 != 0;

        let mut last = false;
        let mut top = None;
        let mut cells = 0;
        let mut well = 0;

        for (y, &row) in grid.rows().iter().enumerate() {
            let cell = cell_at(row, x);
            if cell != last {
                self.column_transitions += 1;
            }
            last = cell;

            let left_filled = x == 0 || cell_at(row, x - 1);
            let right_filled = x == width - 1 || cell_at(row, x + 1);
            if !cell && left_filled && right_filled {
                well += 1;
            } else if well > 0 {
                self.well_sums += triangular(well);
                well = 0;
            }

            if cell {
                cells += 1;
                top.get_or_insert(y);
            }
        }

        if well > 0 {
            self.well_sums += triangular(well);
        }
        if let Some(top) = top {
            self.holes += height - top - cells;
        }
        if !last {
            self.column_transitions += 1;
        }
    }
}

fn row_transitions(grid: &BitGrid) -> usize {
    let width = grid.width();
    grid.rows()
        .iter()
        .map(|&row| {
            // Wall on the left, open space on the right.
            let bordered = (row << 1) | 1;
            let changes = (bordered ^ (bordered >> 1)) & ((1 << width) - 1);
            let trailing_empty = usize::from((row >> (width - 1)) & 1 == 0);
            changes.count_ones() as usize + trailing_empty
        })
        .sum()
}

fn triangular(k: usize) -> usize {
    k * (k + 1) / 2
}
