use std::{fmt, iter};

use arrayvec::ArrayVec;

use super::{BoardConfig, MAX_BOARD_HEIGHT, RotationShape};

/// Playing grid stored as one bitmask per row.
///
/// Row 0 is the top of the field. Bit `x` of a row is set when column `x` is
/// occupied, so every row value is below `1 << width`. There are no sentinel
/// walls: callers bounds-check placements before calling [`Self::overlaps`]
/// or [`Self::fill_shape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    width: usize,
    full_row: u32,
    rows: ArrayVec<u32, MAX_BOARD_HEIGHT>,
}

impl BitGrid {
    /// Creates an empty grid with the given dimensions.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self {
            width: config.width(),
            full_row: (1 << config.width()) - 1,
            rows: iter::repeat_n(0, config.height()).collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Bitmask of a completely filled row, `(1 << width) - 1`.
    #[must_use]
    pub fn full_row_mask(&self) -> u32 {
        self.full_row
    }

    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> u32 {
        self.rows[y]
    }

    /// Rows from top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y] == self.full_row
    }

    #[inline]
    #[must_use]
    pub fn is_cell_occupied(&self, x: usize, y: usize) -> bool {
        (self.rows[y] >> x) & 1 != 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    /// Checks whether `shape` placed with its top-left corner at `(x, y)`
    /// shares a cell with the occupied part of the grid.
    ///
    /// The shape must lie inside the grid.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, x: usize, y: usize, shape: &RotationShape) -> bool {
        shape
            .rows()
            .iter()
            .zip(&self.rows[y..])
            .any(|(&mask, &row)| (mask << x) & row != 0)
    }

    /// ORs `shape` into the grid with its top-left corner at `(x, y)`.
    pub fn fill_shape(&mut self, x: usize, y: usize, shape: &RotationShape) {
        for (mask, row) in shape.rows().iter().zip(&mut self.rows[y..]) {
            *row |= mask << x;
        }
    }

    /// Overwrites this grid (dimensions included) with `other`.
    pub fn copy_from(&mut self, other: &Self) {
        self.width = other.width;
        self.full_row = other.full_row;
        self.rows.clone_from(&other.rows);
    }

    /// Removes full rows, shifting the rows above them down, and returns the
    /// number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        let height = self.rows.len();
        let mut count = 0;

        for y in (0..height).rev() {
            if self.rows[y] == self.full_row {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }

        self.rows[..count].fill(0);
        count
    }

    /// Writes the melted form of this grid into `out` and returns the number
    /// of full rows dropped.
    ///
    /// Non-full rows are copied bottom-aligned in their original order; every
    /// row above them is zero. `out` is completely overwritten, so it can be
    /// reused as scratch space across calls.
    pub fn compact_into(&self, out: &mut Self) -> usize {
        let height = self.rows.len();
        out.width = self.width;
        out.full_row = self.full_row;
        out.rows.clear();
        out.rows.extend(iter::repeat_n(0, height));

        let mut write = height;
        let mut melted = 0;
        for &row in self.rows.iter().rev() {
            if row == self.full_row {
                melted += 1;
                continue;
            }
            write -= 1;
            out.rows[write] = row;
        }
        melted
    }

    /// Creates a grid from ASCII art for testing.
    ///
    /// `#` is an occupied cell and `.` an empty one. Every art row must be
    /// exactly `config.width()` cells wide. Art rows are bottom-aligned: the
    /// last line of `art` becomes the bottom row of the grid, and rows above
    /// the art stay empty.
    ///
    /// # Example
    ///
    /// ```
    /// use gatris_engine::{BitGrid, BoardConfig};
    ///
    /// let art = ["#.........", "##########"].join("\n");
    /// let grid = BitGrid::from_ascii(BoardConfig::default(), &art);
    /// assert!(grid.is_row_full(19));
    /// assert!(grid.is_cell_occupied(0, 18));
    /// assert!(!grid.is_cell_occupied(1, 18));
    /// ```
    #[must_use]
    pub fn from_ascii(config: BoardConfig, art: &str) -> Self {
        let mut grid = Self::new(config);
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= grid.height(),
            "Art has {} rows but the grid is only {} tall",
            lines.len(),
            grid.height()
        );

        let top = grid.height() - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                grid.width,
                "Each row must have exactly {} cells, got {} at art row {}",
                grid.width,
                cells.len(),
                i
            );
            for (x, &ch) in cells.iter().enumerate() {
                if ch == '#' {
                    grid.rows[top + i] |= 1 << x;
                }
            }
        }
        grid
    }
}

impl fmt::Display for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, &row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                let ch = if (row >> x) & 1 != 0 { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::PieceKind;

    use super::*;

    fn small_config() -> BoardConfig {
        BoardConfig::new(8, 8).unwrap()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = BitGrid::new(BoardConfig::default());
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 20);
        assert_eq!(grid.full_row_mask(), 0b11_1111_1111);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_fill_and_overlap() {
        let mut grid = BitGrid::new(BoardConfig::default());
        let square = PieceKind::O.rotation(0);

        assert!(!grid.overlaps(4, 18, square));
        grid.fill_shape(4, 18, square);
        assert!(grid.is_cell_occupied(4, 18));
        assert!(grid.is_cell_occupied(5, 19));
        assert!(!grid.is_cell_occupied(6, 19));

        assert!(grid.overlaps(5, 17, square));
        assert!(grid.overlaps(3, 18, square));
        assert!(!grid.overlaps(6, 18, square));
        assert!(!grid.overlaps(4, 16, square));
    }

    #[test]
    fn test_clear_lines_no_full_rows_is_noop() {
        let mut grid = BitGrid::from_ascii(
            BoardConfig::default(),
            r"
            ..#.......
            #########.
            ",
        );
        let before = grid.clone();
        assert_eq!(grid.clear_lines(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_lines_single_row() {
        let mut grid = BitGrid::from_ascii(
            BoardConfig::default(),
            r"
            .#........
            ..#.......
            ##########
            ...#......
            ",
        );
        assert_eq!(grid.clear_lines(), 1);

        let expected = BitGrid::from_ascii(
            BoardConfig::default(),
            r"
            .#........
            ..#.......
            ...#......
            ",
        );
        assert_eq!(grid, expected);
        assert_eq!(grid.row(0), 0);
        assert_eq!(grid.clear_lines(), 0);
    }

    #[test]
    fn test_clear_lines_non_adjacent_rows() {
        let mut grid = BitGrid::from_ascii(
            small_config(),
            r"
            ########
            #.......
            ########
            .#......
            ########
            ",
        );
        assert_eq!(grid.clear_lines(), 3);

        let expected = BitGrid::from_ascii(
            small_config(),
            r"
            #.......
            .#......
            ",
        );
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_compact_into_matches_clear_lines() {
        let grid = BitGrid::from_ascii(
            small_config(),
            r"
            ..##....
            ########
            #.#.#.#.
            ########
            ",
        );
        let mut scratch = BitGrid::from_ascii(
            small_config(),
            r"
            ########
            ########
            ########
            ",
        );

        let melted = grid.compact_into(&mut scratch);
        assert_eq!(melted, 2);

        let mut cleared = grid.clone();
        assert_eq!(cleared.clear_lines(), 2);
        assert_eq!(scratch, cleared);
    }

    #[test]
    fn test_compact_into_overwrites_other_dimensions() {
        let grid = BitGrid::from_ascii(BoardConfig::default(), "#.........");
        let mut scratch = BitGrid::new(small_config());
        assert_eq!(grid.compact_into(&mut scratch), 0);
        assert_eq!(scratch, grid);
    }

    #[test]
    fn test_copy_from() {
        let source = BitGrid::from_ascii(small_config(), "#..#..#.");
        let mut target = BitGrid::new(BoardConfig::default());
        target.copy_from(&source);
        assert_eq!(target, source);
    }

    #[test]
    fn test_display() {
        let grid = BitGrid::from_ascii(
            small_config(),
            r"
            #......#
            .######.
            ",
        );
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "........");
        assert_eq!(lines[6], "#......#");
        assert_eq!(lines[7], ".######.");
    }
}
