use crate::core::{
    bit_grid::BitGrid,
    board_config::BoardConfig,
    piece::{PieceKind, RotationShape},
};

use super::piece_supply::PieceSupply;

/// Direction for a single-cell piece move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// Final resting place of the active piece: top-left corner of its rotation's
/// bounding box plus the rotation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub rotation: usize,
}

/// Board simulation for a single game.
///
/// Holds the grid, the active piece with its rotation and position, a
/// one-piece lookahead and the in-game flag. All movement is expressed
/// through [`Self::collided`].
///
/// The game ends the moment [`Self::save`] leaves any cell of row 0
/// occupied.
#[derive(Debug, Clone)]
pub struct GameModel<S> {
    config: BoardConfig,
    grid: BitGrid,
    supply: S,
    current: PieceKind,
    next: PieceKind,
    rotation: usize,
    x: usize,
    y: usize,
    in_game: bool,
    placement_count: usize,
}

impl<S> GameModel<S>
where
    S: PieceSupply,
{
    /// Starts a game on an empty grid, drawing the active piece and the
    /// lookahead from `supply`.
    pub fn new(config: BoardConfig, mut supply: S) -> Self {
        let current = supply.next_piece();
        let next = supply.next_piece();
        Self {
            config,
            grid: BitGrid::new(config),
            supply,
            current,
            next,
            rotation: 0,
            x: spawn_column(config),
            y: 0,
            in_game: true,
            placement_count: 0,
        }
    }

    /// Promotes the lookahead piece to the active piece and draws a new
    /// lookahead.
    pub fn spawn_next(&mut self) {
        let kind = self.next;
        self.next = self.supply.next_piece();
        self.spawn_piece(kind);
    }
}

impl<S> GameModel<S> {
    #[must_use]
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    #[must_use]
    pub fn grid(&self) -> &BitGrid {
        &self.grid
    }

    #[must_use]
    pub fn current_piece(&self) -> PieceKind {
        self.current
    }

    /// The lookahead piece that [`GameModel::spawn_next`] will activate.
    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn current_shape(&self) -> &'static RotationShape {
        self.current.rotation(self.rotation)
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement {
            x: self.x,
            y: self.y,
            rotation: self.rotation,
        }
    }

    #[must_use]
    pub fn is_in_game(&self) -> bool {
        self.in_game
    }

    /// Number of pieces spawned after the initial one.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.placement_count
    }

    /// Checks whether the active piece in `rotation` would collide when its
    /// bounding box's top-left corner is at `(x, y)`.
    ///
    /// Any position where the bounding box leaves the grid collides, as does
    /// any position where the shape overlaps an occupied cell.
    ///
    /// # Panics
    ///
    /// Panics if `rotation` is not a valid rotation of the active piece.
    #[must_use]
    pub fn collided(&self, x: isize, y: isize, rotation: usize) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return true;
        };
        self.collides_at(x, y, rotation)
    }

    fn collides_at(&self, x: usize, y: usize, rotation: usize) -> bool {
        let shape = self.current.rotation(rotation);
        if x > self.grid.width() - shape.width() {
            return true;
        }
        if y > self.grid.height() - shape.height() {
            return true;
        }
        self.grid.overlaps(x, y, shape)
    }

    /// Returns the row the active piece would come to rest on when dropped
    /// from row 0 in column `x`.
    ///
    /// The piece falls while the next row down does not collide; the starting
    /// row itself is not tested.
    #[must_use]
    pub fn landing_row(&self, x: usize, rotation: usize) -> usize {
        let mut y = 0;
        while !self.collides_at(x, y + 1, rotation) {
            y += 1;
        }
        y
    }

    /// Moves and rotates the active piece to `placement` without collision
    /// checks.
    ///
    /// # Panics
    ///
    /// Panics if the placement's bounding box does not fit inside the grid or
    /// its rotation is not a valid rotation of the active piece.
    pub fn set_placement(&mut self, placement: Placement) {
        let shape = self.current.rotation(placement.rotation);
        assert!(
            placement.x + shape.width() <= self.grid.width()
                && placement.y + shape.height() <= self.grid.height(),
            "placement {placement:?} is outside the grid"
        );
        self.x = placement.x;
        self.y = placement.y;
        self.rotation = placement.rotation;
    }

    /// Moves the active piece one cell if the destination is free.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        let (x, y) = match direction {
            Direction::Left => match self.x.checked_sub(1) {
                Some(x) => (x, self.y),
                None => return false,
            },
            Direction::Right => (self.x + 1, self.y),
            Direction::Down => (self.x, self.y + 1),
        };
        if self.collides_at(x, y, self.rotation) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }

    /// Switches the active piece to its next rotation (wrapping) if that
    /// rotation fits at the current position.
    pub fn try_rotate(&mut self) -> bool {
        let rotation = (self.rotation + 1) % self.current.rotations().len();
        if self.collides_at(self.x, self.y, rotation) {
            return false;
        }
        self.rotation = rotation;
        true
    }

    /// Locks the active piece into the grid.
    ///
    /// Ends the game if row 0 is occupied afterwards.
    pub fn save(&mut self) {
        self.grid.fill_shape(self.x, self.y, self.current_shape());
        if self.grid.row(0) != 0 {
            self.in_game = false;
        }
    }

    /// Removes full rows and returns how many were removed.
    pub fn try_melt(&mut self) -> usize {
        self.grid.clear_lines()
    }

    /// Makes `kind` the active piece at the spawn position with rotation 0.
    pub fn spawn_piece(&mut self, kind: PieceKind) {
        self.current = kind;
        self.rotation = 0;
        self.x = spawn_column(self.config);
        self.y = 0;
        self.placement_count += 1;
    }
}

fn spawn_column(config: BoardConfig) -> usize {
    config.width() / 2 - 1
}

#[cfg(test)]
mod tests {
    use crate::{BagSupply, PieceSeed};

    use super::*;

    /// Replays a fixed piece sequence, cycling when exhausted.
    #[derive(Debug)]
    struct FixedSupply {
        pieces: Vec<PieceKind>,
        index: usize,
    }

    impl FixedSupply {
        fn new(pieces: &[PieceKind]) -> Self {
            Self {
                pieces: pieces.to_vec(),
                index: 0,
            }
        }
    }

    impl PieceSupply for FixedSupply {
        fn next_piece(&mut self) -> PieceKind {
            let kind = self.pieces[self.index % self.pieces.len()];
            self.index += 1;
            kind
        }
    }

    fn model_with(pieces: &[PieceKind]) -> GameModel<FixedSupply> {
        GameModel::new(BoardConfig::default(), FixedSupply::new(pieces))
    }

    #[test]
    fn test_initial_state() {
        let model = model_with(&[PieceKind::T, PieceKind::S]);
        assert!(model.is_in_game());
        assert!(model.grid().is_empty());
        assert_eq!(model.placement_count(), 0);
        assert_eq!(model.current_piece(), PieceKind::T);
        assert_eq!(model.next_piece(), PieceKind::S);
        assert_eq!(
            model.placement(),
            Placement {
                x: 4,
                y: 0,
                rotation: 0
            }
        );
    }

    #[test]
    fn test_spawn_next_promotes_lookahead() {
        let mut model = model_with(&[PieceKind::I, PieceKind::O, PieceKind::Z]);
        model.try_rotate();
        model.spawn_next();
        assert_eq!(model.current_piece(), PieceKind::O);
        assert_eq!(model.next_piece(), PieceKind::Z);
        assert_eq!(model.rotation(), 0);
        assert_eq!(model.placement_count(), 1);
    }

    #[test]
    fn test_collided_out_of_bounds() {
        // horizontal I is 4 wide, 1 tall
        let model = model_with(&[PieceKind::I]);
        for y in 0..20 {
            assert!(model.collided(-1, y, 1));
            assert!(model.collided(-5, y, 1));
            assert!(model.collided(7, y, 1));
            assert!(!model.collided(6, y, 1));
        }
        for x in 0..=6 {
            assert!(model.collided(x, 20, 1));
            assert!(!model.collided(x, 19, 1));
        }
        // vertical I is 1 wide, 4 tall
        assert!(!model.collided(9, 16, 0));
        assert!(model.collided(9, 17, 0));
        assert!(model.collided(10, 0, 0));
        assert!(model.collided(0, -1, 0));
    }

    #[test]
    fn test_collided_with_blocks() {
        let mut model = model_with(&[PieceKind::O]);
        model.grid = BitGrid::from_ascii(BoardConfig::default(), "....#.....");
        assert!(model.collided(3, 18, 0));
        assert!(model.collided(4, 18, 0));
        assert!(!model.collided(5, 18, 0));
        assert!(!model.collided(4, 17, 0));
        assert_eq!(model.landing_row(4, 0), 17);
        assert_eq!(model.landing_row(5, 0), 18);
    }

    #[test]
    fn test_moves_and_rotation() {
        let mut model = model_with(&[PieceKind::T]);
        while model.try_move(Direction::Left) {}
        assert_eq!(model.placement().x, 0);
        assert!(!model.try_move(Direction::Left));

        while model.try_move(Direction::Right) {}
        assert_eq!(model.placement().x, 7);

        // upright rotations are 2 wide, so rotating at x = 7 still fits
        assert!(model.try_rotate());
        assert_eq!(model.rotation(), 1);
        assert!(model.try_move(Direction::Right));
        assert_eq!(model.placement().x, 8);
        // 3-wide rotation 2 would stick out past the right edge
        assert!(!model.try_rotate());
        assert_eq!(model.rotation(), 1);

        while model.try_move(Direction::Down) {}
        assert_eq!(model.placement().y, 17);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut model = model_with(&[PieceKind::S]);
        model.set_placement(Placement {
            x: 3,
            y: 5,
            rotation: 0,
        });
        assert!(model.try_rotate());
        assert!(model.try_rotate());
        assert_eq!(model.rotation(), 0);
    }

    #[test]
    fn test_save_fills_grid() {
        let mut model = model_with(&[PieceKind::O]);
        let y = model.landing_row(0, 0);
        model.set_placement(Placement { x: 0, y, rotation: 0 });
        model.save();
        assert!(model.is_in_game());
        let expected = BitGrid::from_ascii(
            BoardConfig::default(),
            r"
            ##........
            ##........
            ",
        );
        assert_eq!(model.grid(), &expected);
        assert_eq!(model.try_melt(), 0);
    }

    #[test]
    fn test_save_on_top_row_ends_game() {
        let mut model = model_with(&[PieceKind::I]);
        model.set_placement(Placement {
            x: 0,
            y: 0,
            rotation: 1,
        });
        model.save();
        assert!(!model.is_in_game());
    }

    #[test]
    fn test_o_pieces_tile_two_rows() {
        let mut model = model_with(&[PieceKind::O]);
        for x in (0..10).step_by(2) {
            let y = model.landing_row(x, 0);
            assert_eq!(y, 18);
            model.set_placement(Placement { x, y, rotation: 0 });
            model.save();
            assert!(model.is_in_game());
            if x < 8 {
                assert_eq!(model.try_melt(), 0);
                model.spawn_next();
            }
        }
        assert!(model.grid().is_row_full(18));
        assert!(model.grid().is_row_full(19));
        assert_eq!(model.try_melt(), 2);
        assert!(model.grid().is_empty());
        assert_eq!(model.try_melt(), 0);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let config = BoardConfig::default();
        let mut first = GameModel::new(config, BagSupply::with_seed(PieceSeed::new(3)));
        let mut second = GameModel::new(config, BagSupply::with_seed(PieceSeed::new(3)));
        for _ in 0..20 {
            assert_eq!(first.current_piece(), second.current_piece());
            assert_eq!(first.next_piece(), second.next_piece());
            first.spawn_next();
            second.spawn_next();
        }
    }
}
