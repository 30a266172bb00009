use gatris_engine::{BoardConfig, GameModel, PieceSupply};

use crate::{MoveSearcher, Weights};

/// Result of one simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOutcome {
    /// Total rows melted over the game.
    pub lines_cleared: usize,
    /// Pieces locked into the grid, including the one that ended the game.
    pub placements: usize,
    /// `false` when the game stopped because it hit the placement cap.
    pub game_over: bool,
}

/// Plays one game with the greedy move search until the grid tops out or
/// `placement_cap` pieces have been placed.
///
/// The game is a pure function of its arguments: the same supply seed,
/// weights and cap always give the same outcome.
///
/// # Example
///
/// ```
/// use gatris_engine::{BoardConfig, PieceSeed, UniformSupply};
/// use gatris_evaluator::{Weights, play_game};
///
/// let config = BoardConfig::default();
/// let run = || {
///     let supply = UniformSupply::with_seed(PieceSeed::new(1));
///     play_game(config, supply, &Weights::REFERENCE, 50)
/// };
/// let outcome = run();
/// assert_eq!(outcome.placements, 50);
/// assert!(!outcome.game_over);
/// assert_eq!(outcome, run());
/// ```
pub fn play_game<S>(
    config: BoardConfig,
    supply: S,
    weights: &Weights,
    placement_cap: usize,
) -> GameOutcome
where
    S: PieceSupply,
{
    let mut model = GameModel::new(config, supply);
    continue_game(&mut model, weights, placement_cap)
}

/// Plays `model` on from its current state, placing at most
/// `placement_cap` more pieces.
///
/// The model is left as the game ended, so callers can inspect the final
/// grid.
pub fn continue_game<S>(
    model: &mut GameModel<S>,
    weights: &Weights,
    placement_cap: usize,
) -> GameOutcome
where
    S: PieceSupply,
{
    let mut searcher = MoveSearcher::new(model.config(), *weights);
    let mut outcome = GameOutcome::default();

    while model.is_in_game() && outcome.placements < placement_cap {
        let Some(best) = searcher.best_move(model) else {
            outcome.game_over = true;
            return outcome;
        };
        model.set_placement(best.placement);
        model.save();
        outcome.placements += 1;

        if model.is_in_game() {
            outcome.lines_cleared += model.try_melt();
            model.spawn_next();
        }
    }

    outcome.game_over = !model.is_in_game();
    outcome
}

/// Plays one game and returns the number of lines cleared.
pub fn run_game<S>(
    config: BoardConfig,
    supply: S,
    weights: &Weights,
    placement_cap: usize,
) -> usize
where
    S: PieceSupply,
{
    play_game(config, supply, weights, placement_cap).lines_cleared
}
