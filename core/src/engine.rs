use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Lost
/// - InProgress -> Won
///
/// Both end states are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Represents a game from start to finish.
///
/// Every operation is total: out-of-bounds coordinates and moves after the
/// game has ended are silent no-ops reported through the outcome enums.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    layout: BoardLayout,
    grid: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(layout: BoardLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            grid: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.layout.mine_count() as isize) - (self.flagged_count as isize)
    }

    /// Number of revealed safe cells.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.grid[coords.to_nd_index()]
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Pure display query combining visibility and layout.
    pub fn view_at(&self, coords: Coord2) -> TileView {
        match (self.grid[coords.to_nd_index()], self.layout[coords]) {
            (CellState::Flagged, _) => TileView::Flagged,
            (CellState::Hidden, _) => TileView::Hidden,
            (CellState::Revealed, LayoutCell::Mine) => TileView::Mine,
            (CellState::Revealed, LayoutCell::Clear(0)) => TileView::Blank,
            (CellState::Revealed, LayoutCell::Clear(count)) => TileView::Count(count),
        }
    }

    /// Reveal a hidden cell, cascading through zero-count regions.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if self.state.is_finished() || !self.layout.in_bounds(coords) {
            return NoChange;
        }

        match self.grid[coords.to_nd_index()] {
            CellState::Flagged | CellState::Revealed => NoChange,
            CellState::Hidden if self.layout.contains_mine(coords) => {
                self.grid[coords.to_nd_index()] = CellState::Revealed;
                self.triggered_mine = Some(coords);
                self.state = GameState::Lost;
                HitMine
            }
            CellState::Hidden => {
                self.reveal_clear(coords);

                if self.revealed_count == self.layout.safe_cell_count() {
                    self.state = GameState::Won;
                    Won
                } else {
                    Revealed
                }
            }
        }
    }

    /// Reveals a known-safe cell and flood-fills its zero-count region.
    ///
    /// Cells are marked revealed before being enqueued, so each cell enters
    /// the worklist at most once and the traversal is bounded by the grid.
    fn reveal_clear(&mut self, coords: Coord2) {
        self.grid[coords.to_nd_index()] = CellState::Revealed;
        self.revealed_count += 1;
        log::debug!(
            "Revealed cell at {:?}, mine count: {}",
            coords,
            self.layout.adjacent_mines(coords)
        );

        if self.layout.adjacent_mines(coords) != 0 {
            return;
        }

        let mut to_visit = VecDeque::from([coords]);
        while let Some(zero_coords) = to_visit.pop_front() {
            for pos in self.layout.iter_neighbors(zero_coords) {
                if self.grid[pos.to_nd_index()] != CellState::Hidden {
                    continue;
                }

                // a zero-count cell cannot touch a mine, so `pos` is safe
                self.grid[pos.to_nd_index()] = CellState::Revealed;
                self.revealed_count += 1;

                let adjacent = self.layout.adjacent_mines(pos);
                log::trace!("Flood revealed cell at {:?}, mine count: {}", pos, adjacent);
                if adjacent == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    /// Toggle a flag on a hidden cell; revealed cells cannot be flagged.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        use MarkOutcome::*;

        if self.state.is_finished() || !self.layout.in_bounds(coords) {
            return NoChange;
        }

        match self.grid[coords.to_nd_index()] {
            CellState::Hidden => {
                self.grid[coords.to_nd_index()] = CellState::Flagged;
                self.flagged_count += 1;
                Changed
            }
            CellState::Flagged => {
                self.grid[coords.to_nd_index()] = CellState::Hidden;
                self.flagged_count -= 1;
                Changed
            }
            CellState::Revealed => NoChange,
        }
    }

    /// True iff every non-mine cell is revealed; flags are irrelevant.
    ///
    /// Recomputed from the grids rather than the revealed counter, so callers
    /// that drive win detection themselves cross-check the engine.
    pub fn check_win(&self) -> bool {
        self.layout
            .cells
            .iter()
            .zip(self.grid.iter())
            .all(|(&layout, &visibility)| layout.is_mine() || visibility == CellState::Revealed)
    }

    /// Reveals every still-hidden mine for the final board after a loss.
    ///
    /// Flagged mines keep their flag. No-op unless the game was lost.
    pub fn expose_mines(&mut self) {
        if self.state != GameState::Lost {
            return;
        }

        let (rows, cols) = self.layout.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.layout.contains_mine(coords)
                    && self.grid[coords.to_nd_index()] == CellState::Hidden
                {
                    self.grid[coords.to_nd_index()] = CellState::Revealed;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> BoardLayout {
        BoardLayout::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let mut game = Game::new(layout((3, 3), &[(1, 1)]));

        let outcome = game.reveal((1, 1));

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.triggered_mine(), Some((1, 1)));
        // no cascade: every other cell is untouched
        for coords in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
            assert_eq!(game.cell_at(coords), CellState::Hidden);
        }
    }

    #[test]
    fn reveal_of_flagged_cell_is_a_noop() {
        let mut game = Game::new(layout((2, 2), &[(0, 0)]));

        game.toggle_flag((0, 0));
        let outcome = game.reveal((0, 0));

        assert_eq!(outcome, RevealOutcome::NoChange);
        assert_eq!(game.cell_at((0, 0)), CellState::Flagged);
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn reveal_of_already_revealed_cell_is_a_noop() {
        let mut game = Game::new(layout((2, 2), &[(0, 0), (1, 1)]));

        assert_eq!(game.reveal((0, 1)), RevealOutcome::Revealed);
        assert_eq!(game.reveal((0, 1)), RevealOutcome::NoChange);
        assert_eq!(game.revealed_count(), 1);
    }

    #[test]
    fn out_of_bounds_moves_are_noops() {
        let mut game = Game::new(layout((2, 2), &[(0, 0)]));

        assert_eq!(game.reveal((2, 0)), RevealOutcome::NoChange);
        assert_eq!(game.reveal((0, 7)), RevealOutcome::NoChange);
        assert_eq!(game.toggle_flag((9, 9)), MarkOutcome::NoChange);
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn numbered_cell_reveals_without_cascade() {
        let mut game = Game::new(layout((2, 2), &[(0, 0), (1, 1)]));

        assert_eq!(game.reveal((0, 1)), RevealOutcome::Revealed);

        assert_eq!(game.view_at((0, 1)), TileView::Count(2));
        assert_eq!(game.cell_at((1, 0)), CellState::Hidden);
        assert_eq!(game.cell_at((0, 0)), CellState::Hidden);
    }

    #[test]
    fn flood_fill_stops_at_the_numbered_border() {
        // mines in the last column; columns 0..=2 are the zero region and
        // column 3 is its numbered border
        let mut game = Game::new(layout((3, 5), &[(0, 4), (2, 4)]));

        let outcome = game.reveal((0, 0));

        assert_eq!(outcome, RevealOutcome::Revealed);
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(game.cell_at((row, col)), CellState::Revealed);
            }
        }
        // nothing beyond the border
        assert_eq!(game.cell_at((0, 4)), CellState::Hidden);
        assert_eq!(game.cell_at((1, 4)), CellState::Hidden);
        assert_eq!(game.cell_at((2, 4)), CellState::Hidden);
        assert_eq!(game.revealed_count(), 12);
        assert!(!game.check_win());
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut game = Game::new(layout((3, 5), &[(0, 4), (2, 4)]));

        game.toggle_flag((1, 1));
        game.reveal((0, 0));

        assert_eq!(game.cell_at((1, 1)), CellState::Flagged);
        assert_eq!(game.revealed_count(), 11);
    }

    #[test]
    fn all_zero_board_reveals_everything_from_one_move() {
        let mut game = Game::new(layout((4, 4), &[]));

        let outcome = game.reveal((2, 1));

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(game.revealed_count(), 16);
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(game.view_at((row, col)), TileView::Blank);
            }
        }
    }

    #[test]
    fn single_cell_board_is_won_in_one_move() {
        let mut game = Game::new(layout((1, 1), &[]));

        assert_eq!(game.view_at((0, 0)), TileView::Hidden);
        assert_eq!(game.reveal((0, 0)), RevealOutcome::Won);
        assert!(game.check_win());
    }

    #[test]
    fn double_toggle_restores_a_hidden_cell() {
        let mut game = Game::new(layout((2, 2), &[(0, 0)]));

        assert_eq!(game.toggle_flag((1, 1)), MarkOutcome::Changed);
        assert_eq!(game.mines_left(), 0);
        assert_eq!(game.toggle_flag((1, 1)), MarkOutcome::Changed);

        assert_eq!(game.cell_at((1, 1)), CellState::Hidden);
        assert_eq!(game.mines_left(), 1);
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut game = Game::new(layout((2, 2), &[(0, 0), (1, 1)]));

        game.reveal((0, 1));

        assert_eq!(game.toggle_flag((0, 1)), MarkOutcome::NoChange);
        assert_eq!(game.cell_at((0, 1)), CellState::Revealed);
    }

    #[test]
    fn win_ignores_flag_state_on_mines() {
        let mut game = Game::new(layout((2, 1), &[(0, 0)]));

        game.toggle_flag((0, 0));

        // folded pattern: reveal itself reports the win
        assert_eq!(game.reveal((1, 0)), RevealOutcome::Won);
        assert_eq!(game.state(), GameState::Won);
        // caller-driven pattern: the pure query agrees
        assert!(game.check_win());
    }

    #[test]
    fn caller_driven_win_check_agrees_after_a_cascade() {
        let mut game = Game::new(layout((3, 3), &[(2, 2)]));

        assert!(!game.check_win());
        game.reveal((0, 0));

        assert!(game.check_win());
        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.cell_at((2, 2)), CellState::Hidden);
    }

    #[test]
    fn no_moves_are_accepted_after_the_game_ends() {
        let mut game = Game::new(layout((2, 2), &[(0, 0)]));

        game.reveal((0, 0));
        assert_eq!(game.state(), GameState::Lost);

        assert_eq!(game.reveal((1, 1)), RevealOutcome::NoChange);
        assert_eq!(game.toggle_flag((1, 1)), MarkOutcome::NoChange);
        assert_eq!(game.cell_at((1, 1)), CellState::Hidden);
    }

    #[test]
    fn expose_mines_reveals_hidden_mines_and_keeps_flags() {
        let mut game = Game::new(layout((2, 2), &[(0, 0), (1, 1)]));

        game.toggle_flag((0, 0));
        // in progress: nothing to expose yet
        game.expose_mines();
        assert_eq!(game.cell_at((1, 1)), CellState::Hidden);

        assert_eq!(game.reveal((1, 1)), RevealOutcome::HitMine);
        game.expose_mines();

        assert_eq!(game.view_at((0, 0)), TileView::Flagged);
        assert_eq!(game.view_at((1, 1)), TileView::Mine);
        assert_eq!(game.cell_at((0, 1)), CellState::Hidden);
    }

    #[test]
    fn game_snapshot_survives_serialization() {
        let mut game = Game::new(layout((3, 3), &[(0, 2)]));
        game.toggle_flag((0, 2));
        game.reveal((2, 0));

        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, game);
    }
}
