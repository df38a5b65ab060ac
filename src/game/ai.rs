//! Random opponent playing O.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::model::{empty_cells, Board};

/// Picks uniformly among the empty cells. No strategy, no look-ahead.
pub struct RandomAi<R = StdRng> {
    rng: R,
}

impl RandomAi<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible opponent for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomAi<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Returns `None` when the board has no empty cell.
    pub fn choose(&mut self, board: &Board) -> Option<usize> {
        let available = empty_cells(board);
        let choice = available.choose(&mut self.rng).copied();
        debug!(available = available.len(), ?choice, "AI chose cell");
        choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::model::Player;
    use proptest::prelude::*;

    #[test]
    fn test_full_board_has_no_choice() {
        let mut ai = RandomAi::seeded(7);
        let board = [Some(Player::X); 9];
        assert_eq!(ai.choose(&board), None);
    }

    #[test]
    fn test_single_empty_cell() {
        let mut ai = RandomAi::seeded(7);
        let mut board = [Some(Player::O); 9];
        board[6] = None;
        assert_eq!(ai.choose(&board), Some(6));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let board = [None; 9];
        let mut first = RandomAi::seeded(42);
        let mut second = RandomAi::seeded(42);

        let a: Vec<_> = (0..20).map(|_| first.choose(&board)).collect();
        let b: Vec<_> = (0..20).map(|_| second.choose(&board)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_choices_cover_every_empty_cell() {
        let mut ai = RandomAi::seeded(1);
        let mut board = [None; 9];
        board[0] = Some(Player::X);
        board[4] = Some(Player::O);

        let mut seen = [false; 9];
        for _ in 0..500 {
            if let Some(index) = ai.choose(&board) {
                seen[index] = true;
            }
        }

        for (index, hit) in seen.iter().enumerate() {
            assert_eq!(*hit, board[index].is_none(), "cell {index}");
        }
    }

    proptest! {
        #[test]
        fn prop_never_picks_occupied(
            board in prop::array::uniform9(prop_oneof![
                Just(None),
                Just(Some(Player::X)),
                Just(Some(Player::O))
            ]),
            seed in any::<u64>(),
        ) {
            let mut ai = RandomAi::seeded(seed);
            match ai.choose(&board) {
                Some(index) => prop_assert!(board[index].is_none()),
                None => prop_assert!(board.iter().all(Option::is_some)),
            }
        }
    }
}
