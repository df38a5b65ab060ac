use std::fmt;
use thiserror::Error;
use tracing::debug;

pub const BOARD_SIZE: usize = 9;

// Rows, columns, diagonals. Scanned in this order.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => f.write_str("X"),
            Player::O => f.write_str("O"),
        }
    }
}

/// Row-major 3x3 grid: 0,1,2 / 3,4,5 / 6,7,8.
pub type Board = [Option<Player>; BOARD_SIZE];

/// Result of scanning a board for a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

/// First winning line in scan order decides; a full board without one is a draw.
pub fn check_terminal(board: &Board) -> Outcome {
    for [a, b, c] in WINNING_LINES {
        if let Some(player) = board[a] {
            if board[b] == Some(player) && board[c] == Some(player) {
                return Outcome::Win(player);
            }
        }
    }

    if board.iter().all(Option::is_some) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

pub fn empty_cells(board: &Board) -> Vec<usize> {
    board
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| cell.is_none().then_some(index))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    HumanMove(usize),
    /// The cell picked by the AI, or `None` when it found no empty cell.
    AiMove(Option<usize>),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,
    #[error("it is not {0}'s turn")]
    NotYourTurn(Player),
    #[error("cell {0} is out of bounds")]
    OutOfBounds(usize),
    #[error("cell {0} is already taken")]
    CellTaken(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    PlayerTurn,
    AiTurn,
    Winner(Player),
    Draw,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::PlayerTurn => f.write_str("Player's turn"),
            Status::AiTurn => f.write_str("AI's turn"),
            Status::Winner(player) => write!(f, "Winner: {}", player),
            Status::Draw => f.write_str("It's a draw!"),
        }
    }
}

/// Complete game state. Never mutated in place: every transition
/// returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    x_is_next: bool,
    game_over: bool,
    winner: Option<Player>,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            board: [None; BOARD_SIZE],
            x_is_next: true,
            game_over: false,
            winner: None,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn x_is_next(&self) -> bool {
        self.x_is_next
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn current_player(&self) -> Player {
        if self.x_is_next {
            Player::X
        } else {
            Player::O
        }
    }

    /// True when the AI should be scheduled to move.
    pub fn awaiting_ai(&self) -> bool {
        !self.x_is_next && !self.game_over
    }

    pub fn status(&self) -> Status {
        match (self.game_over, self.winner()) {
            (true, Some(player)) => Status::Winner(player),
            (true, None) => Status::Draw,
            (false, _) if self.x_is_next => Status::PlayerTurn,
            (false, _) => Status::AiTurn,
        }
    }

    /// Pure transition. Rejected events leave the state untouched.
    pub fn apply(self, event: Event) -> GameState {
        let result = match event {
            Event::HumanMove(index) => self.human_move(index),
            Event::AiMove(choice) => self.ai_move(choice),
            Event::Reset => Ok(GameState::default()),
        };

        match result {
            Ok(next) => next,
            Err(err) => {
                debug!(?event, %err, "Move rejected");
                self
            }
        }
    }

    pub fn human_move(self, index: usize) -> Result<GameState, MoveError> {
        self.place(Player::X, index)
    }

    /// `None` means the AI found no empty cell, which ends the game.
    pub fn ai_move(self, choice: Option<usize>) -> Result<GameState, MoveError> {
        match choice {
            Some(index) => self.place(Player::O, index),
            None => {
                if self.game_over {
                    return Err(MoveError::GameOver);
                }
                Ok(GameState {
                    game_over: true,
                    ..self
                })
            }
        }
    }

    fn place(self, player: Player, index: usize) -> Result<GameState, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if self.current_player() != player {
            return Err(MoveError::NotYourTurn(player));
        }
        if index >= BOARD_SIZE {
            return Err(MoveError::OutOfBounds(index));
        }
        if self.board[index].is_some() {
            return Err(MoveError::CellTaken(index));
        }

        let mut board = self.board;
        board[index] = Some(player);

        let next = GameState {
            board,
            x_is_next: !self.x_is_next,
            ..self
        };
        Ok(next.with_terminal_check())
    }

    fn with_terminal_check(self) -> GameState {
        match check_terminal(&self.board) {
            Outcome::Win(player) => GameState {
                game_over: true,
                winner: Some(player),
                ..self
            },
            Outcome::Draw => GameState {
                game_over: true,
                ..self
            },
            Outcome::InProgress => self,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        board: Board,
        x_is_next: bool,
        game_over: bool,
        winner: Option<Player>,
    ) -> Self {
        GameState {
            board,
            x_is_next,
            game_over,
            winner,
        }
    }
}
