mod board;
mod selector;
mod session_rng;
mod types;

pub use board::{Board, BOARD_SIZE};
pub use selector::{best_moves, find_best_move, score_moves};
pub use session_rng::SessionRng;
pub use types::{Difficulty, GameStatus, Mark, Position, WinningLine};
