pub mod config;
pub mod game;
pub mod logger;
pub mod session;
pub mod stats;

pub use game::{Board, Difficulty, GameStatus, Mark, Position, SessionRng, WinningLine};
pub use session::{GameSession, GameSessionSettings};
pub use stats::{GameResult, ScoreRecord, ScoreStore};
