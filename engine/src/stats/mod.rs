mod score_record;
mod store;

pub use score_record::{DifficultyWins, GameResult, ScoreRecord};
pub use store::{ScoreStore, ScoreStoreError};
