use serde::{Deserialize, Serialize};

use crate::game::Difficulty;

/// Outcome of a completed game from the human's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Per-difficulty win counters. Field names match the keys the score
/// file has always used.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct DifficultyWins {
    #[serde(default)]
    pub easy: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub hard: u32,
}

impl DifficultyWins {
    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn bump(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
        }
    }
}

/// The persisted score tally. Mutated exactly once per completed game,
/// never mid-game. `best_time` is None until the first human win; the
/// old file format wrote an infinity sentinel instead, which strict
/// JSON cannot represent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub win_streak: u32,
    #[serde(default)]
    pub best_time: Option<f64>,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub difficulty_wins: DifficultyWins,
}

impl ScoreRecord {
    pub fn record_game(&mut self, result: GameResult, elapsed_secs: f64, difficulty: Difficulty) {
        self.games_played += 1;

        match result {
            GameResult::Win => {
                self.wins += 1;
                self.win_streak += 1;
                self.difficulty_wins.bump(difficulty);
                if self.best_time.is_none_or(|best| elapsed_secs < best) {
                    self.best_time = Some(elapsed_secs);
                }
            }
            GameResult::Loss => {
                self.losses += 1;
                self.win_streak = 0;
            }
            GameResult::Draw => {
                self.draws += 1;
                self.win_streak = 0;
            }
        }
    }
}
