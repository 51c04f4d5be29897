use std::time::Instant;

use crate::game::{find_best_move, Board, Difficulty, GameStatus, Mark, Position, SessionRng};
use crate::log;
use crate::stats::{GameResult, ScoreRecord, ScoreStore};

pub struct GameSessionSettings {
    pub human_mark: Mark,
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
}

impl Default for GameSessionSettings {
    fn default() -> Self {
        Self {
            human_mark: Mark::X,
            difficulty: Difficulty::Hard,
            seed: None,
        }
    }
}

/// One human-versus-bot game session: board state, selector
/// invocation, elapsed-time tracking and the score tally. This is the
/// whole contract a front end needs; rendering, input capture and the
/// cosmetic "thinking" delay stay on the caller's side.
pub struct GameSession {
    board: Board,
    human_mark: Mark,
    bot_mark: Mark,
    difficulty: Difficulty,
    rng: SessionRng,
    store: ScoreStore,
    started_at: Instant,
    tally_recorded: bool,
}

impl GameSession {
    pub fn new(settings: GameSessionSettings, store: ScoreStore) -> Result<Self, String> {
        let bot_mark = settings
            .human_mark
            .opponent()
            .ok_or_else(|| "Human mark must be X or O".to_string())?;

        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };

        Ok(Self {
            board: Board::new(),
            human_mark: settings.human_mark,
            bot_mark,
            difficulty: settings.difficulty,
            rng,
            store,
            started_at: Instant::now(),
            tally_recorded: false,
        })
    }

    /// Applies the human mark. Returns false without side effects when
    /// the cell is taken, out of range, or the game is over.
    pub fn human_move(&mut self, row: usize, col: usize) -> bool {
        if self.status() != GameStatus::InProgress {
            return false;
        }
        if !self.board.apply_move(row, col, self.human_mark) {
            return false;
        }
        self.record_tally_on_game_end();
        true
    }

    /// Runs the selector with the difficulty currently set on the
    /// session and applies the chosen cell. None when the game is over
    /// or the board is full.
    pub fn play_bot_turn(&mut self) -> Option<Position> {
        if self.status() != GameStatus::InProgress {
            return None;
        }
        let pos = find_best_move(&self.board, self.difficulty, self.bot_mark, &mut self.rng)?;
        if !self.board.apply_move(pos.row, pos.col, self.bot_mark) {
            return None;
        }
        self.record_tally_on_game_end();
        Some(pos)
    }

    /// Takes effect on the next bot turn; the current game continues.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.board.outcome()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    pub fn score(&self) -> &ScoreRecord {
        self.store.record()
    }

    /// Clears the board and the elapsed-time origin; the tally and the
    /// selected difficulty carry over.
    pub fn new_game(&mut self) {
        self.board.reset();
        self.started_at = Instant::now();
        self.tally_recorded = false;
    }

    fn record_tally_on_game_end(&mut self) {
        if self.tally_recorded {
            return;
        }
        let result = match self.status() {
            GameStatus::InProgress => return,
            GameStatus::Draw => GameResult::Draw,
            GameStatus::XWon | GameStatus::OWon => {
                if self.board.winner() == Some(self.human_mark) {
                    GameResult::Win
                } else {
                    GameResult::Loss
                }
            }
        };

        let elapsed = self.elapsed_secs();
        let difficulty = self.difficulty;
        self.store
            .record_mut()
            .record_game(result, elapsed, difficulty);
        self.tally_recorded = true;

        if let Err(e) = self.store.save() {
            log!(
                "Failed to save score file {}: {}",
                self.store.path().display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_store(name: &str) -> (ScoreStore, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "engine_session_{}_{}.json",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        (ScoreStore::open(&path), path)
    }

    fn session(name: &str, difficulty: Difficulty) -> (GameSession, PathBuf) {
        let (store, path) = temp_store(name);
        let settings = GameSessionSettings {
            difficulty,
            seed: Some(42),
            ..GameSessionSettings::default()
        };
        (GameSession::new(settings, store).unwrap(), path)
    }

    #[test]
    fn test_rejects_empty_human_mark() {
        let (store, path) = temp_store("bad_mark");
        let settings = GameSessionSettings {
            human_mark: Mark::Empty,
            ..GameSessionSettings::default()
        };
        assert!(GameSession::new(settings, store).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_alternating_play_reaches_a_terminal_state() {
        let (mut session, path) = session("full_game", Difficulty::Hard);

        while session.status() == GameStatus::InProgress {
            let pos = session.board().empty_cells()[0];
            if session.human_move(pos.row, pos.col) && session.status() == GameStatus::InProgress {
                assert!(session.play_bot_turn().is_some());
            }
        }

        // Hard bot never loses to a greedy first-empty-cell human.
        assert_ne!(session.status(), GameStatus::XWon);
        assert_eq!(session.score().games_played, 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_tally_recorded_once_and_persisted() {
        let (mut session, path) = session("tally_once", Difficulty::Easy);

        while session.status() == GameStatus::InProgress {
            let pos = session.board().empty_cells()[0];
            session.human_move(pos.row, pos.col);
            session.play_bot_turn();
        }

        assert_eq!(session.score().games_played, 1);

        // Post-game moves are rejected and must not touch the tally.
        assert!(!session.human_move(0, 0));
        assert!(session.play_bot_turn().is_none());
        assert_eq!(session.score().games_played, 1);

        let reloaded = ScoreStore::open(&path);
        assert_eq!(reloaded.record().games_played, 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_new_game_keeps_tally_and_difficulty() {
        let (mut session, path) = session("new_game", Difficulty::Medium);

        while session.status() == GameStatus::InProgress {
            let pos = session.board().empty_cells()[0];
            session.human_move(pos.row, pos.col);
            session.play_bot_turn();
        }
        assert_eq!(session.score().games_played, 1);

        session.new_game();
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.board().empty_cells().len(), 9);
        assert_eq!(session.difficulty(), Difficulty::Medium);
        assert_eq!(session.score().games_played, 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_difficulty_switch_takes_effect_next_bot_turn() {
        let (mut session, path) = session("switch", Difficulty::Easy);

        assert!(session.human_move(1, 1));
        session.set_difficulty(Difficulty::Hard);
        assert_eq!(session.difficulty(), Difficulty::Hard);

        // Hard replies to a center opening with a corner.
        let pos = session.play_bot_turn().unwrap();
        assert!(pos.row != 1 || pos.col != 1);
        assert!(pos.row % 2 == 0 && pos.col % 2 == 0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_rejects_occupied_cell() {
        let (mut session, path) = session("occupied", Difficulty::Hard);
        assert!(session.human_move(0, 0));
        assert!(!session.human_move(0, 0));
        let _ = std::fs::remove_file(&path);
    }
}
