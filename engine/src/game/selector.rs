use super::board::Board;
use super::session_rng::SessionRng;
use super::types::{Difficulty, Mark, Position};

const WIN_SCORE: i32 = 10;
const LOSS_SCORE: i32 = -10;

/// Probability that a Medium bot ignores the search and plays a
/// uniformly random cell instead.
const MEDIUM_RANDOM_CHANCE: f64 = 0.3;

/// Picks the bot's next move, or None if the board is already full.
///
/// The search itself is always fully rational; difficulty only decides
/// how often its result is used:
/// - Easy: uniform random over all empty cells, no search.
/// - Medium: random cell with probability 0.3, otherwise a random
///   member of the tied best-set.
/// - Hard: always a random member of the tied best-set.
pub fn find_best_move(
    board: &Board,
    difficulty: Difficulty,
    bot_mark: Mark,
    rng: &mut SessionRng,
) -> Option<Position> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    if difficulty == Difficulty::Easy {
        return rng.pick(&empty).copied();
    }

    if difficulty == Difficulty::Medium && rng.chance(MEDIUM_RANDOM_CHANCE) {
        return rng.pick(&empty).copied();
    }

    let (_, best) = best_moves(board, bot_mark);
    rng.pick(&best).copied()
}

/// Evaluates every empty cell at the top level: place the bot mark,
/// then search with the opponent to move.
pub fn score_moves(board: &Board, bot_mark: Mark) -> Vec<(Position, i32)> {
    let Some(human_mark) = bot_mark.opponent() else {
        return Vec::new();
    };

    board
        .empty_cells()
        .into_iter()
        .map(|pos| {
            let mut next = *board;
            next.apply_move(pos.row, pos.col, bot_mark);
            (pos, search(next, 0, false, bot_mark, human_mark))
        })
        .collect()
}

/// The best-set: all empty cells tied for the maximum score, not just
/// the first one found. On a drawn position several cells tie, which
/// is the only source of non-determinism on Hard.
pub fn best_moves(board: &Board, bot_mark: Mark) -> (i32, Vec<Position>) {
    let mut best_score = i32::MIN;
    let mut best = Vec::new();

    for (pos, score) in score_moves(board, bot_mark) {
        if score > best_score {
            best_score = score;
            best = vec![pos];
        } else if score == best_score {
            best.push(pos);
        }
    }

    (best_score, best)
}

/// Exhaustive depth-first minimax. Terminal wins are worth
/// `WIN_SCORE - depth` and losses `LOSS_SCORE + depth`, so the bot
/// prefers the fastest win and the slowest loss. The board is a copy
/// at every level; nothing is mutated and restored.
fn search(board: Board, depth: i32, maximizing: bool, bot_mark: Mark, human_mark: Mark) -> i32 {
    if let Some(winner) = board.winner() {
        return if winner == bot_mark {
            WIN_SCORE - depth
        } else {
            LOSS_SCORE + depth
        };
    }
    if board.is_full() {
        return 0;
    }

    let mover = if maximizing { bot_mark } else { human_mark };

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in board.empty_cells() {
        let mut next = board;
        next.apply_move(pos.row, pos.col, mover);
        let score = search(next, depth + 1, !maximizing, bot_mark, human_mark);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}
