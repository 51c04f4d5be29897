use super::types::{GameStatus, Mark, Position, WinningLine};

pub const BOARD_SIZE: usize = 3;

const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The 8 winning lines, scanned in order: rows, columns, main
/// diagonal, anti-diagonal. A malformed board built out of band could
/// complete two lines; whichever is checked first wins.
const LINES: [[usize; BOARD_SIZE]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 grid with value semantics: the selector passes copies down its
/// search instead of mutating and restoring one shared board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
    move_count: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
            move_count: 0,
        }
    }

    /// Writes `mark` iff the coordinates are in bounds and the cell is
    /// empty. Returns whether the write happened; an occupied or
    /// out-of-range cell is a silent no-op, not an error.
    pub fn apply_move(&mut self, row: usize, col: usize, mark: Mark) -> bool {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return false;
        }
        let idx = row * BOARD_SIZE + col;
        if self.cells[idx] != Mark::Empty {
            return false;
        }
        self.cells[idx] = mark;
        self.move_count += 1;
        true
    }

    pub fn winner(&self) -> Option<Mark> {
        self.scan_lines().map(|(mark, _)| mark)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.scan_lines().map(|(mark, line)| {
            WinningLine::new(
                mark,
                Self::position_of(line[0]),
                Self::position_of(line[BOARD_SIZE - 1]),
            )
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(idx, _)| Self::position_of(idx))
            .collect()
    }

    /// Out-of-range coordinates read as empty, mirroring the bounds
    /// handling of [`apply_move`](Self::apply_move).
    pub fn mark_at(&self, row: usize, col: usize) -> Mark {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Mark::Empty;
        }
        self.cells[row * BOARD_SIZE + col]
    }

    /// Plies played so far. Redundant with counting occupied cells,
    /// kept for display purposes.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn outcome(&self) -> GameStatus {
        match self.winner() {
            Some(Mark::X) => GameStatus::XWon,
            Some(Mark::O) => GameStatus::OWon,
            Some(Mark::Empty) => unreachable!(),
            None if self.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn scan_lines(&self) -> Option<(Mark, [usize; BOARD_SIZE])> {
        for line in LINES {
            let mark = self.cells[line[0]];
            if mark != Mark::Empty && line.iter().all(|&idx| self.cells[idx] == mark) {
                return Some((mark, line));
            }
        }
        None
    }

    fn position_of(idx: usize) -> Position {
        Position::new(idx / BOARD_SIZE, idx % BOARD_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: [[char; 3]; 3]) -> Board {
        let mut board = Board::new();
        for (row, cells) in rows.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                match cell {
                    'X' => assert!(board.apply_move(row, col, Mark::X)),
                    'O' => assert!(board.apply_move(row, col, Mark::O)),
                    _ => {}
                }
            }
        }
        board
    }

    #[test]
    fn test_apply_move_rejects_occupied_cell() {
        let mut board = Board::new();
        assert!(board.apply_move(1, 1, Mark::X));
        assert!(!board.apply_move(1, 1, Mark::O));
        assert_eq!(board.mark_at(1, 1), Mark::X);
        assert_eq!(board.move_count(), 1);
    }

    #[test]
    fn test_apply_move_rejects_out_of_bounds() {
        let mut board = Board::new();
        assert!(!board.apply_move(3, 0, Mark::X));
        assert!(!board.apply_move(0, 3, Mark::X));
        assert_eq!(board.move_count(), 0);
    }

    #[test]
    fn test_mark_at_out_of_range_reads_empty() {
        let mut board = Board::new();
        assert!(board.apply_move(1, 2, Mark::X));
        // (0, 5) must not alias to a flattened in-range index.
        assert_eq!(board.mark_at(0, 5), Mark::Empty);
        assert_eq!(board.mark_at(3, 0), Mark::Empty);
        assert_eq!(board.mark_at(1, 2), Mark::X);
    }

    #[test]
    fn test_winner_detects_row_column_and_diagonals() {
        let row_win = board_from([['X', 'X', 'X'], ['O', 'O', ' '], [' ', ' ', ' ']]);
        assert_eq!(row_win.winner(), Some(Mark::X));

        let col_win = board_from([['O', 'X', ' '], ['O', 'X', ' '], ['O', ' ', 'X']]);
        assert_eq!(col_win.winner(), Some(Mark::O));

        let diag_win = board_from([['X', 'O', ' '], ['O', 'X', ' '], [' ', ' ', 'X']]);
        assert_eq!(diag_win.winner(), Some(Mark::X));

        let anti_diag_win = board_from([['X', 'X', 'O'], ['X', 'O', ' '], ['O', ' ', ' ']]);
        assert_eq!(anti_diag_win.winner(), Some(Mark::O));
    }

    #[test]
    fn test_no_winner_on_open_board() {
        let board = board_from([['X', 'O', ' '], [' ', 'X', ' '], [' ', ' ', 'O']]);
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), GameStatus::InProgress);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = board_from([['X', 'O', 'X'], ['X', 'O', 'O'], ['O', 'X', 'X']]);
        assert_eq!(board.winner(), None);
        assert!(board.is_full());
        assert!(board.empty_cells().is_empty());
        assert_eq!(board.outcome(), GameStatus::Draw);
    }

    #[test]
    fn test_is_full_iff_no_empty_cells() {
        let mut board = Board::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                assert_eq!(board.is_full(), board.empty_cells().is_empty());
                board.apply_move(row, col, Mark::X);
            }
        }
        assert!(board.is_full());
        assert!(board.empty_cells().is_empty());
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let board = board_from([['X', 'O', ' '], [' ', 'X', ' '], [' ', ' ', ' ']]);
        let snapshot = board;
        let _ = board.winner();
        let _ = board.is_full();
        let _ = board.empty_cells();
        let _ = board.outcome();
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_reset_round_trip() {
        let mut board = board_from([['X', 'O', 'X'], [' ', 'O', ' '], [' ', ' ', ' ']]);
        board.reset();
        assert!(!board.is_full());
        assert_eq!(board.empty_cells().len(), 9);
        assert_eq!(board.move_count(), 0);
        assert_eq!(board.outcome(), GameStatus::InProgress);
    }

    #[test]
    fn test_winning_line_endpoints() {
        let board = board_from([['O', 'X', 'X'], [' ', 'O', 'X'], [' ', ' ', 'O']]);
        let line = board.winning_line().unwrap();
        assert_eq!(line.mark, Mark::O);
        assert_eq!(line.start, Position::new(0, 0));
        assert_eq!(line.end, Position::new(2, 2));
    }
}
