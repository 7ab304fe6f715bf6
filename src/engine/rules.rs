//! Win/draw detection. Pure functions of the board.

use crate::engine::models::*;

const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // cols
    [0, 4, 8], [2, 4, 6],             // diagonals
];

/// Returns the mark owning a completed line, scanning lines in a fixed order.
pub fn check_winner(board: &Board) -> Option<Mark> {
    let cells = board.cells();
    for line in &WIN_LINES {
        let a = cells[line[0]];
        if a.is_some() && a == cells[line[1]] && a == cells[line[2]] {
            return a;
        }
    }
    None
}

pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| c.is_some())
}

/// Derives the game result: a win takes precedence over a full board.
pub fn evaluate(board: &Board) -> GameResult {
    if let Some(mark) = check_winner(board) {
        return GameResult::win_for(mark);
    }
    if is_full(board) {
        return GameResult::Draw;
    }
    GameResult::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(layout: &str) -> Board {
        let mut board = Board::new();
        let marks: Vec<char> = layout.chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(marks.len(), NUM_CELLS);
        for (i, ch) in marks.into_iter().enumerate() {
            let cell = match ch {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                _ => None,
            };
            board.set(Position::from_index(i).unwrap(), cell);
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
        assert_eq!(evaluate(&Board::new()), GameResult::InProgress);
    }

    #[test]
    fn test_every_line_wins() {
        for line in &WIN_LINES {
            for mark in [Mark::X, Mark::O] {
                let mut board = Board::new();
                for &i in line {
                    board.set(Position::from_index(i).unwrap(), Some(mark));
                }
                assert_eq!(check_winner(&board), Some(mark), "line {:?}", line);
                assert_eq!(evaluate(&board), GameResult::win_for(mark));
            }
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_from("XXO ... ...");
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = board_from("XOX XOO OXX");
        assert_eq!(check_winner(&board), None);
        assert!(is_full(&board));
        assert_eq!(evaluate(&board), GameResult::Draw);
    }

    #[test]
    fn test_win_on_last_cell_beats_draw() {
        let board = board_from("XOX OXO OXX");
        assert!(is_full(&board));
        assert_eq!(evaluate(&board), GameResult::XWins);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let board = board_from("OOO XX. X..");
        let first = evaluate(&board);
        assert_eq!(first, GameResult::OWins);
        assert_eq!(evaluate(&board), first);
        assert_eq!(board, board_from("OOO XX. X.."));
    }
}
