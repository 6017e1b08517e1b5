use crate::xo::board::{Board, Position, BOARD_SIZE};
use crate::xo::player::Player;

type Line = [Position; BOARD_SIZE];

const fn line(cells: [(usize, usize); BOARD_SIZE]) -> Line {
    [
        Position::at(cells[0].0, cells[0].1),
        Position::at(cells[1].0, cells[1].1),
        Position::at(cells[2].0, cells[2].1),
    ]
}

const WINNING_LINES: [Line; 8] = [
    // Rows
    line([(0, 0), (0, 1), (0, 2)]),
    line([(1, 0), (1, 1), (1, 2)]),
    line([(2, 0), (2, 1), (2, 2)]),
    // Columns
    line([(0, 0), (1, 0), (2, 0)]),
    line([(0, 1), (1, 1), (2, 1)]),
    line([(0, 2), (1, 2), (2, 2)]),
    // Diagonals
    line([(0, 0), (1, 1), (2, 2)]),
    line([(0, 2), (1, 1), (2, 0)]),
];

// Returns the owner of the first fully owned line. A drawn board and a board
// still in progress both give None.
pub fn determine_winner(board: &Board) -> Option<Player> {
    WINNING_LINES.iter().find_map(|line| line_owner(board, line))
}

fn line_owner(board: &Board, line: &Line) -> Option<Player> {
    let mut cells = line.iter().map(|p| board.get(*p));
    let owner = cells.next()??;
    cells.all(|cell| cell == Some(owner)).then_some(owner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(usize, usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(row, column, player) in cells {
            board.set(Position::new(row, column).unwrap(), player);
        }
        board
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(determine_winner(&Board::new()), None);
    }

    #[test]
    fn test_every_line_wins_for_either_player() {
        for player in [Player::First, Player::Second] {
            for line in WINNING_LINES.iter() {
                let mut board = Board::new();
                for position in line {
                    board.set(*position, player);
                }
                assert_eq!(board.empty_positions().len(), 6);
                assert_eq!(determine_winner(&board), Some(player), "line {:?}", line);
            }
        }
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board = board_with(&[
            (0, 0, Player::First),
            (0, 1, Player::Second),
            (0, 2, Player::First),
        ]);
        assert_eq!(determine_winner(&board), None);
    }

    #[test]
    fn test_full_board_draw() {
        // X O X
        // X O O
        // O X X
        let board = board_with(&[
            (0, 0, Player::First),
            (0, 1, Player::Second),
            (0, 2, Player::First),
            (1, 0, Player::First),
            (1, 1, Player::Second),
            (1, 2, Player::Second),
            (2, 0, Player::Second),
            (2, 1, Player::First),
            (2, 2, Player::First),
        ]);
        assert!(board.empty_positions().is_empty());
        assert_eq!(determine_winner(&board), None);
    }

    #[test]
    fn test_first_complete_line_is_reported() {
        // Both players own a line; rows are checked before columns
        let board = board_with(&[
            (1, 0, Player::Second),
            (1, 1, Player::Second),
            (1, 2, Player::Second),
            (0, 2, Player::First),
            (2, 2, Player::First),
        ]);
        assert_eq!(determine_winner(&board), Some(Player::Second));
    }
}
