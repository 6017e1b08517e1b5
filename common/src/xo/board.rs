use crate::xo::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const BOARD_SIZE: usize = 3;

#[derive(Debug)]
pub enum Coordinate {
    Row,
    Column,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Row => write!(f, "row"),
            Coordinate::Column => write!(f, "column"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PositionError {
    #[error("{0} coordinate {1} is outside the 3x3 board")]
    OutOfBounds(Coordinate, usize),
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: usize,
    column: usize,
}

// Unchecked coordinates as they arrive over the wire
#[derive(Deserialize)]
struct RawPosition {
    row: usize,
    column: usize,
}

impl TryFrom<RawPosition> for Position {
    type Error = PositionError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.row, raw.column)
    }
}

impl Position {
    // Ensure that the given position lies on the 3x3 grid
    pub fn new(row: usize, column: usize) -> Result<Self, PositionError> {
        if row >= BOARD_SIZE {
            return Err(PositionError::OutOfBounds(Coordinate::Row, row));
        }
        if column >= BOARD_SIZE {
            return Err(PositionError::OutOfBounds(Coordinate::Column, column));
        }
        Ok(Position { row, column })
    }

    // Caller guarantees both coordinates are below BOARD_SIZE
    pub(crate) const fn at(row: usize, column: usize) -> Self {
        Position { row, column }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    // All nine positions, row by row
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |column| Position { row, column }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, column {})", self.row, self.column)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Board([[Option<Player>; BOARD_SIZE]; BOARD_SIZE]);

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    pub fn get(&self, position: Position) -> Option<Player> {
        self.0[position.row][position.column]
    }

    // Unconditional write; callers that care about occupancy check first
    pub fn set(&mut self, position: Position, player: Player) {
        self.0[position.row][position.column] = Some(player);
    }

    pub fn clear(&mut self) {
        self.0 = Default::default();
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.get(position).is_some()
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|p| !self.is_occupied(*p)).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .0
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(Player::First) => "X",
                        Some(Player::Second) => "O",
                        None => ".",
                    })
                    .collect::<String>()
            })
            .collect::<Vec<String>>();
        write!(f, "{}", rows.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, column: usize) -> Position {
        Position::new(row, column).unwrap()
    }

    #[test]
    fn test_construct_position() {
        assert!(Position::new(0, 0).is_ok());
        assert!(Position::new(2, 2).is_ok());
        assert!(matches!(
            Position::new(3, 0),
            Err(PositionError::OutOfBounds(Coordinate::Row, 3))
        ));
        assert!(matches!(
            Position::new(1, 5),
            Err(PositionError::OutOfBounds(Coordinate::Column, 5))
        ));
    }

    #[test]
    fn test_all_positions() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], pos(0, 0));
        assert_eq!(all[5], pos(1, 2));
        assert_eq!(all[8], pos(2, 2));
    }

    #[test]
    fn test_set_get_clear() {
        let mut board = Board::new();
        assert_eq!(board.get(pos(1, 1)), None);
        board.set(pos(1, 1), Player::First);
        assert_eq!(board.get(pos(1, 1)), Some(Player::First));
        // set does not guard against overwriting
        board.set(pos(1, 1), Player::Second);
        assert_eq!(board.get(pos(1, 1)), Some(Player::Second));
        board.set(pos(0, 2), Player::First);
        board.clear();
        assert_eq!(board, Board::new());
        assert_eq!(board.empty_positions().len(), 9);
    }

    #[test]
    fn test_empty_positions() {
        let mut board = Board::new();
        board.set(pos(0, 0), Player::First);
        board.set(pos(2, 1), Player::Second);
        let empty = board.empty_positions();
        assert_eq!(empty.len(), 7);
        assert!(!empty.contains(&pos(0, 0)));
        assert!(!empty.contains(&pos(2, 1)));
        assert_eq!(empty[0], pos(0, 1));
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let p: Position = serde_json::from_str("{\"row\":2,\"column\":1}").unwrap();
        assert_eq!(p, pos(2, 1));
        assert!(serde_json::from_str::<Position>("{\"row\":3,\"column\":1}").is_err());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set(pos(0, 0), Player::First);
        board.set(pos(1, 1), Player::Second);
        assert_eq!(board.to_string(), "X..\n.O.\n...");
        assert_eq!(pos(2, 1).to_string(), "(row 2, column 1)");
    }
}
