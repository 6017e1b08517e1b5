use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn next(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    // Name shown on the winner label
    pub fn label(self) -> &'static str {
        match self {
            Player::First => "1st player",
            Player::Second => "2nd player",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "first"),
            Player::Second => write!(f, "second"),
        }
    }
}

// One value per player, addressed by Player instead of a raw index
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerPlayer<T>([T; 2]);

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;
    fn index(&self, index: Player) -> &Self::Output {
        match index {
            Player::First => &self.0[0],
            Player::Second => &self.0[1],
        }
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, index: Player) -> &mut Self::Output {
        match index {
            Player::First => &mut self.0[0],
            Player::Second => &mut self.0[1],
        }
    }
}

impl<T> PerPlayer<T> {
    pub fn new(first: T, second: T) -> Self {
        PerPlayer([first, second])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }
}
