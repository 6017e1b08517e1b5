use crate::xo::board::Position;
use crate::xo::player::Player;
use serde::{Deserialize, Serialize};

// Outward effects for whatever renders the game
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Notification {
    TurnChanged(Player),
    MarkPlaced { player: Player, position: Position },
    // A replayed move is about to cover an existing mark
    MarkRemoved(Position),
    GameEnded {
        winner: Option<Player>,
        message: String,
    },
}

impl Notification {
    pub fn game_ended(winner: Option<Player>) -> Self {
        let message = match winner {
            Some(player) => format!("{} win", player.label()),
            None => "No winner".to_string(),
        };
        Notification::GameEnded { winner, message }
    }
}
