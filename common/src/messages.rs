use crate::xo::{GameVariant, Notification};
use serde::{Deserialize, Serialize};

// Client to server
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub enum Request {
    Start { variant: GameVariant },
    Select { row: usize, column: usize },
    Restart,
    Leave,
}

// Server to client
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub enum Response {
    Started { variant: GameVariant },
    Notification(Notification),
    Rejected { reason: String },
}
