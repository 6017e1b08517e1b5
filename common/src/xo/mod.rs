mod analytics;
mod board;
mod command;
mod game_state;
mod notification;
mod player;
mod referee;
mod rng;
mod session;
mod state_machine;

pub use analytics::{Event, EventBatcher, EventSink, TracingSink, EVENT_BATCH_SIZE};
pub use board::{Board, Coordinate, Position, PositionError, BOARD_SIZE};
pub use command::{ApplyContext, Command, CommandBatcher, Replay, FIVE_STEPS_MOVES};
pub use game_state::{FiveStepsTurn, GameState, GameVariant, StateKind, Turn, VariantError};
pub use notification::Notification;
pub use player::{PerPlayer, Player};
pub use referee::determine_winner;
pub use rng::{ComputerRng, MoveRng};
pub use session::Session;
pub use state_machine::StateMachine;
