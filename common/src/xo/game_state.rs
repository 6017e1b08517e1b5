use crate::xo::player::Player;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Unknown game variant {0:?}, expected humanVsHuman, humanVsComputer or fiveSteps")]
pub struct VariantError(String);

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GameVariant {
    HumanVsHuman,
    HumanVsComputer,
    FiveSteps,
}

impl GameVariant {
    pub fn first_state(self) -> StateKind {
        match self {
            GameVariant::HumanVsHuman | GameVariant::HumanVsComputer => StateKind::FirstPlayerTurn,
            GameVariant::FiveSteps => StateKind::FirstPlayerFiveStepsTurn,
        }
    }

    // The states a machine running this variant may ever be in
    pub fn states(self) -> &'static [StateKind] {
        use StateKind::*;
        match self {
            GameVariant::HumanVsHuman => &[FirstPlayerTurn, SecondPlayerTurn, GameEnded],
            GameVariant::HumanVsComputer => &[FirstPlayerTurn, ComputerTurn, GameEnded],
            GameVariant::FiveSteps => &[
                FirstPlayerFiveStepsTurn,
                SecondPlayerFiveStepsTurn,
                BatchExecution,
                GameEnded,
            ],
        }
    }

    // Turn state in which `player` chooses their next move
    pub fn turn_state(self, player: Player) -> StateKind {
        match (self, player) {
            (GameVariant::FiveSteps, Player::First) => StateKind::FirstPlayerFiveStepsTurn,
            (GameVariant::FiveSteps, Player::Second) => StateKind::SecondPlayerFiveStepsTurn,
            (_, Player::First) => StateKind::FirstPlayerTurn,
            (GameVariant::HumanVsComputer, Player::Second) => StateKind::ComputerTurn,
            (GameVariant::HumanVsHuman, Player::Second) => StateKind::SecondPlayerTurn,
        }
    }
}

impl FromStr for GameVariant {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "humanVsHuman" => Ok(GameVariant::HumanVsHuman),
            "humanVsComputer" => Ok(GameVariant::HumanVsComputer),
            "fiveSteps" => Ok(GameVariant::FiveSteps),
            other => Err(VariantError(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum StateKind {
    FirstPlayerTurn,
    SecondPlayerTurn,
    ComputerTurn,
    FirstPlayerFiveStepsTurn,
    SecondPlayerFiveStepsTurn,
    BatchExecution,
    GameEnded,
}

impl StateKind {
    // Whether the state takes position selections
    pub fn accepts_input(self) -> bool {
        !matches!(self, StateKind::BatchExecution | StateKind::GameEnded)
    }

    pub fn player(self) -> Option<Player> {
        use StateKind::*;
        match self {
            FirstPlayerTurn | FirstPlayerFiveStepsTurn => Some(Player::First),
            SecondPlayerTurn | ComputerTurn | SecondPlayerFiveStepsTurn => Some(Player::Second),
            BatchExecution | GameEnded => None,
        }
    }

    pub fn is_valid_next_state(self, target: StateKind) -> bool {
        use StateKind::*;
        match self {
            // Re-entering the first state is how a finished game restarts
            GameEnded => matches!(target, FirstPlayerTurn | FirstPlayerFiveStepsTurn),
            FirstPlayerTurn => matches!(target, SecondPlayerTurn | ComputerTurn | GameEnded),
            SecondPlayerTurn | ComputerTurn => matches!(target, FirstPlayerTurn | GameEnded),
            FirstPlayerFiveStepsTurn => {
                matches!(target, SecondPlayerFiveStepsTurn | BatchExecution | GameEnded)
            }
            SecondPlayerFiveStepsTurn => {
                matches!(target, FirstPlayerFiveStepsTurn | BatchExecution | GameEnded)
            }
            BatchExecution => target == GameEnded,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Turn {
    pub player: Player,
    pub is_winner: bool,
}

impl Turn {
    fn new(player: Player) -> Self {
        Turn {
            player,
            is_winner: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FiveStepsTurn {
    pub turn: Turn,
    pub submitted: usize,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GameState {
    FirstPlayerTurn(Turn),
    SecondPlayerTurn(Turn),
    ComputerTurn(Turn),
    FirstPlayerFiveStepsTurn(FiveStepsTurn),
    SecondPlayerFiveStepsTurn(FiveStepsTurn),
    BatchExecution { winner: Option<Player> },
    GameEnded { winner: Option<Player> },
}

impl GameState {
    // Fresh data for a state that is being entered
    pub fn new(kind: StateKind) -> Self {
        let five_steps = |player| FiveStepsTurn {
            turn: Turn::new(player),
            submitted: 0,
        };
        match kind {
            StateKind::FirstPlayerTurn => GameState::FirstPlayerTurn(Turn::new(Player::First)),
            StateKind::SecondPlayerTurn => GameState::SecondPlayerTurn(Turn::new(Player::Second)),
            StateKind::ComputerTurn => GameState::ComputerTurn(Turn::new(Player::Second)),
            StateKind::FirstPlayerFiveStepsTurn => {
                GameState::FirstPlayerFiveStepsTurn(five_steps(Player::First))
            }
            StateKind::SecondPlayerFiveStepsTurn => {
                GameState::SecondPlayerFiveStepsTurn(five_steps(Player::Second))
            }
            StateKind::BatchExecution => GameState::BatchExecution { winner: None },
            StateKind::GameEnded => GameState::GameEnded { winner: None },
        }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            GameState::FirstPlayerTurn(_) => StateKind::FirstPlayerTurn,
            GameState::SecondPlayerTurn(_) => StateKind::SecondPlayerTurn,
            GameState::ComputerTurn(_) => StateKind::ComputerTurn,
            GameState::FirstPlayerFiveStepsTurn(_) => StateKind::FirstPlayerFiveStepsTurn,
            GameState::SecondPlayerFiveStepsTurn(_) => StateKind::SecondPlayerFiveStepsTurn,
            GameState::BatchExecution { .. } => StateKind::BatchExecution,
            GameState::GameEnded { .. } => StateKind::GameEnded,
        }
    }

    pub fn turn(&self) -> Option<&Turn> {
        match self {
            GameState::FirstPlayerTurn(turn)
            | GameState::SecondPlayerTurn(turn)
            | GameState::ComputerTurn(turn) => Some(turn),
            GameState::FirstPlayerFiveStepsTurn(s) | GameState::SecondPlayerFiveStepsTurn(s) => {
                Some(&s.turn)
            }
            GameState::BatchExecution { .. } | GameState::GameEnded { .. } => None,
        }
    }

    pub fn turn_mut(&mut self) -> Option<&mut Turn> {
        match self {
            GameState::FirstPlayerTurn(turn)
            | GameState::SecondPlayerTurn(turn)
            | GameState::ComputerTurn(turn) => Some(turn),
            GameState::FirstPlayerFiveStepsTurn(s) | GameState::SecondPlayerFiveStepsTurn(s) => {
                Some(&mut s.turn)
            }
            GameState::BatchExecution { .. } | GameState::GameEnded { .. } => None,
        }
    }

    // Winner this state hands over to GameEnded
    pub fn resolved_winner(&self) -> Option<Player> {
        match self {
            GameState::BatchExecution { winner } | GameState::GameEnded { winner } => *winner,
            other => other
                .turn()
                .filter(|turn| turn.is_winner)
                .map(|turn| turn.player),
        }
    }
}
