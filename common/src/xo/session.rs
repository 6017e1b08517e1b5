use crate::xo::analytics::{EventSink, TracingSink};
use crate::xo::board::{Board, Position};
use crate::xo::game_state::{GameState, GameVariant, StateKind};
use crate::xo::notification::Notification;
use crate::xo::player::Player;
use crate::xo::rng::{ComputerRng, MoveRng};
use crate::xo::state_machine::StateMachine;
use tracing::info;

// What a host sees of one game: start it, feed it selections, restart it and
// collect the notifications produced along the way.
#[derive(Debug)]
pub struct Session<R: MoveRng = ComputerRng, S: EventSink = TracingSink> {
    machine: StateMachine<R, S>,
}

impl Session {
    pub fn start(variant: GameVariant) -> Self {
        Session::new(variant, ComputerRng::default(), TracingSink)
    }
}

impl<R: MoveRng, S: EventSink> Session<R, S> {
    pub fn new(variant: GameVariant, rng: R, sink: S) -> Self {
        info!(?variant, "starting game");
        let mut machine = StateMachine::new(variant, rng, sink);
        machine.enter(variant.first_state());
        Session { machine }
    }

    #[tracing::instrument(skip(self))]
    pub fn submit_selection(&mut self, position: Position) {
        self.machine.handle_selection(position);
    }

    pub fn restart(&mut self) {
        info!(variant = ?self.machine.variant(), "restarting game");
        self.machine.restart();
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.machine.take_notifications()
    }

    pub fn variant(&self) -> GameVariant {
        self.machine.variant()
    }

    pub fn board(&self) -> &Board {
        self.machine.board()
    }

    pub fn state(&self) -> Option<StateKind> {
        self.machine.current_kind()
    }

    pub fn is_over(&self) -> bool {
        self.state() == Some(StateKind::GameEnded)
    }

    pub fn winner(&self) -> Option<Player> {
        match self.machine.current() {
            Some(GameState::GameEnded { winner }) => *winner,
            _ => None,
        }
    }

    pub fn machine(&self) -> &StateMachine<R, S> {
        &self.machine
    }
}
