use crate::xo::analytics::{Event, EventBatcher, EventSink};
use crate::xo::board::{Board, Position};
use crate::xo::command::{ApplyContext, Command, CommandBatcher, Replay, FIVE_STEPS_MOVES};
use crate::xo::game_state::{GameState, GameVariant, StateKind, Turn};
use crate::xo::notification::Notification;
use crate::xo::player::Player;
use crate::xo::referee;
use crate::xo::rng::MoveRng;
use tracing::{debug, info};

/// Drives one game: owns the current state together with everything the
/// states act on (board, deferred commands, analytics, the computer's RNG).
///
/// Every transition goes through [`StateMachine::enter`], which checks the
/// current state's validity rules and then runs the entry behavior of the new
/// state. Entry behaviors may enter further states (the computer answering a
/// move, a five-steps turn handing over to the replay), so one selection can
/// walk through several states before the call returns.
#[derive(Debug)]
pub struct StateMachine<R: MoveRng, S: EventSink> {
    variant: GameVariant,
    current: Option<GameState>,
    board: Board,
    commands: CommandBatcher,
    events: EventBatcher<S>,
    rng: R,
    notifications: Vec<Notification>,
}

impl<R: MoveRng, S: EventSink> StateMachine<R, S> {
    /// Creates a machine with no current state. Nothing happens until the
    /// variant's first state is entered.
    pub fn new(variant: GameVariant, rng: R, sink: S) -> Self {
        StateMachine {
            variant,
            current: None,
            board: Board::new(),
            commands: CommandBatcher::new(),
            events: EventBatcher::new(sink),
            rng,
            notifications: Vec::new(),
        }
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn current(&self) -> Option<&GameState> {
        self.current.as_ref()
    }

    pub fn current_kind(&self) -> Option<StateKind> {
        self.current.map(|s| s.kind())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn commands(&self) -> &CommandBatcher {
        &self.commands
    }

    pub fn events(&self) -> &EventBatcher<S> {
        &self.events
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Moves to `target` if the variant registers it and the current state
    /// allows it. Returns whether the transition happened.
    pub fn enter(&mut self, target: StateKind) -> bool {
        let allowed = match self.current {
            None => target == self.variant.first_state(),
            Some(state) => state.kind().is_valid_next_state(target),
        };
        if !allowed || !self.variant.states().contains(&target) {
            debug!(from = ?self.current_kind(), to = ?target, "rejected transition");
            return false;
        }
        let previous = self.current.replace(GameState::new(target));
        debug!(from = ?previous.map(|s| s.kind()), to = ?target, "entered state");
        self.did_enter(previous);
        true
    }

    /// Forwards a selection to the current state if it takes input.
    pub fn handle_selection(&mut self, position: Position) {
        match self.current_kind() {
            Some(kind) if kind.accepts_input() => self.add_mark(position),
            kind => debug!(state = ?kind, %position, "selection ignored"),
        }
    }

    /// Clears the board and any committed moves and starts over from the
    /// variant's first state.
    pub fn restart(&mut self) {
        self.board.clear();
        self.commands.clear();
        let first = self.variant.first_state();
        if !self.enter(first) {
            // Mid-game restart from a state that cannot hand over to the
            // first state directly
            debug!(from = ?self.current_kind(), "forcing restart");
            self.current = None;
            self.enter(first);
        }
    }

    fn did_enter(&mut self, previous: Option<GameState>) {
        let Some(current) = self.current else {
            return;
        };
        match current {
            GameState::FirstPlayerTurn(turn) | GameState::SecondPlayerTurn(turn) => {
                self.begin_turn(turn.player)
            }
            GameState::ComputerTurn(turn) => {
                self.begin_turn(turn.player);
                self.play_computer_move();
            }
            GameState::FirstPlayerFiveStepsTurn(s) | GameState::SecondPlayerFiveStepsTurn(s) => {
                self.begin_turn(s.turn.player);
                if self.commands.is_ready() {
                    self.enter(StateKind::BatchExecution);
                }
            }
            GameState::BatchExecution { .. } => self.execute_batch(),
            GameState::GameEnded { .. } => self.end_game(previous),
        }
    }

    fn begin_turn(&mut self, player: Player) {
        self.notifications.push(Notification::TurnChanged(player));
    }

    fn add_mark(&mut self, position: Position) {
        match self.current {
            Some(GameState::FirstPlayerTurn(turn))
            | Some(GameState::SecondPlayerTurn(turn))
            | Some(GameState::ComputerTurn(turn)) => self.place_mark(turn, position),
            Some(GameState::FirstPlayerFiveStepsTurn(s))
            | Some(GameState::SecondPlayerFiveStepsTurn(s)) => {
                self.commit_move(s.turn.player, position)
            }
            _ => {}
        }
    }

    fn place_mark(&mut self, turn: Turn, position: Position) {
        if self.board.is_occupied(position) {
            debug!(player = %turn.player, %position, "position already taken");
            return;
        }
        ApplyContext {
            board: &mut self.board,
            events: &mut self.events,
            notifications: &mut self.notifications,
        }
        .place_mark(turn.player, position);

        match referee::determine_winner(&self.board) {
            Some(winner) => {
                if let Some(current) = self.current.as_mut().and_then(GameState::turn_mut) {
                    current.is_winner = winner == turn.player;
                }
                self.enter(StateKind::GameEnded);
            }
            None => {
                self.enter(self.variant.turn_state(turn.player.next()));
            }
        }
    }

    fn play_computer_move(&mut self) {
        let empty = self.board.empty_positions();
        match self.rng.pick(empty.into_iter()) {
            Some(position) => {
                debug!(%position, "computer picked a position");
                self.handle_selection(position);
            }
            None => debug!("no empty position left for the computer"),
        }
    }

    // Five-steps turns queue the move instead of touching the board
    fn commit_move(&mut self, player: Player, position: Position) {
        self.commands.push(Command::new(player, position));
        let submitted = match self.current.as_mut() {
            Some(GameState::FirstPlayerFiveStepsTurn(s))
            | Some(GameState::SecondPlayerFiveStepsTurn(s)) => {
                s.submitted += 1;
                s.submitted
            }
            _ => return,
        };
        if submitted == FIVE_STEPS_MOVES {
            self.enter(self.variant.turn_state(player.next()));
        }
    }

    fn execute_batch(&mut self) {
        let mut ctx = ApplyContext {
            board: &mut self.board,
            events: &mut self.events,
            notifications: &mut self.notifications,
        };
        match self.commands.replay(&mut ctx) {
            Replay::Completed { executed } => {
                let winner = referee::determine_winner(&self.board);
                debug!(executed, ?winner, "batch executed");
                self.current = Some(GameState::BatchExecution { winner });
                self.enter(StateKind::GameEnded);
            }
            // Left in BatchExecution with the commands still queued
            Replay::Skipped => {}
        }
    }

    fn end_game(&mut self, previous: Option<GameState>) {
        let winner = previous.and_then(|s| s.resolved_winner());
        self.current = Some(GameState::GameEnded { winner });
        match winner {
            Some(player) => {
                info!(winner = %player, "game ended");
                self.events.record(Event::PlayerWon(player));
            }
            None => info!("game ended with no winner"),
        }
        self.notifications.push(Notification::game_ended(winner));
    }
}
