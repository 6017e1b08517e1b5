use crate::xo::analytics::{Event, EventBatcher, EventSink};
use crate::xo::board::{Board, Position};
use crate::xo::notification::Notification;
use crate::xo::player::{PerPlayer, Player};
use tracing::{debug, warn};

pub const FIVE_STEPS_MOVES: usize = 5;

// Everything a move touches when it lands on the board. Borrowed from the
// session for the duration of one placement or one replay pass.
pub struct ApplyContext<'a, S: EventSink> {
    pub board: &'a mut Board,
    pub events: &'a mut EventBatcher<S>,
    pub notifications: &'a mut Vec<Notification>,
}

impl<'a, S: EventSink> ApplyContext<'a, S> {
    pub fn place_mark(&mut self, player: Player, position: Position) {
        self.board.set(position, player);
        self.notifications
            .push(Notification::MarkPlaced { player, position });
        self.events.record(Event::MarkPlaced(player, position));
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Command {
    player: Player,
    position: Position,
}

impl Command {
    pub fn new(player: Player, position: Position) -> Self {
        Command { player, position }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn position(&self) -> Position {
        self.position
    }

    // Does not look at occupancy: a command chosen blind overwrites whatever
    // an earlier command of the same pass wrote there.
    pub fn execute<S: EventSink>(&self, ctx: &mut ApplyContext<'_, S>) {
        if ctx.board.is_occupied(self.position) {
            ctx.notifications
                .push(Notification::MarkRemoved(self.position));
        }
        ctx.place_mark(self.player, self.position);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Replay {
    Completed { executed: usize },
    // Sequences had different lengths. Nothing ran and nothing was cleared.
    Skipped,
}

#[derive(Debug, Default)]
pub struct CommandBatcher {
    commands: PerPlayer<Vec<Command>>,
    executed: usize,
}

impl CommandBatcher {
    pub fn new() -> Self {
        CommandBatcher::default()
    }

    // Queues a command for its player. Returns false once that player has
    // already committed all of their moves.
    pub fn push(&mut self, command: Command) -> bool {
        let queue = &mut self.commands[command.player()];
        if queue.len() >= FIVE_STEPS_MOVES {
            warn!(
                "{} already committed {} moves, dropping move at {}",
                command.player(),
                FIVE_STEPS_MOVES,
                command.position()
            );
            return false;
        }
        queue.push(command);
        true
    }

    pub fn commands(&self, player: Player) -> &[Command] {
        &self.commands[player]
    }

    pub fn is_ready(&self) -> bool {
        self.commands
            .iter()
            .all(|queue| queue.len() == FIVE_STEPS_MOVES)
    }

    pub fn executed(&self) -> usize {
        self.executed
    }

    pub fn clear(&mut self) {
        self.commands.iter_mut().for_each(Vec::clear);
        self.executed = 0;
    }

    // Applies first[0], second[0], first[1], second[1], ... in that order
    pub fn replay<S: EventSink>(&mut self, ctx: &mut ApplyContext<'_, S>) -> Replay {
        self.executed = 0;
        let first = &self.commands[Player::First];
        let second = &self.commands[Player::Second];
        if first.len() != second.len() {
            warn!(
                "skipping replay of unbalanced batch: {} first vs {} second",
                first.len(),
                second.len()
            );
            return Replay::Skipped;
        }
        for (a, b) in first.iter().zip(second.iter()) {
            a.execute(ctx);
            self.executed += 1;
            b.execute(ctx);
            self.executed += 1;
        }
        let executed = self.executed;
        debug!("replayed {} commands", executed);
        self.clear();
        Replay::Completed { executed }
    }
}
