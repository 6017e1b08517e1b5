use crate::client::SendMsg;
use crate::util;
use common::{
    messages::{Request, Response},
    ComputerRng, EventSink, GameVariant, MoveRng, Position, Session, TracingSink,
};
use hashbrown::HashMap;
use serde::Serialize;
use serde_json::from_str;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub type Games = Arc<RwLock<HashMap<String, Game>>>;

// One client's game. Every session is private to the client that started it.
#[derive(Debug)]
pub struct Game<R: MoveRng + Default = ComputerRng, S: EventSink + Default = TracingSink> {
    session: Session<R, S>,
    left: bool,
}

impl<R: MoveRng + Default, S: EventSink + Default> Game<R, S> {
    pub fn start(variant: GameVariant, client: &impl SendMsg) -> Self {
        let mut game = Game {
            session: Session::new(variant, R::default(), S::default()),
            left: false,
        };
        send_message(client, Response::Started { variant });
        game.send_notifications(client);
        game
    }

    pub fn is_over(&self) -> bool {
        self.left
    }

    pub fn session(&self) -> &Session<R, S> {
        &self.session
    }

    pub fn handle_message(&mut self, msg: &str, client: &impl SendMsg) {
        let request: Request = match from_str(msg) {
            Ok(request) => request,
            Err(err) => {
                warn!("Failed to deserialize input into game request: {}", err);
                reject(client, err);
                return;
            }
        };
        match request {
            Request::Start { variant } => {
                info!(?variant, "replacing running game");
                self.session = Session::new(variant, R::default(), S::default());
                send_message(client, Response::Started { variant });
            }
            Request::Select { row, column } => match Position::new(row, column) {
                Ok(position) => self.session.submit_selection(position),
                Err(err) => {
                    warn!("Invalid selection: {}", err);
                    reject(client, err);
                    return;
                }
            },
            Request::Restart => self.session.restart(),
            // Let ws module handle removing the game
            Request::Leave => {
                self.left = true;
                return;
            }
        }
        self.send_notifications(client);
    }

    fn send_notifications(&mut self, client: &impl SendMsg) {
        for notification in self.session.drain_notifications() {
            send_message(client, Response::Notification(notification));
        }
    }
}

pub fn reject(client: &impl SendMsg, reason: impl ToString) {
    send_message(
        client,
        Response::Rejected {
            reason: reason.to_string(),
        },
    );
}

pub fn send_message<M: Serialize + Debug>(client: &impl SendMsg, message: M) {
    let text = match serde_json::to_string(&message) {
        Ok(text) => text,
        Err(err) => {
            warn!("Failed to serialize {:?}: {}", message, err);
            return;
        }
    };
    // If the message fails to send even after retries, there's not much we can do but proceed
    let _ = util::retry(1, || client.send(&text));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SendError;
    use common::{Notification, Player, StateKind};
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockSender {
        sent: RefCell<Vec<Response>>,
    }

    impl SendMsg for MockSender {
        fn send(&self, msg: &str) -> Result<(), SendError> {
            let response = serde_json::from_str(msg).map_err(|_| SendError)?;
            self.sent.borrow_mut().push(response);
            Ok(())
        }
    }

    impl MockSender {
        fn take(&self) -> Vec<Response> {
            self.sent.take()
        }
    }

    #[derive(Debug, Default)]
    struct MockRng;

    impl MoveRng for MockRng {
        fn pick<T, I: Iterator<Item = T> + Sized>(&mut self, mut iter: I) -> Option<T> {
            iter.next()
        }
    }

    #[derive(Debug, Default)]
    struct MockSink;

    impl EventSink for MockSink {
        fn flush(&mut self, _messages: Vec<String>) {}
    }

    type TestGame = Game<MockRng, MockSink>;

    fn select(row: usize, column: usize) -> String {
        format!("{{\"Select\":{{\"row\":{},\"column\":{}}}}}", row, column)
    }

    #[test]
    fn test_start_sends_first_turn() {
        let sender = MockSender::default();
        let game = TestGame::start(GameVariant::HumanVsHuman, &sender);
        assert_eq!(
            sender.take(),
            vec![
                Response::Started {
                    variant: GameVariant::HumanVsHuman
                },
                Response::Notification(Notification::TurnChanged(Player::First)),
            ]
        );
        assert!(!game.is_over());
    }

    #[test]
    fn test_handle_invalid_message() {
        let sender = MockSender::default();
        let mut game = TestGame::start(GameVariant::HumanVsHuman, &sender);
        sender.take();
        game.handle_message("foo", &sender);
        assert!(matches!(sender.take().as_slice(), [Response::Rejected { .. }]));
        assert_eq!(game.session().state(), Some(StateKind::FirstPlayerTurn));
    }

    #[test]
    fn test_handle_out_of_range_selection() {
        let sender = MockSender::default();
        let mut game = TestGame::start(GameVariant::HumanVsHuman, &sender);
        sender.take();
        game.handle_message(&select(3, 0), &sender);
        assert!(matches!(sender.take().as_slice(), [Response::Rejected { .. }]));
        assert_eq!(game.session().board().empty_positions().len(), 9);
    }

    #[test]
    fn test_handle_selection_messages() {
        let sender = MockSender::default();
        let mut game = TestGame::start(GameVariant::HumanVsComputer, &sender);
        sender.take();
        game.handle_message(&select(1, 1), &sender);
        let position = |r, c| Position::new(r, c).unwrap();
        assert_eq!(
            sender.take(),
            vec![
                Response::Notification(Notification::MarkPlaced {
                    player: Player::First,
                    position: position(1, 1),
                }),
                Response::Notification(Notification::TurnChanged(Player::Second)),
                Response::Notification(Notification::MarkPlaced {
                    player: Player::Second,
                    position: position(0, 0),
                }),
                Response::Notification(Notification::TurnChanged(Player::First)),
            ]
        );
    }

    #[test]
    fn test_handle_game_end_and_restart() {
        let sender = MockSender::default();
        let mut game = TestGame::start(GameVariant::HumanVsHuman, &sender);
        for (row, column) in [(0, 0), (1, 1), (0, 1), (1, 2), (0, 2)] {
            game.handle_message(&select(row, column), &sender);
        }
        let sent = sender.take();
        assert_eq!(
            sent.last(),
            Some(&Response::Notification(Notification::GameEnded {
                winner: Some(Player::First),
                message: "1st player win".to_string(),
            }))
        );
        game.handle_message("\"Restart\"", &sender);
        assert_eq!(
            sender.take(),
            vec![Response::Notification(Notification::TurnChanged(
                Player::First
            ))]
        );
        assert_eq!(game.session().board().empty_positions().len(), 9);
    }

    #[test]
    fn test_handle_leave_message() {
        let sender = MockSender::default();
        let mut game = TestGame::start(GameVariant::FiveSteps, &sender);
        sender.take();
        game.handle_message("\"Leave\"", &sender);
        assert!(game.is_over());
        assert!(sender.take().is_empty());
    }
}
