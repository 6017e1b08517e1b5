use hashbrown::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use warp::ws::Message;

#[derive(Error, Debug)]
#[error("Error sending message")]
pub struct SendError;

pub type Clients = Arc<RwLock<HashMap<String, Client>>>;

// A client drives at most one game session at a time
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    InGame { uuid: String },
    Idle,
}

#[derive(Debug, Clone)]
pub struct Sender(pub mpsc::UnboundedSender<Result<Message, warp::Error>>);

#[derive(Debug, Clone)]
pub struct Client {
    pub user_id: usize,
    pub status: Status,
    pub sender: Option<Sender>,
}

impl Client {
    pub fn new(user_id: usize) -> Self {
        Client {
            user_id,
            status: Status::Idle,
            sender: None,
        }
    }

    // Drops the client back to Idle, returning the game it was playing
    pub fn leave_game(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.status, Status::Idle) {
            Status::InGame { uuid } => Some(uuid),
            Status::Idle => None,
        }
    }
}

pub trait SendMsg {
    fn send(&self, msg: &str) -> Result<(), SendError>;
}

impl SendMsg for Sender {
    fn send(&self, msg: &str) -> Result<(), SendError> {
        self.0.send(Ok(Message::text(msg))).map_err(|_| SendError)
    }
}
