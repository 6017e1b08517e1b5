use crate::client::{Client, Clients, Status};
use crate::game::{self, Game, Games};
use common::messages::Request;
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{error, info, warn};
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

pub async fn client_connection(
    ws: WebSocket,
    id: String,
    clients: Clients,
    mut client: Client,
    games: Games,
) {
    let (client_ws_sender, mut client_ws_rcv) = ws.split();
    let (client_sender, client_rcv) = mpsc::unbounded_channel();

    let client_rcv = UnboundedReceiverStream::new(client_rcv);
    tokio::task::spawn(client_rcv.forward(client_ws_sender).map(|result| {
        if let Err(e) = result {
            error!("error sending websocket msg: {}", e);
        }
    }));

    client.sender = Some(crate::client::Sender(client_sender));
    clients.write().await.insert(id.clone(), client);

    info!("{} connected", id);

    while let Some(result) = client_ws_rcv.next().await {
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                error!("error receiving ws message for id {}: {}", id, e);
                break;
            }
        };
        client_msg(&id, msg, &clients, &games).await;
    }

    // A session lives only as long as the connection that started it
    if let Some(mut client) = clients.write().await.remove(&id) {
        if let Some(uuid) = client.leave_game() {
            games.write().await.remove(&uuid);
            info!("dropped game {} of {}", uuid, id);
        }
    }
    info!("{} disconnected", id);
}

#[tracing::instrument(skip(clients, games))]
async fn client_msg(id: &str, msg: Message, clients: &Clients, games: &Games) {
    info!("received message from {}: {:?}", id, msg);
    let message = match msg.to_str() {
        Ok(v) => v.trim(),
        Err(_) => return,
    };

    if message == "ping" {
        return;
    }

    let mut clients_map = clients.write().await;
    let client = match clients_map.get_mut(id) {
        Some(v) => v,
        None => {
            error!(
                "Message from client {} did not match any connected clients",
                id
            );
            return;
        }
    };
    let sender = match &client.sender {
        Some(sender) => sender.clone(),
        None => {
            error!("Client {} has no open connection", id);
            return;
        }
    };
    match &client.status {
        Status::InGame { uuid } => {
            let uuid = uuid.clone();
            let mut games_map = games.write().await;
            let game = match games_map.get_mut(&uuid) {
                Some(v) => v,
                None => {
                    error!("Game with ID {} did not match any existing games", uuid);
                    client.status = Status::Idle;
                    return;
                }
            };
            game.handle_message(message, &sender);
            if game.is_over() {
                info!("client {} left game {}", id, uuid);
                client.status = Status::Idle;
                games_map.remove(&uuid);
            }
        }
        Status::Idle => match serde_json::from_str::<Request>(message) {
            Ok(Request::Start { variant }) => {
                let uuid = Uuid::new_v4().as_simple().to_string();
                info!("client {} starting {:?} game {}", id, variant, uuid);
                games
                    .write()
                    .await
                    .insert(uuid.clone(), Game::start(variant, &sender));
                client.status = Status::InGame { uuid };
            }
            Ok(request) => {
                warn!("client {} sent {:?} without a running game", id, request);
                game::reject(&sender, "No game running, send Start first");
            }
            Err(err) => {
                warn!("Failed to deserialize input into game request: {}", err);
                game::reject(&sender, err);
            }
        },
    }
}
