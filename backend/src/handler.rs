use crate::{
    client::{Client, Clients},
    game::Games,
    ws,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use warp::{http::StatusCode, reply::json, Rejection, Reply};

type Result<T> = std::result::Result<T, Rejection>;

#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    user_id: usize,
}

#[derive(Serialize, Debug)]
pub struct RegisterResponse {
    url: String,
}

pub async fn register_handler(
    body: RegisterRequest,
    clients: Clients,
    ws_base_url: String,
) -> Result<impl Reply> {
    let uuid = Uuid::new_v4().as_simple().to_string();
    info!("registering user {} as {}", body.user_id, uuid);

    clients
        .write()
        .await
        .insert(uuid.clone(), Client::new(body.user_id));
    Ok(json(&RegisterResponse {
        url: format!("{}/{}", ws_base_url, uuid),
    }))
}

pub async fn unregister_handler(id: String, clients: Clients, games: Games) -> Result<impl Reply> {
    if let Some(mut client) = clients.write().await.remove(&id) {
        if let Some(uuid) = client.leave_game() {
            games.write().await.remove(&uuid);
        }
    }
    Ok(StatusCode::OK)
}

pub async fn ws_handler(
    ws: warp::ws::Ws,
    id: String,
    clients: Clients,
    games: Games,
) -> Result<impl Reply> {
    let client = clients.read().await.get(&id).cloned();
    match client {
        Some(c) => {
            Ok(ws.on_upgrade(move |socket| ws::client_connection(socket, id, clients, c, games)))
        }
        None => Err(warp::reject::not_found()),
    }
}

pub async fn health_handler() -> Result<impl Reply> {
    Ok(StatusCode::OK)
}
