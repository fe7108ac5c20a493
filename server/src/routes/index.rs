use rocket::serde::json::Json;
use rocket::Route;
use rocket::State;

use crate::app_state::AppState;
use crate::routes::{reply, with_queue, StatusReply};
use rocket::http::Status;

#[derive(serde::Serialize)]
pub struct IndexResponse {
    length: usize,
    now_playing: Option<String>,
    queue_url: Option<String>,
    songlist_url: Option<String>,
}

#[get("/")]
pub async fn index(app_state: &State<AppState>) -> Result<Json<IndexResponse>, Status> {
    let (length, now_playing, queue_url) = with_queue(app_state, |request_queue| {
        let now_playing = request_queue
            .first()
            .filter(|entry| entry.is_active())
            .map(|entry| entry.to_string());
        (request_queue.len(), now_playing, request_queue.queue_url())
    })
    .await?;

    Ok(Json(IndexResponse {
        length,
        now_playing,
        queue_url,
        songlist_url: app_state.songlist_url.clone(),
    }))
}

#[get("/help")]
pub async fn help(app_state: &State<AppState>) -> StatusReply {
    let songlist = app_state
        .songlist_url
        .clone()
        .unwrap_or_else(|| "the song list".to_string());
    let message = format!(
        "1: find a song at {}. 2: copy its request command. 3: paste the command into the chat.",
        songlist
    );
    reply(app_state, Status::Ok, message)
}

#[get("/rules")]
pub async fn rules(app_state: &State<AppState>) -> StatusReply {
    let message = app_state
        .chat
        .rules
        .iter()
        .enumerate()
        .map(|(idx, rule)| format!("{}: {}", idx + 1, rule))
        .collect::<Vec<_>>()
        .join(" ");
    reply(app_state, Status::Ok, message)
}

// Return routes defined in this module
pub fn routes() -> Vec<Route> {
    routes![index, help, rules]
}
