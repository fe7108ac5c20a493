use rocket::http::Status;
use rocket::serde::json::Json;

use crate::app_state::AppState;
use crate::models::request_entry::RequestEntry;
use crate::routes::with_queue;

#[derive(Debug, serde::Serialize)]
pub struct EntryView {
    position: usize,
    song: String,
    requestee: String,
    active: bool,
    elevated: bool,
}

impl EntryView {
    fn new(position: usize, entry: &RequestEntry) -> Self {
        Self {
            position,
            song: entry.song.clone(),
            requestee: entry.requestee.clone(),
            active: entry.is_active(),
            elevated: entry.is_elevated(),
        }
    }
}

#[derive(serde::Serialize)]
struct QueueResponse {
    length: usize,
    entries: Vec<EntryView>,
}

// Option<> on count makes the Query Param optional :)
#[get("/queue?<count>")]
async fn get_queue(
    app_state: &rocket::State<AppState>,
    count: Option<usize>,
) -> Result<Json<QueueResponse>, Status> {
    let count_value = count.unwrap_or(10);

    let res = with_queue(app_state, move |request_queue| QueueResponse {
        length: request_queue.len(),
        entries: request_queue
            .all()
            .iter()
            .take(count_value)
            .enumerate()
            .map(|(idx, entry)| EntryView::new(idx + 1, entry))
            .collect(),
    })
    .await?;

    Ok(Json(res))
}

#[derive(serde::Serialize)]
struct PositionResponse {
    position: Option<usize>,
    song: Option<String>,
    message: String,
}

#[get("/position/<user>")]
async fn position(
    user: &str,
    app_state: &rocket::State<AppState>,
) -> Result<Json<PositionResponse>, Status> {
    let user = user.to_string();
    let lookup = user.clone();
    let found = with_queue(app_state, move |request_queue| {
        let position = request_queue.position_of(&lookup)?;
        let song = request_queue.entry_for(&lookup)?.song.clone();
        Some((position, song))
    })
    .await?;

    let message = match &found {
        Some((position, song)) => format!(
            "@{}: your request {} is currently at position {} in the queue",
            user, song, position
        ),
        None => format!("@{}: you don't seem to have a song in the queue", user),
    };

    Ok(Json(PositionResponse {
        position: found.as_ref().map(|(position, _)| *position),
        song: found.map(|(_, song)| song),
        message: app_state.chat.prefixed(&message),
    }))
}

// Return routes defined in this module
pub fn routes() -> Vec<rocket::Route> {
    routes![get_queue, position]
}
