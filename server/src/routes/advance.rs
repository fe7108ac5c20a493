use rocket::http::Status;
use rocket::serde::json::Json;

use crate::app_state::AppState;
use crate::models::request_entry::RequestEntry;
use crate::models::request_queue::QueueStatus;
use crate::routes::{internal_error, reply, require_operator, with_queue, StatusReply};
use crate::selection;

#[derive(Debug, serde::Deserialize)]
pub struct OperatorCommand {
    actor: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct PickCommand {
    actor: String,
    position: usize,
}

/// Selects and advances under one lock so the choice cannot go stale
/// between the two steps.
async fn advance_with<F>(app_state: &AppState, choose: F) -> StatusReply
where
    F: FnOnce(&[RequestEntry]) -> Option<RequestEntry> + Send + 'static,
{
    let result = with_queue(app_state, move |request_queue| {
        match choose(request_queue.all()) {
            Some(target) => request_queue.advance(&target),
            None => QueueStatus::EmptyQueue,
        }
    })
    .await;

    match result {
        Ok(status) => reply(app_state, Status::Ok, status),
        Err(status) => internal_error(app_state, status),
    }
}

#[post("/next", data = "<command>")]
async fn next_song(
    command: Json<OperatorCommand>,
    app_state: &rocket::State<AppState>,
) -> StatusReply {
    if let Some(denied) = require_operator(app_state, &command.actor) {
        return denied;
    }

    advance_with(app_state, |entries| {
        selection::next_waiting(entries).cloned()
    })
    .await
}

#[post("/random", data = "<command>")]
async fn random_song(
    command: Json<OperatorCommand>,
    app_state: &rocket::State<AppState>,
) -> StatusReply {
    if let Some(denied) = require_operator(app_state, &command.actor) {
        return denied;
    }

    advance_with(app_state, |entries| selection::random(entries).cloned()).await
}

#[post("/pick", data = "<command>")]
async fn pick_song(command: Json<PickCommand>, app_state: &rocket::State<AppState>) -> StatusReply {
    let PickCommand { actor, position } = command.into_inner();
    if let Some(denied) = require_operator(app_state, &actor) {
        return denied;
    }

    let result = with_queue(app_state, move |request_queue| {
        let target = selection::at_position(request_queue.all(), position).cloned();
        target.map(|target| request_queue.advance(&target))
    })
    .await;

    match result {
        Ok(Some(status)) => reply(app_state, Status::Ok, status),
        Ok(None) => reply(
            app_state,
            Status::BadRequest,
            format!("@{}: the queue is not that long. Oops.", actor),
        ),
        Err(status) => internal_error(app_state, status),
    }
}

// Return routes defined in this module
pub fn routes() -> Vec<rocket::Route> {
    routes![next_song, random_song, pick_song]
}
