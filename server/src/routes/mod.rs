mod advance;
mod index;
mod queue;
mod request;

use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::tokio::task::spawn_blocking;
use std::fmt::Display;
use std::sync::Arc;

use crate::app_state::AppState;
use crate::models::request_queue::RequestQueue;

pub fn all_routes() -> Vec<rocket::Route> {
    // Combine routes from all modules
    let mut routes = Vec::new();
    routes.extend(index::routes());
    routes.extend(queue::routes());
    routes.extend(request::routes());
    routes.extend(advance::routes());
    routes
}

#[derive(Debug, serde::Serialize)]
pub struct StatusResponse {
    pub message: String,
}

pub type StatusReply = (Status, Json<StatusResponse>);

fn reply(app_state: &AppState, status: Status, message: impl Display) -> StatusReply {
    let message = app_state.chat.prefixed(&message.to_string());
    (status, Json(StatusResponse { message }))
}

/// Runs `work` on the queue off the async workers, holding the queue lock
/// for the whole call. Mirror updates inside may block on HTTP.
async fn with_queue<T, F>(app_state: &AppState, work: F) -> Result<T, Status>
where
    F: FnOnce(&mut RequestQueue) -> T + Send + 'static,
    T: Send + 'static,
{
    let request_queue = Arc::clone(&app_state.request_queue);
    spawn_blocking(move || {
        let mut locked_request_queue = request_queue.lock();
        work(&mut locked_request_queue)
    })
    .await
    .map_err(|e| {
        error!("[!] queue task failed: {}", e);
        Status::InternalServerError
    })
}

/// `None` when `actor` may run operator commands, otherwise the refusal.
fn require_operator(app_state: &AppState, actor: &str) -> Option<StatusReply> {
    if app_state.chat.is_operator(actor) {
        None
    } else {
        Some(reply(
            app_state,
            Status::Forbidden,
            format!("@{}: that is an operator-only command", actor),
        ))
    }
}

fn internal_error(app_state: &AppState, status: Status) -> StatusReply {
    reply(app_state, status, "something went wrong, try again")
}
