use log::{debug, info};
use rocket::http::Status;
use rocket::serde::json::Json;

use crate::app_state::AppState;
use crate::routes::{internal_error, reply, require_operator, with_queue, StatusReply};

#[derive(Debug, serde::Deserialize)]
pub struct SongRequest {
    code: u32,
    requestee: String,
}

#[post("/request", data = "<song_request>")]
async fn request_song(
    song_request: Json<SongRequest>,
    app_state: &rocket::State<AppState>,
) -> StatusReply {
    let SongRequest { code, requestee } = song_request.into_inner();
    debug!("[-] {} asked for code {}", requestee, code);

    let Some(song) = app_state.catalog.lookup(code) else {
        info!("[-] no song for code {}", code);
        return reply(
            app_state,
            Status::NotFound,
            format!("@{}: could not find a song for {}", requestee, code),
        );
    };

    match with_queue(app_state, move |request_queue| {
        request_queue.submit(&song, &requestee)
    })
    .await
    {
        Ok(status) => reply(app_state, Status::Ok, status),
        Err(status) => internal_error(app_state, status),
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct UpgradeRequest {
    requestee: String,
    actor: String,
}

#[post("/upgrade", data = "<upgrade>")]
async fn upgrade_request(
    upgrade: Json<UpgradeRequest>,
    app_state: &rocket::State<AppState>,
) -> StatusReply {
    let UpgradeRequest { requestee, actor } = upgrade.into_inner();
    if let Some(denied) = require_operator(app_state, &actor) {
        return denied;
    }

    // chat users tend to type "@name"
    let requestee = requestee.trim();
    let requestee = requestee.strip_prefix('@').unwrap_or(requestee).to_string();

    match with_queue(app_state, move |request_queue| {
        request_queue.promote(&requestee, &actor)
    })
    .await
    {
        Ok(status) => reply(app_state, Status::Ok, status),
        Err(status) => internal_error(app_state, status),
    }
}

#[derive(serde::Serialize)]
struct SongResponse {
    code: u32,
    song: Option<String>,
}

#[get("/songs/<code>")]
async fn lookup_song(
    code: u32,
    app_state: &rocket::State<AppState>,
) -> (Status, Json<SongResponse>) {
    let song = app_state.catalog.lookup(code);
    let status = if song.is_some() {
        Status::Ok
    } else {
        Status::NotFound
    };
    (status, Json(SongResponse { code, song }))
}

// Return routes defined in this module
pub fn routes() -> Vec<rocket::Route> {
    routes![request_song, upgrade_request, lookup_song]
}
