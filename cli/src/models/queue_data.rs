use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Deserialize, Default)]
pub struct IndexResponse {
    pub length: usize,
    pub now_playing: Option<String>,
    pub queue_url: Option<String>,
    pub songlist_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct QueueResponse {
    pub length: usize,
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EntryView {
    pub position: usize,
    pub song: String,
    pub requestee: String,
    pub active: bool,
    pub elevated: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct StatusResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct PositionResponse {
    pub position: Option<usize>,
    pub message: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct SongResponse {
    pub code: u32,
    pub song: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SongRequest<'a> {
    pub code: u32,
    pub requestee: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpgradeRequest<'a> {
    pub requestee: &'a str,
    pub actor: &'a str,
}

#[derive(Debug, Serialize)]
pub struct OperatorCommand<'a> {
    pub actor: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PickCommand<'a> {
    pub actor: &'a str,
    pub position: usize,
}

/// Chat names are often pasted with a leading `@`.
pub fn normalize_user(name: &str) -> &str {
    let name = name.trim();
    name.strip_prefix('@').unwrap_or(name)
}
