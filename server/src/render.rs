//! Markdown documents shown to the audience. Everything here is pure.
use crate::catalog::CatalogSong;
use crate::models::request_entry::RequestEntry;

pub const EMPTY_QUEUE_PLACEHOLDER: &str = "Impressively empty in here.";

/// Front matter and heading of a rendered document.
#[derive(Debug, Clone)]
pub struct Document {
    pub tags: String,
    pub title: String,
}

impl Document {
    pub fn new(tags: &str, title: &str) -> Self {
        Self {
            tags: tags.to_string(),
            title: title.to_string(),
        }
    }

    fn header(&self) -> String {
        format!("---\ntags: {}\n---\n# {}", self.tags, self.title)
    }
}

pub fn queue_markdown(document: &Document, entries: &[RequestEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n\n{}", document.header(), EMPTY_QUEUE_PLACEHOLDER);
    }

    let mut lines = vec![
        document.header(),
        String::new(),
        "| Position | Song | User |".to_string(),
        "| --- | --- | --- |".to_string(),
    ];
    for (idx, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "| {} | {} | {} |",
            idx + 1,
            escape_cell(&entry.song),
            escape_cell(&entry.requestee)
        ));
    }

    lines.join("\n")
}

/// The public song list; each row carries the chat command for its code.
pub fn song_list_markdown(
    document: &Document,
    command_prefix: &str,
    songs: &[CatalogSong],
) -> String {
    let mut lines = vec![
        document.header(),
        String::new(),
        "Pick a song, copy its request command and paste it into the chat.".to_string(),
        String::new(),
        "| Artist | Title | Command |".to_string(),
        "| --- | --- | --- |".to_string(),
    ];
    for (idx, song) in songs.iter().enumerate() {
        lines.push(format!(
            "| {} | {} | {}request {} |",
            escape_cell(&song.artist),
            escape_cell(&song.title),
            command_prefix,
            idx + 1
        ));
    }

    lines.join("\n")
}

// a bare pipe would split the table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
