use log::{error, info};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::{ChatConfig, Config, HackMdConfig};
use crate::error::Result;
use crate::mirror::{HackMdNote, MirrorSink, NullMirror};
use crate::models::request_queue::RequestQueue;
use crate::render::{self, Document};
use crate::store::JsonFileStore;

#[derive(Clone)]
pub struct AppState {
    pub request_queue: Arc<Mutex<RequestQueue>>,
    pub catalog: Arc<Catalog>,
    pub chat: Arc<ChatConfig>,
    pub songlist_url: Option<String>,
}

impl AppState {
    pub fn new(
        request_queue: RequestQueue,
        catalog: Catalog,
        chat: ChatConfig,
        songlist_url: Option<String>,
    ) -> Self {
        Self {
            request_queue: Arc::new(Mutex::new(request_queue)),
            catalog: Arc::new(catalog),
            chat: Arc::new(chat),
            songlist_url,
        }
    }
}

/// Builds the catalog, publishes the song list and restores the queue.
///
/// Blocks on disk and network; call it before the async runtime starts.
pub fn initialize(config: &Config) -> Result<AppState> {
    let catalog = Catalog::from_path(&config.local.songlist, &config.local.catalog_options())?;

    let songlist_url = publish_song_list(config, &catalog)?;

    let store = JsonFileStore::new(&config.local.queue_file);
    let queue_document = Document::new(&config.hackmd.tag, &config.hackmd.queue_title);
    let request_queue = RequestQueue::new(
        Box::new(store),
        build_mirror(&config.hackmd)?,
        queue_document,
    )?;

    info!(
        "[+] request queue ready with {} entries",
        request_queue.len()
    );

    Ok(AppState::new(
        request_queue,
        catalog,
        config.chat.clone(),
        songlist_url,
    ))
}

pub fn build_mirror(hackmd: &HackMdConfig) -> Result<Box<dyn MirrorSink>> {
    if !hackmd.is_enabled() {
        info!("[-] no HackMD token configured, mirroring disabled");
        return Ok(Box::new(NullMirror));
    }

    Ok(Box::new(HackMdNote::new(
        &hackmd.token,
        &hackmd.endpoint,
        hackmd.timeout(),
    )?))
}

fn publish_song_list(config: &Config, catalog: &Catalog) -> Result<Option<String>> {
    let mut mirror = build_mirror(&config.hackmd)?;
    let document = Document::new(&config.hackmd.tag, &config.hackmd.list_title);
    let markdown =
        render::song_list_markdown(&document, &config.chat.command_prefix, catalog.songs());

    match mirror.publish(&markdown) {
        Ok(_) => {
            let url = mirror.url();
            if let Some(url) = &url {
                info!("[+] song list ready, see {}", url);
            }
            Ok(url)
        }
        Err(e) => {
            error!("[!] failed to publish song list: {}", e);
            Ok(None)
        }
    }
}
