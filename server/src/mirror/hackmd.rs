use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

use crate::error::{RequestError, Result};
use crate::mirror::MirrorSink;

pub const DEFAULT_ENDPOINT: &str = "https://api.hackmd.io/v1/notes/";
const PUBLIC_BASE_URL: &str = "https://hackmd.io/";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotePayload<'a> {
    content: &'a str,
    read_permission: &'a str,
    write_permission: &'a str,
    comment_permission: &'a str,
}

impl<'a> NotePayload<'a> {
    // guests may read, only the token owner writes
    fn new(content: &'a str) -> Self {
        Self {
            content,
            read_permission: "guest",
            write_permission: "owner",
            comment_permission: "disabled",
        }
    }
}

/// One HackMD note, created on `publish` and patched on `update`.
pub struct HackMdNote {
    client: Client,
    endpoint: String,
    token: String,
    note_id: Option<String>,
}

impl HackMdNote {
    /// Builds the HTTP client. Must not be called from inside an async task.
    pub fn new(token: &str, endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut endpoint = endpoint.to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }

        Ok(Self {
            client,
            endpoint,
            token: token.to_string(),
            note_id: None,
        })
    }

    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }
}

impl MirrorSink for HackMdNote {
    fn publish(&mut self, content: &str) -> Result<String> {
        debug!("[-] creating note via {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&NotePayload::new(content))
            .send()?
            .error_for_status()?;

        let body: serde_json::Value = response.json()?;
        let id = body
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| RequestError::Mirror("note response carried no id".to_string()))?
            .to_string();

        self.note_id = Some(id);
        let url = self.url().unwrap_or_default();
        info!("[+] published note {}", url);
        Ok(url)
    }

    fn update(&mut self, content: &str) -> Result<bool> {
        // startup publish may have failed; create the note now instead
        let Some(id) = self.note_id.clone() else {
            info!("[-] note not created yet, publishing instead of updating");
            return self.publish(content).map(|_| true);
        };

        let response = self
            .client
            .patch(format!("{}{}", self.endpoint, id))
            .bearer_auth(&self.token)
            .json(&NotePayload::new(content))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            warn!("[!] note {} update answered HTTP {}", id, status);
        }
        Ok(status.is_success())
    }

    fn url(&self) -> Option<String> {
        self.note_id
            .as_ref()
            .map(|id| format!("{}{}", PUBLIC_BASE_URL, id))
    }
}
