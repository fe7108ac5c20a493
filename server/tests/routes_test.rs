use requestnonsense_server::app_state::AppState;
use requestnonsense_server::build_rocket;
use requestnonsense_server::catalog::{Catalog, CatalogOptions};
use requestnonsense_server::config::ChatConfig;
use requestnonsense_server::mirror::NullMirror;
use requestnonsense_server::models::request_queue::RequestQueue;
use requestnonsense_server::render::Document;
use requestnonsense_server::store::MemoryStore;

use rocket::http::Status;
use rocket::local::blocking::Client;
use serde_json::{json, Value};

#[cfg(test)]
mod tests {
    use super::*;

    const SONGLIST: &str = "\
Artist;Title;Arrangements
Aardvark;Anthill;Lead
Aardvark;Dig;Bass
Zebra;Stripes;Lead
";

    fn client_with(store: MemoryStore, chat: ChatConfig) -> Client {
        let catalog = Catalog::from_csv(SONGLIST, &CatalogOptions::default()).unwrap();
        let request_queue = RequestQueue::new(
            Box::new(store),
            Box::new(NullMirror),
            Document::new("requestnonsense", "Queue"),
        )
        .unwrap();
        let app_state = AppState::new(request_queue, catalog, chat, None);
        Client::tracked(build_rocket(app_state)).expect("valid rocket instance")
    }

    fn client() -> Client {
        let chat = ChatConfig {
            operators: vec!["Mod".to_string()],
            ..ChatConfig::default()
        };
        client_with(MemoryStore::new(), chat)
    }

    fn post(client: &Client, path: &str, body: Value) -> (Status, String) {
        let response = client.post(path).json(&body).dispatch();
        let status = response.status();
        let body: Value = response.into_json().expect("json body");
        (status, body["message"].as_str().unwrap_or_default().to_string())
    }

    fn get_json(client: &Client, path: &str) -> (Status, Value) {
        let response = client.get(path).dispatch();
        let status = response.status();
        (status, response.into_json().expect("json body"))
    }

    fn request(client: &Client, code: u32, requestee: &str) -> (Status, String) {
        post(
            client,
            "/request",
            json!({ "code": code, "requestee": requestee }),
        )
    }

    fn queued_requestees(client: &Client) -> Vec<String> {
        let (_, queue) = get_json(client, "/queue");
        queue["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["requestee"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_request_by_code() {
        let client = client();

        let (status, message) = request(&client, 1, "alice");
        assert_eq!(status, Status::Ok);
        assert_eq!(
            message,
            "@alice: your request for Aardvark - Anthill is in the queue."
        );

        let (status, message) = request(&client, 3, "alice");
        assert_eq!(status, Status::Ok);
        assert_eq!(message, "@alice: your request was updated to Zebra - Stripes");
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        let client = client();

        let (status, message) = request(&client, 99, "alice");
        assert_eq!(status, Status::NotFound);
        assert_eq!(message, "@alice: could not find a song for 99");
        assert!(queued_requestees(&client).is_empty());
    }

    #[test]
    fn test_song_lookup() {
        let client = client();

        let (status, song) = get_json(&client, "/songs/2");
        assert_eq!(status, Status::Ok);
        assert_eq!(song["song"], "Aardvark - Dig");

        let (status, song) = get_json(&client, "/songs/0");
        assert_eq!(status, Status::NotFound);
        assert!(song["song"].is_null());
    }

    #[test]
    fn test_operator_commands_refuse_other_users() {
        let client = client();
        request(&client, 1, "alice");

        let (status, message) = post(&client, "/next", json!({ "actor": "alice" }));
        assert_eq!(status, Status::Forbidden);
        assert_eq!(message, "@alice: that is an operator-only command");

        let (status, _) = post(
            &client,
            "/upgrade",
            json!({ "requestee": "alice", "actor": "alice" }),
        );
        assert_eq!(status, Status::Forbidden);

        let (_, index) = get_json(&client, "/");
        assert!(index["now_playing"].is_null());
    }

    #[test]
    fn test_upgrade_strips_at_sign() {
        let client = client();
        request(&client, 1, "alice");
        request(&client, 2, "bob");

        let (status, message) = post(
            &client,
            "/upgrade",
            json!({ "requestee": "@bob", "actor": "mod" }),
        );
        assert_eq!(status, Status::Ok);
        assert_eq!(message, "@mod: the request from bob is now prioritized");
        assert_eq!(queued_requestees(&client), vec!["bob", "alice"]);

        let (_, message) = post(
            &client,
            "/upgrade",
            json!({ "requestee": "carol", "actor": "Mod" }),
        );
        assert_eq!(message, "@Mod: carol has no request in the queue");
    }

    #[test]
    fn test_next_plays_through_the_queue() {
        let client = client();
        request(&client, 1, "alice");
        request(&client, 2, "bob");

        let (status, message) = post(&client, "/next", json!({ "actor": "Mod" }));
        assert_eq!(status, Status::Ok);
        assert_eq!(message, "Next song: Aardvark - Anthill requested by alice");

        let (_, index) = get_json(&client, "/");
        assert_eq!(index["length"], 2);
        assert_eq!(index["now_playing"], "Aardvark - Anthill requested by alice");

        let (_, message) = post(&client, "/next", json!({ "actor": "Mod" }));
        assert_eq!(message, "Next song: Aardvark - Dig requested by bob");
        assert_eq!(queued_requestees(&client), vec!["bob"]);

        let (_, message) = post(&client, "/next", json!({ "actor": "Mod" }));
        assert_eq!(message, "Queue is empty, sad.");

        let (_, message) = post(&client, "/next", json!({ "actor": "Mod" }));
        assert_eq!(message, "Queue is empty, sad.");
    }

    #[test]
    fn test_random_with_single_request() {
        let client = client();
        request(&client, 3, "carol");

        let (status, message) = post(&client, "/random", json!({ "actor": "Mod" }));
        assert_eq!(status, Status::Ok);
        assert_eq!(message, "Next song: Zebra - Stripes requested by carol");
    }

    #[test]
    fn test_pick_by_position() {
        let client = client();
        request(&client, 1, "alice");
        request(&client, 2, "bob");
        request(&client, 3, "carol");

        let (status, message) = post(&client, "/pick", json!({ "actor": "Mod", "position": 3 }));
        assert_eq!(status, Status::Ok);
        assert_eq!(message, "Next song: Zebra - Stripes requested by carol");
        assert_eq!(queued_requestees(&client), vec!["carol", "alice", "bob"]);

        let (status, message) = post(&client, "/pick", json!({ "actor": "Mod", "position": 4 }));
        assert_eq!(status, Status::BadRequest);
        assert_eq!(message, "@Mod: the queue is not that long. Oops.");

        let (status, _) = post(&client, "/pick", json!({ "actor": "Mod", "position": 0 }));
        assert_eq!(status, Status::BadRequest);
    }

    #[test]
    fn test_position_lookup() {
        let client = client();
        request(&client, 1, "alice");
        request(&client, 2, "bob");

        let (status, position) = get_json(&client, "/position/bob");
        assert_eq!(status, Status::Ok);
        assert_eq!(position["position"], 2);
        assert_eq!(position["song"], "Aardvark - Dig");
        assert_eq!(
            position["message"],
            "@bob: your request Aardvark - Dig is currently at position 2 in the queue"
        );

        let (_, position) = get_json(&client, "/position/dave");
        assert!(position["position"].is_null());
        assert_eq!(
            position["message"],
            "@dave: you don't seem to have a song in the queue"
        );
    }

    #[test]
    fn test_queue_count_limits_entries() {
        let client = client();
        request(&client, 1, "alice");
        request(&client, 2, "bob");
        request(&client, 3, "carol");

        let (status, queue) = get_json(&client, "/queue?count=2");
        assert_eq!(status, Status::Ok);
        assert_eq!(queue["length"], 3);
        assert_eq!(queue["entries"].as_array().unwrap().len(), 2);
        assert_eq!(queue["entries"][0]["position"], 1);
        assert_eq!(queue["entries"][0]["active"], false);
    }

    #[test]
    fn test_requests_reach_the_store() {
        let store = MemoryStore::new();
        let client = client_with(store.clone(), ChatConfig::default());

        request(&client, 2, "bob");

        let saved = store.entries();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].song, "Aardvark - Dig");
        assert_eq!(saved[0].requestee, "bob");
    }

    #[test]
    fn test_message_prefix_and_rules() {
        let chat = ChatConfig {
            message_prefix: "bot".to_string(),
            rules: vec!["Be nice.".to_string(), "One song each.".to_string()],
            ..ChatConfig::default()
        };
        let client = client_with(MemoryStore::new(), chat);

        let (_, message) = request(&client, 1, "alice");
        assert_eq!(
            message,
            "bot: @alice: your request for Aardvark - Anthill is in the queue."
        );

        let (status, rules) = get_json(&client, "/rules");
        assert_eq!(status, Status::Ok);
        assert_eq!(rules["message"], "bot: 1: Be nice. 2: One song each.");
    }
}
