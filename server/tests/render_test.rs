use requestnonsense_server::catalog::CatalogSong;
use requestnonsense_server::models::request_entry::RequestEntry;
use requestnonsense_server::render::{self, Document, EMPTY_QUEUE_PLACEHOLDER};

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document::new("requestnonsense", "Queue")
    }

    #[test]
    fn test_empty_queue_uses_placeholder() {
        let markdown = render::queue_markdown(&document(), &[]);

        assert!(markdown.starts_with("---\ntags: requestnonsense\n---\n# Queue"));
        assert!(markdown.ends_with(EMPTY_QUEUE_PLACEHOLDER));
        assert!(!markdown.contains("| Position |"));
    }

    #[test]
    fn test_queue_table_rows_follow_order() {
        let entries = vec![
            RequestEntry::new("A - One", "alice", 1.0).activated(),
            RequestEntry::new("B - Two", "bob", 2.0),
        ];

        let markdown = render::queue_markdown(&document(), &entries);

        let expected = "---\ntags: requestnonsense\n---\n# Queue\n\n\
| Position | Song | User |\n\
| --- | --- | --- |\n\
| 1 | A - One | alice |\n\
| 2 | B - Two | bob |";
        assert_eq!(markdown, expected);
    }

    #[test]
    fn test_pipes_are_escaped() {
        let entries = vec![RequestEntry::new("AC|DC - Song", "alice", 1.0)];
        let markdown = render::queue_markdown(&document(), &entries);
        assert!(markdown.contains("| 1 | AC\\|DC - Song | alice |"));
    }

    #[test]
    fn test_song_list_commands() {
        let songs = vec![
            CatalogSong {
                artist: "Aardvark".to_string(),
                title: "Dig".to_string(),
            },
            CatalogSong {
                artist: "Zebra".to_string(),
                title: "Stripes".to_string(),
            },
        ];

        let markdown =
            render::song_list_markdown(&Document::new("requestnonsense", "List"), "!", &songs);

        assert!(markdown.contains("# List"));
        assert!(markdown.contains("| Artist | Title | Command |"));
        assert!(markdown.contains("| Aardvark | Dig | !request 1 |"));
        assert!(markdown.contains("| Zebra | Stripes | !request 2 |"));
    }
}
