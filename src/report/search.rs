//! Free-text search over stored posts.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::models::Post;

/// Posts whose serialized form contains `query`, ignoring case.
///
/// Matches any field (content, username, URLs, counters), not only the
/// content. The text searched is single-line JSON with a space after every
/// `,` and `:`, so queries like `"username": "x"` match. Results keep stored
/// order. A blank query matches nothing.
pub fn search<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    posts
        .iter()
        .filter(|post| match searchable_text(post) {
            Ok(text) => text.to_lowercase().contains(&needle),
            Err(e) => {
                log::warn!("Skipping post {} in search: {}", post.id, e);
                false
            }
        })
        .collect()
}

/// Single-line JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn searchable_text(post: &Post) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    post.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, PostId};

    fn post(id: &str, content: &str, username: &str) -> Post {
        Post {
            id: PostId::new(id),
            created_at: Some("2024-04-01T00:00:00.000Z".into()),
            url: Some(format!("https://social.example.com/@{username}/{id}")),
            content: content.into(),
            username: Some(username.into()),
            media_urls: Vec::new(),
            card: None,
            replies_count: 0,
            reblogs_count: 0,
            favourites_count: 0,
        }
    }

    fn ids(found: &[&Post]) -> Vec<String> {
        found.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_content_match() {
        let posts = vec![post("1", "Tariffs are great", "a"), post("2", "Nothing here", "a")];
        assert_eq!(ids(&search(&posts, "TARIFF")), vec!["1"]);
    }

    #[test]
    fn test_matches_fields_other_than_content() {
        let mut with_card = post("3", "see link", "b");
        with_card.card = Some(Card {
            title: Some("Breaking Story".into()),
            url: Some("https://news.example.com/story".into()),
        });
        let posts = vec![post("1", "x", "alice"), post("2", "y", "bob"), with_card];

        assert_eq!(ids(&search(&posts, "bob")), vec!["2"]);
        assert_eq!(ids(&search(&posts, "breaking")), vec!["3"]);
        assert_eq!(ids(&search(&posts, "news.example")), vec!["3"]);
    }

    #[test]
    fn test_results_are_stable_and_ordered() {
        let posts = vec![
            post("30", "election day", "a"),
            post("10", "no match", "a"),
            post("20", "Election results", "a"),
        ];
        let first = ids(&search(&posts, "election"));
        let second = ids(&search(&posts, "election"));
        assert_eq!(first, vec!["30", "20"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_matches_across_key_value_separator() {
        let posts = vec![post("1", "x", "alice"), post("2", "y", "bob")];

        assert_eq!(ids(&search(&posts, r#""username": "bob""#)), vec!["2"]);
        assert_eq!(ids(&search(&posts, r#""replies_count": 0, "reblogs_count""#)).len(), 2);
        assert!(search(&posts, r#""username":"bob""#).is_empty());
    }

    #[test]
    fn test_searchable_text_layout() {
        let text = searchable_text(&post("5", "hi", "eve")).unwrap();
        assert!(text.starts_with(r#"{"id": "5", "created_at": "2024-04-01T00:00:00.000Z", "#));
        assert!(text.contains(r#""media_urls": [], "card": null"#));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_blank_query_finds_nothing() {
        let posts = vec![post("1", "anything", "a")];
        assert!(search(&posts, "   ").is_empty());
    }
}
