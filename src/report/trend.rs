//! Monthly posting frequency.

use std::collections::BTreeMap;

use crate::models::Post;
use crate::utils::char_prefix;

/// Number of posts created in one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}

/// Count posts per `YYYY-MM` prefix of `created_at`, oldest month first.
///
/// Posts without a creation time are ignored. The fixed-width prefix sorts
/// chronologically as a string.
pub fn monthly_counts(posts: &[Post]) -> Vec<MonthlyCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for created in posts.iter().map(Post::created_at_str).filter(|c| !c.is_empty()) {
        *counts.entry(char_prefix(created, 7)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(month, count)| MonthlyCount {
            month: month.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostId;

    fn post(id: &str, created_at: Option<&str>) -> Post {
        Post {
            id: PostId::new(id),
            created_at: created_at.map(str::to_string),
            url: None,
            content: String::new(),
            username: None,
            media_urls: Vec::new(),
            card: None,
            replies_count: 0,
            reblogs_count: 0,
            favourites_count: 0,
        }
    }

    fn month(month: &str, count: usize) -> MonthlyCount {
        MonthlyCount {
            month: month.into(),
            count,
        }
    }

    #[test]
    fn test_groups_and_sorts_months() {
        let posts = vec![
            post("3", Some("2024-02-01T08:00:00.000Z")),
            post("2", Some("2024-01-20T08:00:00.000Z")),
            post("1", Some("2024-01-05T08:00:00.000Z")),
        ];
        assert_eq!(
            monthly_counts(&posts),
            vec![month("2024-01", 2), month("2024-02", 1)]
        );
    }

    #[test]
    fn test_year_boundary_sorts_chronologically() {
        let posts = vec![
            post("1", Some("2024-01-01T00:00:00.000Z")),
            post("2", Some("2023-12-31T23:59:59.000Z")),
            post("3", Some("2023-11-30T00:00:00.000Z")),
        ];
        let months: Vec<_> = monthly_counts(&posts).into_iter().map(|m| m.month).collect();
        assert_eq!(months, vec!["2023-11", "2023-12", "2024-01"]);
    }

    #[test]
    fn test_undated_posts_are_skipped() {
        let posts = vec![post("1", None), post("2", Some("")), post("3", Some("2024-03-03"))];
        assert_eq!(monthly_counts(&posts), vec![month("2024-03", 1)]);
    }
}
