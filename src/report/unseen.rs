//! Posts created since the last review.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Post;
use crate::storage::LocalStorage;
use crate::utils::timestamp;

/// Outcome of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnseenCheck {
    /// No marker existed; one was created and nothing counts as new.
    FirstCheck,
    /// The marker existed; this many posts were newer than it.
    Checked { new_posts: usize },
}

/// Posts created strictly after `marker`, oldest first.
///
/// Both sides are ISO-8601 strings in the same zone and precision, so a
/// plain string comparison orders them.
pub fn select_unseen<'a>(posts: &'a [Post], marker: &str) -> Vec<&'a Post> {
    let mut unseen: Vec<&Post> = posts
        .iter()
        .filter(|p| p.created_at_str() > marker)
        .collect();
    unseen.sort_by(|a, b| a.created_at_str().cmp(b.created_at_str()));
    unseen
}

/// Review posts newer than the last-check marker.
///
/// On the very first review the marker is created and nothing is reported,
/// so an existing archive does not flood the user. Otherwise `present` is
/// handed the unseen posts (possibly none) and the marker is then moved to
/// `now`, whether or not the user chose to look at them.
pub async fn review_unseen<F>(
    storage: &LocalStorage,
    posts: &[Post],
    now: DateTime<Utc>,
    present: F,
) -> Result<UnseenCheck>
where
    F: FnOnce(&[&Post]),
{
    let stamp = timestamp(now);

    let Some(marker) = storage.read_marker().await? else {
        storage.write_marker(&stamp).await?;
        return Ok(UnseenCheck::FirstCheck);
    };

    let unseen = select_unseen(posts, &marker);
    present(&unseen);
    storage.write_marker(&stamp).await?;

    Ok(UnseenCheck::Checked {
        new_posts: unseen.len(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    use super::*;
    use crate::models::PostId;

    fn post(id: &str, created_at: &str) -> Post {
        Post {
            id: PostId::new(id),
            created_at: Some(created_at.into()),
            url: None,
            content: format!("post {id}"),
            username: None,
            media_urls: Vec::new(),
            card: None,
            replies_count: 0,
            reblogs_count: 0,
            favourites_count: 0,
        }
    }

    #[test]
    fn test_select_unseen_is_strict_and_ascending() {
        let posts = vec![
            post("3", "2024-05-03T00:00:00.000Z"),
            post("2", "2024-05-02T00:00:00.000Z"),
            post("1", "2024-05-01T00:00:00.000Z"),
        ];
        let unseen = select_unseen(&posts, "2024-05-01T00:00:00.000Z");
        let ids: Vec<_> = unseen.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[tokio::test]
    async fn test_first_review_reports_nothing_and_creates_marker() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::in_dir(tmp.path());
        let posts = vec![post("1", "2020-01-01T00:00:00.000Z")];
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let mut presented = false;
        let check = review_unseen(&storage, &posts, now, |_| presented = true)
            .await
            .unwrap();

        assert_eq!(check, UnseenCheck::FirstCheck);
        assert!(!presented);
        assert_eq!(
            storage.read_marker().await.unwrap().as_deref(),
            Some("2024-05-01T12:00:00.000Z")
        );
    }

    #[tokio::test]
    async fn test_second_review_shows_new_posts_oldest_first() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::in_dir(tmp.path());
        let first = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        review_unseen(&storage, &[], first, |_| {}).await.unwrap();

        let posts = vec![
            post("3", &timestamp(first + Duration::hours(1))),
            post("2", &timestamp(first + Duration::minutes(30))),
            post("1", &timestamp(first - Duration::hours(2))),
        ];
        let later = first + Duration::hours(2);

        let mut shown = Vec::new();
        let check = review_unseen(&storage, &posts, later, |unseen| {
            shown = unseen.iter().map(|p| p.id.to_string()).collect();
        })
        .await
        .unwrap();

        assert_eq!(check, UnseenCheck::Checked { new_posts: 2 });
        assert_eq!(shown, vec!["2", "3"]);
        assert_eq!(
            storage.read_marker().await.unwrap(),
            Some(timestamp(later))
        );
    }

    #[tokio::test]
    async fn test_marker_advances_when_nothing_is_new() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::in_dir(tmp.path());
        storage.write_marker("2024-05-01T00:00:00.000Z").await.unwrap();
        let posts = vec![post("1", "2024-04-01T00:00:00.000Z")];
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let check = review_unseen(&storage, &posts, now, |unseen| assert!(unseen.is_empty()))
            .await
            .unwrap();

        assert_eq!(check, UnseenCheck::Checked { new_posts: 0 });
        assert_eq!(
            storage.read_marker().await.unwrap().as_deref(),
            Some("2024-06-01T00:00:00.000Z")
        );
    }
}
