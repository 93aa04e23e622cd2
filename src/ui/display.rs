//! Text rendering for posts, records, charts and connection status.

use std::fmt::Write as _;

use crate::models::{Post, StatsSample};
use crate::ui::Palette;
use crate::utils::{char_prefix, thousands, truncate_graphemes};

const RULE: &str = "--------------------------------------------------";

/// Full view of one post.
pub fn render_post(post: &Post, p: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", p.paint(p.dim, RULE));
    let _ = writeln!(
        out,
        "{}{}",
        p.bold,
        p.paint(p.cyan, post.username.as_deref().unwrap_or("unknown"))
    );
    let _ = writeln!(
        out,
        "{}",
        p.paint(p.dim, format!("Posted on: {}", post.created_at_str()))
    );

    if !post.content.is_empty() {
        let _ = writeln!(out, "\n{}\n{}", p.paint(p.warning, "Content:"), post.content);
    }

    if !post.media_urls.is_empty() {
        let _ = writeln!(out, "\n{}", p.paint(p.warning, "Media:"));
        for url in &post.media_urls {
            let _ = writeln!(out, "  - {}", p.paint(p.blue, url));
        }
    }

    if let Some(card) = &post.card {
        if let Some(url) = &card.url {
            let _ = writeln!(out, "\n{}", p.paint(p.warning, "Shared Link:"));
            let _ = writeln!(
                out,
                "  Title: {}\n  Link: {}",
                card.title.as_deref().unwrap_or(""),
                p.paint(p.blue, url)
            );
        }
    }

    let _ = writeln!(
        out,
        "\n{}",
        p.paint(
            p.dim,
            format!(
                "Stats: {} ReTruths, {} Likes",
                post.reblogs_count, post.favourites_count
            )
        )
    );
    let _ = write!(
        out,
        "Original Post: {}{}",
        p.underline,
        p.paint(p.blue, post.url.as_deref().unwrap_or(""))
    );
    out
}

/// One record line: the count, a content snippet and the date.
pub fn render_record(label: &str, post: &Post, count: u64, snippet_len: usize, p: &Palette) -> String {
    let snippet = if post.content.is_empty() {
        "No Content"
    } else {
        truncate_graphemes(&post.content, snippet_len)
    };
    format!(
        "\n{}\n  {} - \"{}...\" on {}",
        p.paint(p.bold, format!("{label}:")),
        p.paint(p.cyan, thousands(count)),
        snippet,
        char_prefix(post.created_at_str(), 10)
    )
}

/// The highest follower count seen and when.
pub fn render_peak_followers(sample: &StatsSample, p: &Palette) -> String {
    let when = char_prefix(&sample.timestamp, 19).replace('T', " ");
    let count = sample
        .followers_count
        .map(thousands)
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "\n{}\n  {} on {}",
        p.paint(p.bold, "Highest Recorded Followers:"),
        p.paint(p.cyan, count),
        when
    )
}

/// Horizontal bar chart of posts per month.
///
/// The busiest month gets `width` cells; any non-empty month gets at least
/// one.
#[cfg(feature = "chart")]
pub fn render_chart(months: &[crate::report::MonthlyCount], width: usize, p: &Palette) -> String {
    use crate::utils::month_label;

    let max = months.iter().map(|m| m.count).max().unwrap_or(0);
    let labels: Vec<String> = months.iter().map(|m| month_label(&m.month)).collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{}", p.paint(p.bold, "Monthly Posting Frequency"));
    for (month, label) in months.iter().zip(&labels) {
        let cells = if max == 0 {
            0
        } else {
            (month.count * width).div_ceil(max).max(1)
        };
        let _ = writeln!(
            out,
            "{label:>label_width$} │{} {}",
            p.paint(p.cyan, "█".repeat(cells)),
            month.count
        );
    }
    let _ = write!(
        out,
        "{:>label_width$} └ {}",
        "",
        p.paint(p.dim, "Number of Posts")
    );
    out
}

/// Meaning of a probe's HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Ok,
    Blocked,
    NotFound,
    ServerError,
    Unexpected,
}

impl ConnectionStatus {
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => Self::Ok,
            403 => Self::Blocked,
            404 => Self::NotFound,
            500..=599 => Self::ServerError,
            _ => Self::Unexpected,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    pub fn describe(self, code: u16) -> String {
        match self {
            Self::Ok => format!("✔ Status: {code} OK - Connection is working perfectly."),
            Self::Blocked => {
                format!("❌ Status: {code} Forbidden - We are likely being blocked by Cloudflare.")
            }
            Self::NotFound => {
                format!("❌ Status: {code} Not Found - The API endpoint may have changed.")
            }
            Self::ServerError => {
                format!("❌ Status: {code} Server Error - The feed's servers are having issues.")
            }
            Self::Unexpected => format!("❓ Status: {code} - An unexpected response was received."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, PostId};

    fn post() -> Post {
        Post {
            id: PostId::new("1"),
            created_at: Some("2024-07-04T15:30:00.000Z".into()),
            url: Some("https://social.example.com/@user/1".into()),
            content: "A fairly long piece of content for snippets".into(),
            username: Some("user".into()),
            media_urls: vec!["https://cdn.example.com/1.jpg".into()],
            card: Some(Card {
                title: Some("Headline".into()),
                url: Some("https://news.example.com".into()),
            }),
            replies_count: 3,
            reblogs_count: 1200,
            favourites_count: 4500,
        }
    }

    #[test]
    fn test_render_post_plain() {
        let text = render_post(&post(), &Palette::plain());
        assert!(text.contains("user\nPosted on: 2024-07-04T15:30:00.000Z"));
        assert!(text.contains("Content:\nA fairly long"));
        assert!(text.contains("  - https://cdn.example.com/1.jpg"));
        assert!(text.contains("Title: Headline\n  Link: https://news.example.com"));
        assert!(text.contains("Stats: 1200 ReTruths, 4500 Likes"));
        assert!(text.ends_with("Original Post: https://social.example.com/@user/1"));
    }

    #[test]
    fn test_card_without_url_is_hidden() {
        let mut p = post();
        p.card = Some(Card {
            title: Some("Orphan".into()),
            url: None,
        });
        assert!(!render_post(&p, &Palette::plain()).contains("Shared Link"));
    }

    #[test]
    fn test_render_record() {
        let text = render_record("Most ReTruths", &post(), 1200, 6, &Palette::plain());
        assert_eq!(text, "\nMost ReTruths:\n  1,200 - \"A fair...\" on 2024-07-04");

        let mut empty = post();
        empty.content.clear();
        assert!(render_record("X", &empty, 0, 6, &Palette::plain()).contains("\"No Content...\""));
    }

    #[test]
    fn test_render_peak_followers() {
        let sample = StatsSample {
            timestamp: "2024-07-04T15:30:12.345Z".into(),
            followers_count: Some(10_953_342),
            statuses_count: None,
        };
        assert_eq!(
            render_peak_followers(&sample, &Palette::plain()),
            "\nHighest Recorded Followers:\n  10,953,342 on 2024-07-04 15:30:12"
        );
    }

    #[cfg(feature = "chart")]
    #[test]
    fn test_render_chart_scales_bars() {
        use crate::report::MonthlyCount;

        let months = vec![
            MonthlyCount {
                month: "2024-01".into(),
                count: 10,
            },
            MonthlyCount {
                month: "2024-02".into(),
                count: 1,
            },
        ];
        let text = render_chart(&months, 20, &Palette::plain());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Monthly Posting Frequency");
        assert_eq!(lines[1], format!("Jan 2024 │{} 10", "█".repeat(20)));
        assert_eq!(lines[2], "Feb 2024 │██ 1");
    }

    #[test]
    fn test_connection_status() {
        assert!(ConnectionStatus::from_code(200).is_ok());
        assert_eq!(ConnectionStatus::from_code(403), ConnectionStatus::Blocked);
        assert_eq!(ConnectionStatus::from_code(404), ConnectionStatus::NotFound);
        assert_eq!(ConnectionStatus::from_code(503), ConnectionStatus::ServerError);
        assert_eq!(ConnectionStatus::from_code(302), ConnectionStatus::Unexpected);
        assert!(ConnectionStatus::from_code(503).describe(503).contains("503 Server Error"));
    }
}
