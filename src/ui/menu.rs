//! The numbered main menu.

use crate::ui::Palette;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Search,
    FetchOlder,
    Refresh,
    StatsAndRecords,
    Trends,
    ConnectionStatus,
    Unseen,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Search,
        MenuChoice::FetchOlder,
        MenuChoice::Refresh,
        MenuChoice::StatsAndRecords,
        MenuChoice::Trends,
        MenuChoice::ConnectionStatus,
        MenuChoice::Unseen,
        MenuChoice::Exit,
    ];

    /// Parse the user's input, e.g. `"3"`.
    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    fn label(self) -> (&'static str, Option<&'static str>) {
        match self {
            MenuChoice::Search => ("Search Posts", None),
            MenuChoice::FetchOlder => ("Fetch More Posts", Some("(Go Back in Time)")),
            MenuChoice::Refresh => ("Refresh & Overwrite All", Some("(Start Fresh)")),
            MenuChoice::StatsAndRecords => ("View Overall Stats & Records", None),
            MenuChoice::Trends => ("Analyze Posting Trends", None),
            MenuChoice::ConnectionStatus => ("Check Connection Status", None),
            MenuChoice::Unseen => ("Show New Posts Since Last Check", None),
            MenuChoice::Exit => ("Exit", None),
        }
    }
}

/// The menu as printed before each prompt.
pub fn render_menu(p: &Palette) -> String {
    let mut lines = vec![format!("\n{}", p.paint(p.header, "--- Main Menu ---"))];
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        let (label, hint) = choice.label();
        match hint {
            Some(hint) => lines.push(format!("{}. {} {}", i + 1, label, p.paint(p.dim, hint))),
            None => lines.push(format!("{}. {}", i + 1, label)),
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Search));
        assert_eq!(MenuChoice::parse(" 7 "), Some(MenuChoice::Unseen));
        assert_eq!(MenuChoice::parse("8"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("9"), None);
        assert_eq!(MenuChoice::parse("search"), None);
    }

    #[test]
    fn test_render_menu_numbers_every_entry() {
        let text = render_menu(&Palette::plain());
        assert!(text.contains("2. Fetch More Posts (Go Back in Time)"));
        assert!(text.ends_with("8. Exit"));
        assert_eq!(text.lines().filter(|l| l.contains(". ")).count(), 8);
    }
}
