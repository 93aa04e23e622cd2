// src/app.rs

//! Interactive session: startup sync followed by the menu loop.

use chrono::Utc;

use crate::capabilities::Capabilities;
use crate::error::{LoadError, Result};
use crate::models::{Config, Post};
use crate::pipeline::{SyncEngine, SyncOutcome};
use crate::report::{self, UnseenCheck};
use crate::services::{FeedEndpoint, FeedSource};
use crate::storage::{LocalStorage, MergeMode, MergeSummary};
use crate::ui::{self, ConnectionStatus, Console, MenuChoice, Palette};

/// One interactive session against one feed.
pub struct App<S> {
    config: Config,
    engine: SyncEngine<S>,
    console: Console,
    caps: Capabilities,
}

impl<S: FeedSource> App<S> {
    /// Session on stdin and stdout.
    pub fn new(config: Config, source: S, caps: Capabilities) -> Result<Self> {
        let console = Console::stdio(Palette::new(config.display.color));
        Self::with_console(config, source, caps, console)
    }

    pub fn with_console(config: Config, source: S, caps: Capabilities, console: Console) -> Result<Self> {
        let endpoint = FeedEndpoint::new(&config.feed)?;
        let storage = LocalStorage::new(&config.paths);
        Ok(Self {
            engine: SyncEngine::new(source, endpoint, storage),
            config,
            console,
            caps,
        })
    }

    fn storage(&self) -> &LocalStorage {
        self.engine.storage()
    }

    /// Banner, catch-up sync, then the menu until the user exits.
    pub async fn run(&self) -> Result<()> {
        for message in self.caps.missing() {
            self.console.warn(message);
        }
        self.show_banner();

        if let Err(e) = self.sync_newer().await {
            self.console.fail(&format!("Startup sync failed: {e}"));
        }

        loop {
            self.console.block(&ui::menu::render_menu(self.console.palette()));
            let Some(input) = self.console.prompt("> ") else {
                break;
            };
            let Some(choice) = MenuChoice::parse(&input) else {
                self.console.fail("Invalid choice.");
                continue;
            };
            if choice == MenuChoice::Exit {
                break;
            }
            if let Err(e) = self.dispatch(choice).await {
                log::debug!("{:?} failed: {:?}", choice, e);
                self.console.fail(&format!("❌ {e}"));
            }
        }
        Ok(())
    }

    async fn dispatch(&self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Search => self.search_posts().await,
            MenuChoice::FetchOlder => self.fetch_older().await,
            MenuChoice::Refresh => self.refresh().await,
            MenuChoice::StatsAndRecords => self.show_stats_and_records().await,
            MenuChoice::Trends => self.analyze_trends().await,
            MenuChoice::ConnectionStatus => {
                self.check_connection().await;
                Ok(())
            }
            MenuChoice::Unseen => self.show_unseen().await,
            MenuChoice::Exit => Ok(()),
        }
    }

    fn show_banner(&self) {
        match ui::art::load_banner(self.storage().root_dir(), &self.config.display, &self.caps) {
            Ok(Some(art)) => self.console.block(&art),
            Ok(None) => {}
            Err(e) => self.console.fail(&format!("Could not generate ASCII art: {e}")),
        }
    }

    // --- Sync actions ---

    async fn sync_newer(&self) -> Result<()> {
        self.console.info("Checking for new posts since last session...");
        match self.engine.newer().await? {
            SyncOutcome::Merged(summary) if summary.mode == MergeMode::Overwrite => {
                self.console
                    .warn("No local data found. Fetched the latest posts for a fresh start.");
                self.report_merge(&summary);
            }
            SyncOutcome::Merged(summary) => {
                self.console
                    .success(&format!("Found {} new post(s)!", summary.fetched));
                self.report_merge(&summary);
            }
            SyncOutcome::UpToDate => self.console.success("You are already up-to-date."),
            SyncOutcome::NoData | SyncOutcome::NothingToPaginate => {
                self.console.warn("The feed returned no posts.")
            }
        }
        Ok(())
    }

    async fn fetch_older(&self) -> Result<()> {
        match self.engine.older().await? {
            SyncOutcome::Merged(summary) => self.report_merge(&summary),
            SyncOutcome::NothingToPaginate => self
                .console
                .warn("No posts found to paginate from. Fetch latest first."),
            SyncOutcome::NoData | SyncOutcome::UpToDate => {
                self.console.warn("No older posts were returned.")
            }
        }
        Ok(())
    }

    async fn refresh(&self) -> Result<()> {
        match self.engine.fresh().await? {
            SyncOutcome::Merged(summary) => self.report_merge(&summary),
            _ => self
                .console
                .warn("The feed returned no posts; local data left unchanged."),
        }
        Ok(())
    }

    fn report_merge(&self, summary: &MergeSummary) {
        self.console
            .info(&format!("Processed {} posts.", summary.fetched));
        match summary.mode {
            MergeMode::Append => {
                self.console
                    .block(&format!("Appended {} unique posts.", summary.added));
            }
            MergeMode::Prepend => {
                self.console
                    .block(&format!("Prepended {} new posts.", summary.added));
            }
            MergeMode::Overwrite => {}
        }
        self.console.success(&format!(
            "✔ {} updated. Total posts: {}.",
            self.config.paths.posts_file, summary.total
        ));
    }

    // --- Reports ---

    async fn search_posts(&self) -> Result<()> {
        let posts = match self.storage().load_posts().await {
            Ok(posts) => posts,
            Err(e) if e.is_absent_or_corrupt() => {
                self.console
                    .warn("No local post data found. Fetch some posts first.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let Some(query) = self.console.prompt("Enter search query: ") else {
            return Ok(());
        };
        if query.is_empty() {
            return Ok(());
        }

        let found = report::search(&posts, &query);
        self.console
            .success(&format!("\n--- Found {} Matching Posts ---", found.len()));
        self.print_posts(&found);
        Ok(())
    }

    async fn show_stats_and_records(&self) -> Result<()> {
        let palette = self.console.palette();
        self.console.header("--- Overall Stats & Records ---");

        match self.storage().load_stats().await {
            Ok(history) => {
                if let Some(peak) = report::peak_followers(&history) {
                    self.console
                        .block(&ui::display::render_peak_followers(peak, palette));
                }
            }
            Err(e) if e.is_absent_or_corrupt() => {
                self.console.warn("\nCould not find follower history.")
            }
            Err(e) => return Err(e.into()),
        }

        let posts = match self.storage().load_posts().await {
            Ok(posts) => posts,
            Err(e) if e.is_absent_or_corrupt() => {
                self.console
                    .warn("\nCould not find posts to analyze.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let Some(records) = report::post_records(&posts) else {
            self.console.warn("\nNo posts to analyze.");
            return Ok(());
        };

        let snippet = self.config.display.snippet_length;
        for (label, post, count) in [
            (
                "Most Replies",
                records.most_replies,
                records.most_replies.replies_count,
            ),
            (
                "Most ReTruths",
                records.most_reblogs,
                records.most_reblogs.reblogs_count,
            ),
            (
                "Most Favourites",
                records.most_favourites,
                records.most_favourites.favourites_count,
            ),
        ] {
            self.console
                .block(&ui::display::render_record(label, post, count, snippet, palette));
        }
        Ok(())
    }

    async fn analyze_trends(&self) -> Result<()> {
        if !self.caps.chart {
            self.console.fail(
                "Chart rendering is not available in this build. Rebuild with `--features chart` to use this feature.",
            );
            return Ok(());
        }

        self.show_trend_chart().await
    }

    #[cfg(feature = "chart")]
    async fn show_trend_chart(&self) -> Result<()> {
        self.console.header("--- Analyzing Posting Trends ---");
        let posts = match self.storage().load_posts().await {
            Ok(posts) => posts,
            Err(e) if e.is_absent_or_corrupt() => {
                self.console
                    .fail("No post data found. Fetch some posts first.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        if posts.is_empty() {
            self.console.warn(&format!(
                "Your {} file is empty.",
                self.config.paths.posts_file
            ));
            return Ok(());
        }

        let months = report::monthly_counts(&posts);
        if months.is_empty() {
            self.console
                .fail("Could not find any valid dates in the posts.");
            return Ok(());
        }

        self.console.block(&ui::display::render_chart(
            &months,
            self.config.display.chart_width,
            self.console.palette(),
        ));
        Ok(())
    }

    #[cfg(not(feature = "chart"))]
    async fn show_trend_chart(&self) -> Result<()> {
        self.console
            .fail("This build has no chart renderer.");
        Ok(())
    }

    async fn check_connection(&self) {
        self.console.info("\nPinging API to check status...");
        match self.engine.probe().await {
            Ok(code) => {
                let status = ConnectionStatus::from_code(code);
                let message = status.describe(code);
                if status.is_ok() {
                    self.console.success(&message);
                } else if status == ConnectionStatus::Unexpected {
                    self.console.warn(&message);
                } else {
                    self.console.fail(&message);
                }
            }
            Err(e) => {
                self.console
                    .fail("❌ A network error occurred. Check your internet connection.");
                self.console.dim(&e.to_string());
            }
        }
    }

    async fn show_unseen(&self) -> Result<()> {
        let posts = match self.storage().load_posts().await {
            Ok(posts) => posts,
            Err(LoadError::NotFound(_)) => {
                self.console
                    .warn("No local post data found. Fetch some posts first.");
                return Ok(());
            }
            Err(LoadError::Parse { path, .. }) => {
                self.console
                    .warn(&format!("Could not read {}.", path.display()));
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        if posts.is_empty() {
            self.console.warn("No posts found in the local archive.");
            return Ok(());
        }

        let threshold = self.config.display.unseen_confirm_threshold;
        let check = report::review_unseen(self.storage(), &posts, Utc::now(), |unseen| {
            self.present_unseen(unseen, threshold)
        })
        .await?;

        if check == UnseenCheck::FirstCheck {
            self.console
                .info("No previous check found. All posts are considered old.");
        }
        Ok(())
    }

    fn present_unseen(&self, unseen: &[&Post], threshold: usize) {
        if unseen.is_empty() {
            self.console.info("No new posts since your last check!");
            return;
        }

        if unseen.len() > threshold {
            self.console.warn(&format!(
                "There are {} new posts since your last check.",
                unseen.len()
            ));
            let answer = self
                .console
                .prompt("Show all new posts? (y/N): ")
                .unwrap_or_default();
            if !answer.eq_ignore_ascii_case("y") {
                self.console.dim("Returning to main menu...");
                return;
            }
        }

        self.console.success(&format!(
            "Showing {} new post(s) since your last check:",
            unseen.len()
        ));
        self.print_posts(unseen);
    }

    fn print_posts(&self, posts: &[&Post]) {
        for post in posts {
            self.console
                .block(&ui::display::render_post(post, self.console.palette()));
        }
    }
}
