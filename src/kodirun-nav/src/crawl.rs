use crate::console::Console;
use crate::error::NavError;
use crate::runner::Runner;
use kodirun_core::{Item, PluginInvoker};
use std::collections::HashSet;

/// Paths fetched so far and paths discovered but not yet fetched.
///
/// `visited` only grows; a path enters `frontier` only if it was never visited.
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    frontier: HashSet<String>,
}

impl CrawlState {
    /// State for a crawl whose first listing was fetched from `start`.
    pub fn starting_at(start: &str, first_listing: &[Item]) -> Self {
        let mut state = Self::default();
        state.visited.insert(start.to_string());
        state.discover(first_listing);
        state
    }

    pub fn discover(&mut self, items: &[Item]) {
        for item in items {
            if !self.visited.contains(item.path()) {
                self.frontier.insert(item.path().to_string());
            }
        }
    }

    /// Move an arbitrary frontier path to `visited` and return it.
    ///
    /// Visitation order within the frontier is unspecified.
    pub fn next_path(&mut self) -> Option<String> {
        let path = self.frontier.iter().next().cloned()?;
        self.frontier.remove(&path);
        self.visited.insert(path.clone());
        Some(path)
    }

    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn frontier(&self) -> &HashSet<String> {
        &self.frontier
    }
}

/// Outcome of a crawl run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Paths fetched, in the order they were fetched; the start path first.
    pub fetched: Vec<String>,
    /// Paths discovered but never fetched because the user stopped early.
    pub remaining: usize,
}

impl CrawlReport {
    /// Whether every reachable listing was fetched.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Breadth-first exploration of every listing reachable from the runner's target.
///
/// The user is asked before each fetch after the first; declining ends the crawl
/// with a partial report.
pub fn crawl<P: PluginInvoker, C: Console + ?Sized>(
    runner: &mut Runner<P>,
    console: &mut C,
) -> Result<CrawlReport, NavError> {
    let start = runner.target().path.clone();
    let first = runner.run_once(None, console)?;
    let mut state = CrawlState::starting_at(&start, &first.items);
    let mut fetched = vec![start];

    while !state.is_exhausted() && console.confirm_continue()? {
        let Some(path) = state.next_path() else {
            break;
        };
        tracing::debug!(path = %path, pending = state.frontier().len(), "Crawling listing");
        runner.patch(path.as_str(), None);
        let listing = runner.run_once(None, console)?;
        state.discover(&listing.items);
        fetched.push(path);
    }

    let report = CrawlReport {
        fetched,
        remaining: state.frontier().len(),
    };
    tracing::info!(
        fetched = report.fetched.len(),
        remaining = report.remaining,
        "Crawl finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_skips_visited_paths() {
        let mut state = CrawlState::starting_at(
            "plugin://demo/",
            &[
                Item::directory("Self", "plugin://demo/"),
                Item::directory("A", "plugin://demo/a"),
            ],
        );
        assert_eq!(state.frontier().len(), 1);

        let next = state.next_path().unwrap();
        assert_eq!(next, "plugin://demo/a");
        state.discover(&[
            Item::directory("A", "plugin://demo/a"),
            Item::directory("Root", "plugin://demo/"),
        ]);
        assert!(state.is_exhausted());
        assert_eq!(state.visited().len(), 2);
    }

    #[test]
    fn duplicates_collapse_in_frontier() {
        let state = CrawlState::starting_at(
            "plugin://demo/",
            &[
                Item::directory("A", "plugin://demo/a"),
                Item::playable("A again", "plugin://demo/a"),
            ],
        );
        assert_eq!(state.frontier().len(), 1);
    }
}
