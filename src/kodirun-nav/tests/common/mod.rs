#![allow(dead_code)]

use kodirun_core::Item;
use kodirun_nav::Console;
use std::collections::VecDeque;

/// What the scripted user does at the next prompt.
#[derive(Debug, Clone)]
pub enum Pick {
    Path(&'static str),
    /// The `..` entry at the top of the listing.
    Parent,
    Quit,
}

/// Console that follows a script and records everything it was shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    picks: VecDeque<Pick>,
    continues: Option<usize>,
    pub displayed: Vec<Vec<Item>>,
    pub offered: Vec<Vec<Item>>,
    pub confirmations: usize,
}

impl ScriptedConsole {
    pub fn picking(picks: impl IntoIterator<Item = Pick>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Confirm every crawl step.
    pub fn always_continue() -> Self {
        Self::default()
    }

    /// Confirm `n` crawl steps, then decline.
    pub fn continue_times(n: usize) -> Self {
        Self {
            continues: Some(n),
            ..Self::default()
        }
    }

    pub fn displayed_paths(&self, index: usize) -> Vec<String> {
        self.displayed[index]
            .iter()
            .map(|item| item.path().to_string())
            .collect()
    }
}

impl Console for ScriptedConsole {
    fn display(&mut self, items: &[Item]) -> std::io::Result<()> {
        self.displayed.push(items.to_vec());
        Ok(())
    }

    fn choose(&mut self, items: &[Item]) -> std::io::Result<Option<Item>> {
        self.offered.push(items.to_vec());
        let picked = match self.picks.pop_front() {
            None | Some(Pick::Quit) => None,
            Some(Pick::Parent) => items.iter().find(|item| item.label() == "..").cloned(),
            Some(Pick::Path(path)) => items
                .iter()
                .find(|item| item.path() == path && item.label() != "..")
                .cloned(),
        };
        Ok(picked)
    }

    fn confirm_continue(&mut self) -> std::io::Result<bool> {
        self.confirmations += 1;
        Ok(match self.continues {
            None => true,
            Some(limit) => self.confirmations <= limit,
        })
    }
}
