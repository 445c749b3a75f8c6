//! A plugin that serves canned listings, loaded from TOML.
//!
//! ```toml
//! id = "plugin.video.demo"
//!
//! [[listing]]
//! path = "plugin://plugin.video.demo/"
//!
//! [[listing.items]]
//! label = "Videos"
//! path = "plugin://plugin.video.demo/videos/"
//! is_directory = true
//! ```

use kodirun_core::{
    InvokeError, InvokeResult, Item, PluginInvocationResult, PluginInvoker, PluginTarget,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse fixture at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("listing {path} is defined more than once")]
    DuplicateListing { path: String },
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    id: String,
    #[serde(default)]
    listing: Vec<FixtureListing>,
}

#[derive(Debug, Clone, Deserialize)]
struct FixtureListing {
    path: String,
    #[serde(default)]
    update_listing: bool,
    #[serde(default)]
    items: Vec<Item>,
}

/// In-process plugin backed by a fixed path -> listing table.
///
/// Every call records the invoked path, and every listing is minted with fresh
/// item ids, just as a real plugin builds new items on each run.
#[derive(Debug, Default)]
pub struct FixturePlugin {
    id: String,
    listings: HashMap<String, FixtureListing>,
    invocations: Vec<String>,
    clears: usize,
}

impl FixturePlugin {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FixtureFile = toml::from_str(&contents).map_err(|source| FixtureError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut plugin = Self::new(file.id);
        for listing in file.listing {
            if plugin.listings.contains_key(&listing.path) {
                return Err(FixtureError::DuplicateListing { path: listing.path });
            }
            plugin.listings.insert(listing.path.clone(), listing);
        }
        tracing::debug!(
            fixture = %path.display(),
            listings = plugin.listings.len(),
            "Loaded fixture plugin"
        );
        Ok(plugin)
    }

    /// Register a normal directory listing.
    pub fn with_listing(self, path: impl Into<String>, items: Vec<Item>) -> Self {
        self.insert(path.into(), items, false)
    }

    /// Register a listing that replaces its parent instead of descending.
    pub fn with_update_listing(self, path: impl Into<String>, items: Vec<Item>) -> Self {
        self.insert(path.into(), items, true)
    }

    fn insert(mut self, path: String, items: Vec<Item>, update_listing: bool) -> Self {
        self.listings.insert(
            path.clone(),
            FixtureListing {
                path,
                update_listing,
                items,
            },
        );
        self
    }

    /// Paths passed to [`PluginInvoker::invoke`], in call order.
    pub fn invocations(&self) -> &[String] {
        &self.invocations
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl PluginInvoker for FixturePlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn clear_added_items(&mut self) -> InvokeResult<()> {
        self.clears += 1;
        Ok(())
    }

    fn invoke(&mut self, target: &PluginTarget) -> InvokeResult<PluginInvocationResult> {
        self.invocations.push(target.path.clone());
        let listing = self
            .listings
            .get(&target.path)
            .ok_or_else(|| InvokeError::NotFound {
                path: target.path.clone(),
            })?;

        let items = listing
            .items
            .iter()
            .map(|item| {
                Item::new(item.label(), item.path(), item.is_directory())
                    .with_played(item.is_played())
            })
            .collect();
        Ok(PluginInvocationResult {
            items,
            update_listing: listing.update_listing,
            handle: target.handle,
        })
    }
}
