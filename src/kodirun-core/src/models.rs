use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a listing item.
///
/// Issued once per constructed (or deserialized) item; clones keep the id, so
/// a clone is the same logical item. Never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

impl ItemId {
    fn issue() -> Self {
        ItemId(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One entry of a plugin listing.
///
/// The path is the only key used for deduplication and re-navigation; the id
/// is the only key used for identity checks against the parent stack. There is
/// no `PartialEq`: compare with [`Item::is_same`] or by [`Item::path`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ItemRecord", into = "ItemRecord")]
pub struct Item {
    id: ItemId,
    label: String,
    path: String,
    is_directory: bool,
    played: bool,
}

impl Item {
    pub fn new(label: impl Into<String>, path: impl Into<String>, is_directory: bool) -> Self {
        Self {
            id: ItemId::issue(),
            label: label.into(),
            path: path.into(),
            is_directory,
            played: false,
        }
    }

    pub fn directory(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(label, path, true)
    }

    pub fn playable(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(label, path, false)
    }

    /// The synthetic `..` entry that leads back to the listing at `path`.
    pub fn parent(path: impl Into<String>) -> Self {
        Self::directory("..", path)
    }

    pub fn with_played(mut self, played: bool) -> Self {
        self.played = played;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn is_played(&self) -> bool {
        self.played
    }

    /// Identity comparison, independent of field contents.
    pub fn is_same(&self, other: &Item) -> bool {
        self.id == other.id
    }
}

#[derive(Serialize, Deserialize)]
struct ItemRecord {
    label: String,
    path: String,
    #[serde(default)]
    is_directory: bool,
    #[serde(default)]
    played: bool,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Item::new(record.label, record.path, record.is_directory).with_played(record.played)
    }
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        Self {
            label: item.label,
            path: item.path,
            is_directory: item.is_directory,
            played: item.played,
        }
    }
}

/// Opaque integer correlating a plugin request with its response context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(pub i32);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address the next plugin invocation is made against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginTarget {
    pub path: String,
    pub handle: Handle,
}

impl PluginTarget {
    pub fn new(path: impl Into<String>, handle: Handle) -> Self {
        Self {
            path: path.into(),
            handle,
        }
    }

    /// Default start path for a plugin, `plugin://<id>/`.
    pub fn root_of(plugin_id: &str) -> Self {
        Self::new(format!("plugin://{plugin_id}/"), Handle::default())
    }
}
