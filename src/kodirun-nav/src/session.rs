use crate::error::NavError;
use kodirun_core::Item;

/// State of one interactive run.
///
/// `parent_stack` runs from the outermost ancestor to the immediate parent of
/// the current listing; its top is offered as `..` in every listing.
#[derive(Debug, Default)]
pub struct NavigationSession {
    parent_stack: Vec<Item>,
    current_items: Vec<Item>,
    update_listing: bool,
}

impl NavigationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parent_stack(&self) -> &[Item] {
        &self.parent_stack
    }

    /// The entry offered as `..` in the next listing.
    pub fn parent_item(&self) -> Option<&Item> {
        self.parent_stack.last()
    }

    /// Selectable entries of the listing on screen; played items are never included.
    pub fn current_items(&self) -> &[Item] {
        &self.current_items
    }

    /// Whether the listing on screen replaced its parent rather than descending from it.
    pub fn is_update_listing(&self) -> bool {
        self.update_listing
    }

    /// Replace the listing on screen with a freshly rendered one.
    pub fn present(&mut self, items: Vec<Item>, update_listing: bool) {
        self.current_items = items.into_iter().filter(|item| !item.is_played()).collect();
        self.update_listing = update_listing;
    }

    /// Record the user's selection and return the item whose path to load next.
    ///
    /// `current_path` is the path of the listing on screen; a normal selection
    /// pushes a `..` entry pointing back to it. Update-in-place listings never
    /// add a level. Going up from one pops twice: the entry pushed on the way
    /// into the listing it replaced is stale, and the one below it is the real
    /// parent. A run that starts inside an update-in-place listing has no such
    /// entry, which surfaces as [`NavError::MissingParent`].
    pub fn select(&mut self, selected: Item, current_path: &str) -> Result<Item, NavError> {
        let is_parent = self
            .parent_stack
            .last()
            .is_some_and(|top| top.is_same(&selected));

        if is_parent {
            self.parent_stack.pop();
            if !self.update_listing {
                tracing::debug!(path = %selected.path(), "Returning to parent listing");
                return Ok(selected);
            }
            let parent = self
                .parent_stack
                .pop()
                .ok_or_else(|| NavError::MissingParent {
                    path: current_path.to_string(),
                })?;
            tracing::debug!(
                path = %parent.path(),
                "Leaving update-in-place listing for its real parent"
            );
            return Ok(parent);
        }

        if !self.update_listing {
            self.parent_stack.push(Item::parent(current_path));
        }
        tracing::debug!(
            path = %selected.path(),
            depth = self.parent_stack.len(),
            "Descending into selection"
        );
        Ok(selected)
    }
}
