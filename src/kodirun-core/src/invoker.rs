use crate::models::{Handle, Item, PluginTarget};
use thiserror::Error;

/// Everything one plugin invocation produced.
///
/// The update-in-place flag and the handle used travel with the items instead
/// of being read back from the plugin after the fact.
#[derive(Debug, Clone)]
pub struct PluginInvocationResult {
    pub items: Vec<Item>,
    /// The listing replaces the current one rather than descending from it.
    pub update_listing: bool,
    /// Handle the plugin answered on; becomes the default for the next call.
    pub handle: Handle,
}

impl PluginInvocationResult {
    pub fn listing(items: Vec<Item>, handle: Handle) -> Self {
        Self {
            items,
            update_listing: false,
            handle,
        }
    }

    pub fn update_in_place(items: Vec<Item>, handle: Handle) -> Self {
        Self {
            items,
            update_listing: true,
            handle,
        }
    }
}

/// Common categories of plugin invocation failures.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("plugin transport failed: {message}")]
    Transport { message: String },
    #[error("plugin error: {message}")]
    Plugin { message: String },
    #[error("plugin protocol violation: {message}")]
    Protocol { message: String },
    #[error("no listing for path {path}")]
    NotFound { path: String },
}

pub type InvokeResult<T> = Result<T, InvokeError>;

/// The plugin as seen by the navigation engine.
///
/// Re-entrant: the engine invokes the same plugin repeatedly with different
/// targets. Failures are never retried.
pub trait PluginInvoker {
    /// Addon id, used to build the default `plugin://<id>/` start path.
    fn id(&self) -> &str;

    /// Reset the plugin's "items added so far" accumulator before a new run.
    fn clear_added_items(&mut self) -> InvokeResult<()>;

    fn invoke(&mut self, target: &PluginTarget) -> InvokeResult<PluginInvocationResult>;
}

impl<P: PluginInvoker + ?Sized> PluginInvoker for Box<P> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn clear_added_items(&mut self) -> InvokeResult<()> {
        (**self).clear_added_items()
    }

    fn invoke(&mut self, target: &PluginTarget) -> InvokeResult<PluginInvocationResult> {
        (**self).invoke(target)
    }
}
