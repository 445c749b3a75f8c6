use crate::console::Console;
use crate::error::NavError;
use kodirun_core::{Handle, Item, PluginInvocationResult, PluginInvoker, PluginTarget};

/// Invokes a plugin one listing at a time against a patchable target.
pub struct Runner<P> {
    plugin: P,
    target: PluginTarget,
}

impl<P: PluginInvoker> Runner<P> {
    pub fn new(plugin: P, target: PluginTarget) -> Self {
        Self { plugin, target }
    }

    /// Start at `plugin://<id>/` on handle 0.
    pub fn at_root(plugin: P) -> Self {
        let target = PluginTarget::root_of(plugin.id());
        Self::new(plugin, target)
    }

    pub fn plugin(&self) -> &P {
        &self.plugin
    }

    pub fn target(&self) -> &PluginTarget {
        &self.target
    }

    /// Point the next invocation at `path`, keeping the last handle unless one is given.
    pub fn patch(&mut self, path: impl Into<String>, handle: Option<Handle>) {
        self.target.path = path.into();
        if let Some(handle) = handle {
            self.target.handle = handle;
        }
    }

    /// Invoke the plugin once for the current target.
    ///
    /// `parent`, when given, becomes the first item of the returned listing.
    /// The full listing is displayed before it is returned.
    pub fn run_once<C: Console + ?Sized>(
        &mut self,
        parent: Option<&Item>,
        console: &mut C,
    ) -> Result<PluginInvocationResult, NavError> {
        self.plugin.clear_added_items()?;
        tracing::debug!(path = %self.target.path, handle = %self.target.handle, "Invoking plugin");
        let mut result = self.plugin.invoke(&self.target)?;
        self.target.handle = result.handle;

        if let Some(parent) = parent {
            result.items.insert(0, parent.clone());
        }

        console.display(&result.items)?;
        Ok(result)
    }
}

/// Run the plugin once at its current target and return what it listed.
pub fn once<P: PluginInvoker, C: Console + ?Sized>(
    runner: &mut Runner<P>,
    console: &mut C,
) -> Result<Vec<Item>, NavError> {
    Ok(runner.run_once(None, console)?.items)
}
