use crate::console::Console;
use crate::error::NavError;
use crate::runner::Runner;
use crate::session::NavigationSession;
use kodirun_core::{Item, PluginInvoker};

/// Drives an interactive run: show a listing, take a choice, load the next one.
#[derive(Debug, Default)]
pub struct Navigator {
    session: NavigationSession,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    /// Render the runner's current target with the top of the back-stack as `..`.
    pub fn show<P: PluginInvoker, C: Console + ?Sized>(
        &mut self,
        runner: &mut Runner<P>,
        console: &mut C,
    ) -> Result<&[Item], NavError> {
        let result = runner.run_once(self.session.parent_item(), console)?;
        self.session.present(result.items, result.update_listing);
        Ok(self.session.current_items())
    }

    /// Apply a selection from the listing on screen and retarget the runner.
    pub fn select<P: PluginInvoker>(
        &mut self,
        runner: &mut Runner<P>,
        selected: Item,
    ) -> Result<(), NavError> {
        let next = self.session.select(selected, &runner.target().path)?;
        runner.patch(next.path(), None);
        Ok(())
    }

    /// Loop until the user makes no selection.
    pub fn run<P: PluginInvoker, C: Console + ?Sized>(
        &mut self,
        runner: &mut Runner<P>,
        console: &mut C,
    ) -> Result<(), NavError> {
        loop {
            let items = self.show(runner, console)?;
            let Some(selected) = console.choose(items)? else {
                tracing::info!(
                    path = %runner.target().path,
                    depth = self.session.parent_stack().len(),
                    "Interactive run finished"
                );
                return Ok(());
            };
            self.select(runner, selected)?;
        }
    }
}

/// Run interactively from the runner's current target.
pub fn interactive<P: PluginInvoker, C: Console + ?Sized>(
    runner: &mut Runner<P>,
    console: &mut C,
) -> Result<(), NavError> {
    Navigator::new().run(runner, console)
}
