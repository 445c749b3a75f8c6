use kodirun_core::Item;

/// The user-facing side of a run.
///
/// The engine only decides what to show and what to do with the answer, so a
/// terminal, a test script or another UI can drive it unchanged.
pub trait Console {
    /// Show a full listing, including entries that cannot be selected.
    fn display(&mut self, items: &[Item]) -> std::io::Result<()>;

    /// Pick one of `items`; `None` ends the interactive run.
    fn choose(&mut self, items: &[Item]) -> std::io::Result<Option<Item>>;

    /// Whether the crawl should fetch another listing.
    fn confirm_continue(&mut self) -> std::io::Result<bool>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn display(&mut self, items: &[Item]) -> std::io::Result<()> {
        (**self).display(items)
    }

    fn choose(&mut self, items: &[Item]) -> std::io::Result<Option<Item>> {
        (**self).choose(items)
    }

    fn confirm_continue(&mut self) -> std::io::Result<bool> {
        (**self).confirm_continue()
    }
}
