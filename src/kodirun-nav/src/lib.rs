//! Navigation engine for plugin listings.
//!
//! Both run modes sit on the [`Runner`], which invokes the plugin once per
//! listing:
//! - [`Navigator`] walks listings interactively, keeping a back-stack of `..`
//!   entries so the user can always return to the parent listing.
//! - [`crawl`] explores every reachable listing breadth-first, fetching each
//!   path at most once.

mod console;
mod crawl;
mod error;
mod interactive;
mod mode;
mod runner;
mod session;

pub use console::Console;
pub use crawl::{crawl, CrawlReport, CrawlState};
pub use error::NavError;
pub use interactive::{interactive, Navigator};
pub use mode::{run, ParseRunModeError, RunMode};
pub use runner::{once, Runner};
pub use session::NavigationSession;
