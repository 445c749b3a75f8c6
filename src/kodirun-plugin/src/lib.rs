//! Plugin invokers for kodirun.
//!
//! This crate provides:
//! - A JSON-lines protocol for driving an external plugin process
//! - An exec-based host that spawns the process and correlates requests
//! - [`ExecPlugin`], the [`PluginInvoker`](kodirun_core::PluginInvoker) over that host
//! - [`FixturePlugin`], an invoker serving listings from a TOML file
//!
//! # Plugin Protocol
//!
//! The runner writes one [`PluginRequest`] per line to the plugin's stdin and
//! reads one [`PluginResponse`] per line from its stdout:
//!
//! ```text
//! -> {"id":1,"method":{"type":"Initialize"}}
//! <- {"id":1,"result":{"status":"Initialized","id":"plugin.video.demo","name":"Demo","version":"1.0.0","protocol_version":1}}
//! -> {"id":2,"method":{"type":"ClearAddedItems"}}
//! <- {"id":2,"result":{"status":"Cleared"}}
//! -> {"id":3,"method":{"type":"Invoke","params":{"path":"plugin://plugin.video.demo/","handle":0}}}
//! <- {"id":3,"result":{"status":"Listing","items":[...],"update_listing":false,"handle":0}}
//! ```

mod adapter;
mod fixture;
mod host;
pub mod protocol;

pub use adapter::ExecPlugin;
pub use fixture::{FixtureError, FixturePlugin};
pub use host::{ExecPluginHost, PluginConfig, PluginHostError};
pub use protocol::{
    ListingReply, PluginError, PluginErrorKind, PluginInfo, PluginMethod, PluginRequest,
    PluginResponse, PluginResult, PROTOCOL_VERSION,
};
