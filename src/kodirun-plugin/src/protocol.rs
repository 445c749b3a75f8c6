//! Wire types for the JSON-lines plugin protocol.

use kodirun_core::{Handle, InvokeError, Item, PluginInvocationResult};
use serde::{Deserialize, Serialize};

/// Protocol version for compatibility checking.
pub const PROTOCOL_VERSION: u32 = 1;

/// Request sent from the runner to a plugin process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginRequest {
    /// Unique request ID for correlation.
    pub id: u64,
    pub method: PluginMethod,
}

/// Response from a plugin process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginResponse {
    /// Request ID this response answers.
    pub id: u64,
    pub result: PluginResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum PluginMethod {
    /// Handshake; the plugin answers with its metadata.
    Initialize,
    /// Reset the items the plugin has accumulated for the current listing.
    ClearAddedItems,
    /// Run the plugin against a path, as the host would on navigation.
    Invoke { path: String, handle: Handle },
    Shutdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum PluginResult {
    Initialized(PluginInfo),
    Cleared,
    Listing(ListingReply),
    ShutdownAck,
    Error(PluginError),
}

/// A listing as the plugin sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingReply {
    pub items: Vec<Item>,
    #[serde(default)]
    pub update_listing: bool,
    /// Handle the plugin answered on; omitted when it kept the request's handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<Handle>,
}

impl ListingReply {
    /// Resolve against the handle the request was sent with.
    pub fn into_result(self, requested: Handle) -> PluginInvocationResult {
        PluginInvocationResult {
            items: self.items,
            update_listing: self.update_listing,
            handle: self.handle.unwrap_or(requested),
        }
    }
}

/// Plugin metadata returned by the handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Addon id, e.g. `plugin.video.demo`.
    pub id: String,
    pub name: String,
    pub version: String,
    pub protocol_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginError {
    pub kind: PluginErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginErrorKind {
    /// No route matched the requested path.
    NotFound,
    ProtocolMismatch,
    /// The plugin raised while building the listing.
    Internal,
}

impl From<PluginError> for InvokeError {
    fn from(err: PluginError) -> Self {
        match err.kind {
            PluginErrorKind::NotFound => Self::NotFound { path: err.message },
            PluginErrorKind::ProtocolMismatch => Self::Protocol {
                message: err.message,
            },
            PluginErrorKind::Internal => Self::Plugin {
                message: err.message,
            },
        }
    }
}
