//! [`PluginInvoker`] over an external plugin process.

use crate::host::{result_name, ExecPluginHost, PluginConfig, PluginHostError};
use crate::protocol::{PluginMethod, PluginResult};
use kodirun_core::{InvokeError, InvokeResult, PluginInvocationResult, PluginInvoker, PluginTarget};

/// A plugin running in its own process.
pub struct ExecPlugin {
    host: ExecPluginHost,
    id: String,
    name: String,
}

impl ExecPlugin {
    /// Spawn the plugin and complete the handshake.
    pub fn start(config: PluginConfig) -> Result<Self, PluginHostError> {
        let mut host = ExecPluginHost::new(config);
        let info = host.start()?;
        Ok(Self {
            host,
            id: info.id,
            name: info.name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stop(&mut self) -> Result<(), PluginHostError> {
        self.host.stop()
    }

    fn map_host_error(err: PluginHostError) -> InvokeError {
        match err {
            PluginHostError::ParseError(_)
            | PluginHostError::IdMismatch { .. }
            | PluginHostError::ProtocolMismatch { .. }
            | PluginHostError::UnexpectedResponse { .. } => InvokeError::Protocol {
                message: err.to_string(),
            },
            other => InvokeError::Transport {
                message: other.to_string(),
            },
        }
    }

    fn unexpected(method: &'static str, result: &PluginResult) -> InvokeError {
        Self::map_host_error(PluginHostError::UnexpectedResponse {
            method,
            received: result_name(result),
        })
    }
}

impl PluginInvoker for ExecPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn clear_added_items(&mut self) -> InvokeResult<()> {
        match self
            .host
            .send_request(PluginMethod::ClearAddedItems)
            .map_err(Self::map_host_error)?
        {
            PluginResult::Cleared => Ok(()),
            PluginResult::Error(err) => Err(err.into()),
            other => Err(Self::unexpected("ClearAddedItems", &other)),
        }
    }

    fn invoke(&mut self, target: &PluginTarget) -> InvokeResult<PluginInvocationResult> {
        let result = self
            .host
            .send_request(PluginMethod::Invoke {
                path: target.path.clone(),
                handle: target.handle,
            })
            .map_err(Self::map_host_error)?;

        match result {
            PluginResult::Listing(reply) => {
                let listing = reply.into_result(target.handle);
                tracing::debug!(
                    plugin_id = %self.id,
                    path = %target.path,
                    items = listing.items.len(),
                    update_listing = listing.update_listing,
                    handle = %listing.handle,
                    "Plugin returned listing"
                );
                Ok(listing)
            }
            PluginResult::Error(err) => Err(err.into()),
            other => Err(Self::unexpected("Invoke", &other)),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::host::tests::demo_plugin_script;
    use crate::protocol::PROTOCOL_VERSION;
    use kodirun_core::Handle;

    #[test]
    fn invoke_returns_listing_with_flags() {
        let script = demo_plugin_script(PROTOCOL_VERSION);
        let mut plugin = ExecPlugin::start(PluginConfig::new(script.to_path_buf())).unwrap();
        assert_eq!(plugin.id(), "plugin.video.demo");
        assert_eq!(plugin.name(), "Demo");

        plugin.clear_added_items().unwrap();
        let sorted = plugin
            .invoke(&PluginTarget::new(
                "plugin://plugin.video.demo/sorted",
                Handle(0),
            ))
            .unwrap();
        assert!(sorted.update_listing);
        assert_eq!(sorted.handle, Handle(4));
        assert_eq!(sorted.items[0].label(), "Clip");
    }

    #[test]
    fn omitted_handle_keeps_last_used_handle() {
        let script = demo_plugin_script(PROTOCOL_VERSION);
        let mut plugin = ExecPlugin::start(PluginConfig::new(script.to_path_buf())).unwrap();
        let mut target = PluginTarget::new("plugin://plugin.video.demo/", Handle(0));

        let root = plugin.invoke(&target).unwrap();
        assert_eq!(root.handle, Handle(4));

        target.path = "plugin://plugin.video.demo/nohandle".into();
        target.handle = root.handle;
        let next = plugin.invoke(&target).unwrap();
        assert_eq!(next.handle, Handle(4));
        assert_eq!(next.items[0].path(), "plugin://plugin.video.demo/clip");
    }

    #[test]
    fn plugin_errors_propagate() {
        let script = demo_plugin_script(PROTOCOL_VERSION);
        let mut plugin = ExecPlugin::start(PluginConfig::new(script.to_path_buf())).unwrap();
        let err = plugin
            .invoke(&PluginTarget::new(
                "plugin://plugin.video.demo/missing",
                Handle(0),
            ))
            .unwrap_err();
        assert!(matches!(err, InvokeError::NotFound { .. }));
    }
}
