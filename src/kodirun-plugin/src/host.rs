//! Exec-based plugin host that talks to an external process via JSON over stdio.

use crate::protocol::{
    PluginInfo, PluginMethod, PluginRequest, PluginResponse, PluginResult, PROTOCOL_VERSION,
};
use kodirun_core::PluginSettings;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginHostError {
    #[error("no plugin executable configured")]
    MissingExecutable,
    #[error("failed to spawn plugin process: {0}")]
    SpawnFailed(std::io::Error),
    #[error("plugin process has no stdin")]
    NoStdin,
    #[error("plugin process has no stdout")]
    NoStdout,
    #[error("failed to write to plugin: {0}")]
    WriteError(std::io::Error),
    #[error("failed to read from plugin: {0}")]
    ReadError(std::io::Error),
    #[error("failed to parse plugin response: {0}")]
    ParseError(serde_json::Error),
    #[error("protocol version mismatch: expected {expected}, got {actual}")]
    ProtocolMismatch { expected: u32, actual: u32 },
    #[error("unexpected {received} response to {method}")]
    UnexpectedResponse {
        method: &'static str,
        received: &'static str,
    },
    #[error("request/response ID mismatch: sent {sent}, received {received}")]
    IdMismatch { sent: u64, received: u64 },
    #[error("plugin process terminated unexpectedly")]
    ProcessTerminated,
}

/// How to launch an external plugin.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub executable: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl PluginConfig {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            working_dir: None,
            env: Vec::new(),
        }
    }
}

impl TryFrom<&PluginSettings> for PluginConfig {
    type Error = PluginHostError;

    fn try_from(settings: &PluginSettings) -> Result<Self, Self::Error> {
        let executable = settings
            .executable
            .clone()
            .ok_or(PluginHostError::MissingExecutable)?;
        Ok(Self {
            executable,
            args: settings.args.clone(),
            working_dir: settings.working_dir.clone(),
            env: settings
                .env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        })
    }
}

struct Session {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Host for one external plugin process.
///
/// Requests are strictly sequential: one line out, one line back.
pub struct ExecPluginHost {
    config: PluginConfig,
    session: Option<Session>,
    next_request_id: u64,
}

impl ExecPluginHost {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            session: None,
            next_request_id: 1,
        }
    }

    /// Spawn the plugin process and perform the handshake.
    pub fn start(&mut self) -> Result<PluginInfo, PluginHostError> {
        let mut cmd = Command::new(&self.config.executable);
        cmd.args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        if let Some(ref dir) = self.config.working_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.config.env {
            cmd.env(key, value);
        }

        tracing::debug!(executable = %self.config.executable.display(), "Spawning plugin");
        let mut child = cmd.spawn().map_err(PluginHostError::SpawnFailed)?;
        let stdin = child.stdin.take().ok_or(PluginHostError::NoStdin)?;
        let stdout = child.stdout.take().ok_or(PluginHostError::NoStdout)?;
        self.session = Some(Session {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        });

        self.initialize()
    }

    /// Ask the plugin to exit, then reap the process.
    pub fn stop(&mut self) -> Result<(), PluginHostError> {
        if self.session.is_none() {
            return Ok(());
        }

        if let Err(err) = self.send_request(PluginMethod::Shutdown) {
            tracing::debug!(error = %err, "Plugin did not acknowledge shutdown");
        }
        if let Some(mut session) = self.session.take() {
            let _ = session.child.kill();
            let _ = session.child.wait();
        }
        Ok(())
    }

    pub fn is_running(&mut self) -> bool {
        self.session
            .as_mut()
            .map(|s| matches!(s.child.try_wait(), Ok(None)))
            .unwrap_or(false)
    }

    /// Send one request and read its response.
    ///
    /// `Error` results are returned as values so callers can map them.
    pub fn send_request(&mut self, method: PluginMethod) -> Result<PluginResult, PluginHostError> {
        let id = self.next_request_id;
        self.next_request_id += 1;
        let json = serde_json::to_string(&PluginRequest { id, method })
            .map_err(PluginHostError::ParseError)?;

        let session = self
            .session
            .as_mut()
            .ok_or(PluginHostError::ProcessTerminated)?;
        tracing::trace!(request = %json, "-> plugin");
        writeln!(session.stdin, "{json}").map_err(PluginHostError::WriteError)?;
        session.stdin.flush().map_err(PluginHostError::WriteError)?;

        let mut line = String::new();
        session
            .stdout
            .read_line(&mut line)
            .map_err(PluginHostError::ReadError)?;
        if line.is_empty() {
            return Err(PluginHostError::ProcessTerminated);
        }
        tracing::trace!(response = %line.trim_end(), "<- plugin");

        let response: PluginResponse =
            serde_json::from_str(&line).map_err(PluginHostError::ParseError)?;
        if response.id != id {
            return Err(PluginHostError::IdMismatch {
                sent: id,
                received: response.id,
            });
        }
        Ok(response.result)
    }

    fn initialize(&mut self) -> Result<PluginInfo, PluginHostError> {
        match self.send_request(PluginMethod::Initialize)? {
            PluginResult::Initialized(info) => {
                if info.protocol_version != PROTOCOL_VERSION {
                    return Err(PluginHostError::ProtocolMismatch {
                        expected: PROTOCOL_VERSION,
                        actual: info.protocol_version,
                    });
                }
                tracing::info!(
                    plugin_id = %info.id,
                    plugin_name = %info.name,
                    plugin_version = %info.version,
                    "Plugin initialized"
                );
                Ok(info)
            }
            other => Err(PluginHostError::UnexpectedResponse {
                method: "Initialize",
                received: result_name(&other),
            }),
        }
    }
}

pub(crate) fn result_name(result: &PluginResult) -> &'static str {
    match result {
        PluginResult::Initialized(_) => "Initialized",
        PluginResult::Cleared => "Cleared",
        PluginResult::Listing(_) => "Listing",
        PluginResult::ShutdownAck => "ShutdownAck",
        PluginResult::Error(_) => "Error",
    }
}

impl Drop for ExecPluginHost {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
