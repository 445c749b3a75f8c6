use kodirun_core::InvokeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    /// The plugin failed; never retried.
    #[error(transparent)]
    Invoke(#[from] InvokeError),
    #[error("console I/O failed: {0}")]
    Console(#[from] std::io::Error),
    /// Going up from an update-in-place listing needs two entries on the
    /// back-stack; a run that started inside such a listing only has one.
    #[error("no parent listing to return to from {path}")]
    MissingParent { path: String },
}
