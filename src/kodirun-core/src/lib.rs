pub mod config;
pub mod invoker;
pub mod logging;
pub mod models;
pub mod paths;

pub use config::{Config, ConfigError, LogLevel, LoggingConfig, PluginSettings, ValidationError};
pub use invoker::{InvokeError, InvokeResult, PluginInvocationResult, PluginInvoker};
pub use logging::{init_logging, LoggingError, LoggingGuard};
pub use models::{Handle, Item, ItemId, PluginTarget};
pub use paths::{AppDirs, DirsError};

pub const APP_NAME: &str = "kodirun";
pub const APP_AUTHOR: &str = "Kodirun";
pub const APP_QUALIFIER: &str = "io";
