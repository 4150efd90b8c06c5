pub mod builder;
pub mod config;
pub mod error;
pub mod http;
pub mod layers;
pub mod plugin;
pub mod plugins;

pub use builder::{AppBuilder, MountInfo, ROOT_PREFIX};
pub use config::{AppConfig, ConfigError, ConfigValue, FromConfigValue};
pub use error::{error_response, HttpError};
pub use layers::{default_cors, default_trace, init_tracing};
pub use plugin::Plugin;
pub use plugins::{Cors, Tracing};
