pub mod config;
pub mod paths;
pub mod store;

pub use config::{Config, HttpSettings, ProxyConfig, TraktConfig};
pub use paths::{config_dir_override, PathManager};
pub use store::ConfigStore;
