pub mod config;
pub mod export;
pub mod lists;
pub mod progress;
pub mod prompts;
pub mod session;
