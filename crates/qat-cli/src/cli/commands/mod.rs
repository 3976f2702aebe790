//! CLI command handlers. Each command is in its own file.

mod config;
mod download;
mod events;
mod list;
mod upload;

pub use config::run_config;
pub use download::run_download;
pub use events::spawn_event_log;
pub use list::run_list;
pub use upload::run_upload;
