pub mod args;
pub mod config;
pub mod export;
mod fetch;

pub use args::{Cli, Commands, ExportArgs};
pub use config::PenportConfig;
pub use export::{run, Source};
pub use fetch::{fetch_file, GET_FILE_URL};
