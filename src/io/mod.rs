pub mod config_io;
pub mod notebook_io;
pub mod watcher;
