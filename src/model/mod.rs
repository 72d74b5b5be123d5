pub mod config;
pub mod note;
pub mod snapshot;

pub use config::*;
pub use note::*;
pub use snapshot::*;
