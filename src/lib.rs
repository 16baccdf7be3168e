// tasktrack - personal task tracking over a plain-text store

pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod render;
pub mod shell;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use codec::TaskFile;
pub use config::Config;
pub use error::{Result, StoreError};
pub use export::{ExportFormat, ExportOutcome, Exporter};
pub use filter::TaskFilter;
pub use shell::Shell;
pub use store::Store;
pub use task::{NO_DEADLINE, Priority, Status, Task};
