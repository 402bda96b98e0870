pub mod commands;
pub mod context;
pub mod ingest;

pub use commands::*;
pub use context::*;
pub use ingest::*;
