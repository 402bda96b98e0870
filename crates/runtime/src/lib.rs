pub mod channel;
pub mod command;
pub mod job;

pub use channel::*;
pub use command::*;
pub use job::*;
