pub mod ask;
pub mod commands;
pub mod health;
pub mod report;

pub use commands::{Cli, Commands};
