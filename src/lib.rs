pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod repl;
pub mod reporting;
pub mod session;
pub mod utils;
