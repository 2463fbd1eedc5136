pub mod client;
pub mod errors;
pub mod types;

pub use client::{FilingApi, HttpFilingApi};
pub use errors::ApiError;
pub use types::*;
