pub mod types;

pub use types::FilingLensError;
