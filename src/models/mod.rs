pub mod filing;
pub mod message;
pub mod report;

pub use filing::*;
pub use message::*;
pub use report::*;
