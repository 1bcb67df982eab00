pub mod error;
pub mod log;
pub mod math;
pub mod operations;
pub mod surface;

pub use error::{Result, SeamlineError};
