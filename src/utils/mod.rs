// Utility functions
pub mod clock;
pub mod error;

pub use clock::*;
pub use error::*;
