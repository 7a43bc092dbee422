pub mod account;
pub mod interview;
pub mod outcome;
pub mod user;

pub use account::*;
pub use interview::*;
pub use outcome::*;
pub use user::*;
