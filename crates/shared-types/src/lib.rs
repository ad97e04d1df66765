pub mod config;
pub mod error;
pub mod todo;

pub use config::*;
pub use error::*;
pub use todo::*;
