//! Type definitions for costwatch

mod cost;
mod error;

pub use cost::*;
pub use error::*;
