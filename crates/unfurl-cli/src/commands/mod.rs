//! Command implementations.

pub mod completion;
pub mod detect;
pub mod expand;
