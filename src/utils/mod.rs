//! Utility modules

pub mod memory_feed;

pub use memory_feed::*;
