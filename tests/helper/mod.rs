//! Shared test utilities

mod feed;

pub use feed::*;
