//! CLI command implementations.

pub mod common;
pub mod info;
pub mod play;
pub mod preview;
pub mod render;
