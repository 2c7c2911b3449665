//! Helpers shared by several solutions

pub mod dp_cache;
pub mod grid;
pub mod parse;
