//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains the 2024 puzzle solutions, one module per day, plus the
//! small utilities they share (grids, number extraction, memoisation).
//! Each solution uses the `AutoRegisterSolver` derive macro, so linking this
//! crate is enough for the solvers to show up in a registry built with
//! `register_all_plugins`.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
