//! CLI command implementations.

pub mod blocks;
pub mod check;
pub mod common;
pub mod factory;
pub mod run;
