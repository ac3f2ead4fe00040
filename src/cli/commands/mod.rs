//! Command implementations for the parsum CLI

pub mod config;
pub mod run;
