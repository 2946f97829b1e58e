//! CLI subcommand handlers

pub mod config;
pub mod ls;
pub mod markers;
pub mod new;
pub mod review;
