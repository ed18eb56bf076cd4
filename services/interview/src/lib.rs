//! Interview CLI Library Crate
//!
//! Configuration, command-line handling and session wiring for the
//! `interview` binary, which is a thin wrapper around this library.

pub mod cli;
pub mod config;
pub mod session;
