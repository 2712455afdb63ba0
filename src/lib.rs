//! panrun - run pandoc conversions from the command line
//!
//! This library crate exposes configuration loading for integration testing.

pub mod config;
