//! Configuration for the cssjanus command-line tool
//!
//! Provides types and loading for `janus.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
