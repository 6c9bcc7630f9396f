//! `shapeassist-replay` library crate.
//!
//! Replays a recorded interaction session against an inference server.
//! The binary entrypoint lives in `main.rs`; the modules are exposed for
//! integration testing.

pub mod config;
pub mod runner;
pub mod script;

pub use config::{ConfigError, ReplayConfig};
pub use runner::{replay, run, ReplayError, ReplayReport};
pub use script::{ScriptError, SessionScript};
