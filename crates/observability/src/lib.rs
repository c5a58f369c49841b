//! Process-wide tracing/logging setup shared by engine binaries and
//! integration tests.

pub mod tracing;

pub use tracing::{LogFormat, init, init_with_format};
