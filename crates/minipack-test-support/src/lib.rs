//! Test support utilities and fixtures for minipack tests

pub mod harness;
pub mod memory;
pub mod mocks;
pub mod scripted;

pub use harness::TestWorkspace;
pub use memory::MemoryReader;
pub use scripted::{CountingLoader, DirectResolver, ScriptedLoader};

/// Get the path to test fixtures directory
pub fn fixtures_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}
