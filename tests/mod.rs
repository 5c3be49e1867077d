//! Integration tests for the enhanced driver camera settings
//!
//! Unit tests live next to the code in src/; these exercise the public API
//! end to end.

pub mod controller;
pub mod state;


pub mod common {
    //! Common test configuration

    /// Temporary directory removed when dropped
    pub fn get_test_temp_dir() -> tempfile::TempDir {
        tempfile::TempDir::new().expect("Failed to create temporary directory for tests")
    }

    pub use crate::test_utils::constants::QUICK_TEST_TIMEOUT_MS;
}
