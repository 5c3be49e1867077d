//! Settings controller integration tests

pub mod file_backed_test;
