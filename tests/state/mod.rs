//! State management integration tests

pub mod ordering_test;
pub mod storage_test;
pub mod store_test;
