//! Integration test modules.

mod auth_test;
mod failing_store_test;
mod persistence_roundtrip_test;
