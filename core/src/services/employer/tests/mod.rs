//! Tests for employer setup operations

mod service_tests;
