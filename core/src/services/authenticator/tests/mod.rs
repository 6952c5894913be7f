//! Tests for the request authenticator

mod service_tests;
