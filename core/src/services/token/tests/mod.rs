//! Tests for the session token codec
