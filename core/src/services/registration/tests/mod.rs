//! Tests for the registration progress tracker
