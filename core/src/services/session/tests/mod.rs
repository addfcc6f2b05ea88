//! Tests for the session admission state machine

mod admission_tests;
