//! Integration tests for embed-broker
//!
//! These tests drive the real HTTP clients against stubbed upstream services.

pub mod embed_flow_tests;
pub mod error_handling_tests;
