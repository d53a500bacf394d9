//! Test Module
//!
//! Cross-module test suite for the feedback core.
//!
//! ## Test Categories
//! - `feedback_tests`: Engine behaviour on realistic learner utterances
//! - `rules_tests`: Custom rule books loaded from JSON
//! - `config_tests`: Environment-driven settings
//! - `response_tests`: Personalities and composed replies
//! - `concurrency_tests`: Shared engine used from many tasks

pub mod response_tests;
pub mod rules_tests;
