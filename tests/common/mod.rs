//! Common test utilities and helpers
//!
//! Shared fixtures for integration tests (via `helpers`).

pub(crate) mod helpers;

pub(crate) use helpers::create_project;
