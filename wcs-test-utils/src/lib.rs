//! Test utilities for the workspace deployment client
//!
//! This crate provides an in-memory [`MockWorkspaceService`] with call
//! recording and failure injection, plus builders for dialog node fixtures.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::NodeBuilder;
pub use mocks::{MockWorkspaceService, ServiceCall};
