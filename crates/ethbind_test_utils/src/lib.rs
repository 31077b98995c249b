//! Utilities shared by the tests of the workspace

/// Helper functions for environment variables
pub mod env;
