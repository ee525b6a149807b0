//! Utility functions for input validation.

pub mod validation;
