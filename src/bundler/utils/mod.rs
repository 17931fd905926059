//! Shared helpers for staging and output collection.

pub mod fs;
