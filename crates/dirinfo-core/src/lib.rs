//! Shared configuration, error and constant definitions for the
//! directory-information workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
