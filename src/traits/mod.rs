//! Trait definitions for SORACOM operations.
//!
//! Each resource type implements the traits its endpoints support; the
//! verb-like lifecycle operations (activate, terminate, ...) stay as
//! associated functions on the resource types themselves.

mod get;
mod list;

pub use get::Get;
pub use list::{CursorFilter, List};
