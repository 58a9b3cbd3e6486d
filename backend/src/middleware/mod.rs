//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit in front of every handler.
//! Authentication is an extractor rather than middleware so public listings
//! and protected writes can share one scope.

pub mod trace;

pub use trace::Trace;
