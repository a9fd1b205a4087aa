//! Core types shared across Bookkeeper facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! logging facility and by every repository that emits structured events.

pub mod schema;
