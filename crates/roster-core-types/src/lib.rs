//! Core types shared across Roster facilities
//!
//! Holds the canonical field keys and event names used by both the
//! error facility and the logging facility, so that every crate emits
//! the same structured shape.

pub mod schema;
