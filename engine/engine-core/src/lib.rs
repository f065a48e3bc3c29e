//! Core primitives for the Splendor game engine
//!
//! This crate provides the pieces every other engine crate builds on:
//! - `UndoLog`: Append-only log of reversible operations with stacked markers
//! - `Marker`: Opaque handle used to roll a subsystem back to an earlier point
//! - `rng`: Seeded ChaCha generators for reproducible games and searches

pub mod rng;
pub mod undo;

// Re-export main types for convenience
pub use rng::GameRng;
pub use undo::{Marker, UndoLog, Unwind};
