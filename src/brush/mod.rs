//! Pointer smoothing ("lazy brush").
//!
//! The brush trails the raw pointer on an invisible string of fixed length:
//! moving the pointer within the string's reach leaves the brush in place (or
//! eases it closer), moving beyond it drags the brush along.

pub mod lazy;

pub use lazy::{LazyBrush, MOVE_EPSILON, UpdateOptions};
