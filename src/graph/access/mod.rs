//! Internal graph accessors and low-level building blocks.
//!
//! This module is intentionally `pub(crate)` so search code can share
//! scratch state (visited sets, etc.) without exposing it as part of the
//! public API surface.

pub(crate) mod visited;
