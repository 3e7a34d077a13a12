//! Systems that run on the dive each active tick.
//!
//! Systems are plain functions over the hecs world and the state they are
//! handed. They own nothing; persistent state lives in components or in the
//! small state structs the engine keeps.

pub mod cleanup;
pub mod collision;
pub mod ping;
pub mod snapshot;
pub mod sonar;
