//! Utility helpers for tests.

pub mod terrain;
pub mod walking;

pub use terrain::{FlatGround, Ledge};
pub use walking::{intent, step_many, HELD_FORWARD};
