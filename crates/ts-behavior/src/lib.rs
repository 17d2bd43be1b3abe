//! `ts-behavior` — pluggable per-vehicle speed modifiers.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`context`]  | `SpeedControl<'a>` — the only view of a vehicle a modifier gets |
//! | [`model`]    | `SpeedModifier` trait, `FnModifier` / [`from_fn`] adapter      |
//! | [`noop`]     | `NoopModifier` — never touches speed                          |
//! | [`slowdown`] | `RandomSlowdown` — periodic ±N km/h jitter, floored at 0      |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! A vehicle calls its modifier once per tick, *before* integrating its
//! position.  The modifier can read the vehicle's id and position and may
//! rewrite its speed; nothing else is reachable through [`SpeedControl`].
//! A modifier that returns `Err` does not abort the tick: the vehicle logs a
//! warning and integrates with whatever speed the modifier left behind.

pub mod context;
pub mod error;
pub mod model;
pub mod noop;
pub mod slowdown;


pub use context::SpeedControl;
pub use error::{BehaviorError, BehaviorResult};
pub use model::{FnModifier, SpeedModifier, from_fn};
pub use noop::NoopModifier;
pub use slowdown::RandomSlowdown;
