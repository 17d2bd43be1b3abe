//! `ts-vehicle` — vehicles, transponders, and log records.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`vehicle`]     | `Vehicle` — id, speed, position, optional modifier      |
//! | [`transponder`] | `Transponder<'a>` — stateless snapshot view of a vehicle |
//! | [`record`]      | `Reading`, `Record`, fixed-precision rounding           |
//!
//! # Units
//!
//! Speed is km/h, position is km, `dt` and `sim_time` are seconds.  One tick
//! advances a vehicle by `speed / 3600 * dt` km.

pub mod record;
pub mod transponder;
pub mod vehicle;


pub use record::{POSITION_DECIMALS, Reading, Record, SPEED_DECIMALS, round_to};
pub use transponder::Transponder;
pub use vehicle::{TickOutcome, Vehicle};
