//! # Interval Clock
//!
//! Logic for a four-button, four-digit interval timer: stopwatch, timer,
//! interval, Tabata and "for good and bad" rounds, with a precount, buzzer
//! cues and a multiplexed seven-segment display.
//!
//! Everything here is hardware independent and runs on the host under
//! `cargo test`. The RTIC application in `main.rs` wires it to an RP2040.
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`inbox`] | Seconds and key presses handed over from interrupts |
//! | [`debounce`] | Raw key samples to press events |
//! | [`machine`] | Mode selection, configuration, precount and running |
//! | [`plan`] | Modes and their work/pause schedules |
//! | [`clock`] | Minute/second arithmetic |
//! | [`display`] | Display state and the digit multiplexer |
//! | [`buzzer`] | Pulse scheduling |
//! | [`config`] | Timing constants |

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules.
mod fmt;

pub mod buzzer;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod display;
pub mod inbox;
pub mod machine;
pub mod plan;

pub use buzzer::{BuzzRequest, Buzzer, Pulse};
pub use clock::ClockTime;
pub use debounce::Debouncer;
pub use display::{DisplayState, Glyph, Multiplexer};
pub use inbox::{Button, EventInbox};
pub use machine::{Field, Machine, Session, State};
pub use plan::{IntervalPlan, Mode, Segment};
