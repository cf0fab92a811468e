//! Single-day itineraries: places and travel legs, a derived schedule, and
//! map primitives for drawing the trip.
//!
//! The schedule is derived by [`schedule::derive_schedule`], a pure pass over
//! the entries. Everything else loads, formats, or draws.

pub mod cli;
pub mod clock;
pub mod config;
pub mod loader;
pub mod map;
pub mod model;
pub mod schedule;
