//! Core data model.
//!
//! These types represent a single-day trip: the entries an author writes,
//! the itinerary that orders them, and the schedule derived from it.

mod entry;
mod itinerary;
mod schedule;

pub use entry::{Entry, Location, Place, TransportMode, Travel};
pub use itinerary::Itinerary;
pub use schedule::ScheduledEntry;
