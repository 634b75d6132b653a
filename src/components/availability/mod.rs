//! Weekly availability derived from calendar bookings.
//!
//! Everything here is a pure function of the events, the displayed week and
//! the current date; fetching and presentation live elsewhere.

mod slots;
mod view;
mod week;

pub use slots::{compute_day_slots, events_for_day, DaySlot, OperatingWindow};
pub use view::{DayAvailability, WeekAvailability};
pub use week::WeekWindow;
