// Models module - in-memory attendance records

pub mod attendee;
pub mod event;

pub use attendee::Attendee;
pub use event::{CreateEventData, DuplicateAttendee, Event};
