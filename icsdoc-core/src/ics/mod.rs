//! Reading iCalendar sources.
//!
//! Parsing itself is delegated to the icalendar crate's parser; this module
//! only picks out the VEVENT properties icsdoc consumes.

mod parse;

pub use parse::{parse_calendar, read_calendar_file};
