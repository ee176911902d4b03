//! ICS parsing using the icalendar crate's parser.

use std::path::Path;

use icalendar::parser::{Component, read_calendar, unfold};
use tracing::debug;

use crate::error::{IcsDocError, IcsDocResult};
use crate::event::RawEvent;

/// Read and parse a calendar file into raw events, in file order.
pub fn read_calendar_file(path: &Path) -> IcsDocResult<Vec<RawEvent>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| IcsDocError::SourceRead(format!("{}: {e}", path.display())))?;

    debug!(path = %path.display(), bytes = content.len(), "read calendar");
    parse_calendar(&content)
}

/// Parse ICS content into raw events, one per VEVENT, in source order.
pub fn parse_calendar(content: &str) -> IcsDocResult<Vec<RawEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| IcsDocError::SourceRead(e.to_string()))?;

    let events: Vec<RawEvent> = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .enumerate()
        .map(|(i, vevent)| to_raw_event(i + 1, vevent))
        .collect();

    debug!(count = events.len(), "parsed VEVENT components");
    Ok(events)
}

fn to_raw_event(position: usize, vevent: &Component<'_>) -> RawEvent {
    let prop = |name: &str| vevent.find_prop(name).map(|p| p.val.to_string());

    RawEvent {
        position,
        uid: prop("UID"),
        summary: prop("SUMMARY"),
        start: prop("DTSTART"),
        end: prop("DTEND"),
        description: prop("DESCRIPTION"),
    }
}
