//! Calendar events as seen by templates.
//!
//! A [`RawEvent`] holds the properties of one VEVENT exactly as the parser
//! produced them. [`Event::extract`] checks the required ones and yields the
//! normalized [`Event`] handed to the renderer.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{IcsDocError, IcsDocResult};

/// The properties of one VEVENT that icsdoc reads, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    /// 1-based position of the event in its calendar
    pub position: usize,
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
}

impl RawEvent {
    /// Human-readable label used in error messages: the UID when known,
    /// otherwise the position in the calendar.
    pub fn label(&self) -> String {
        match &self.uid {
            Some(uid) => format!("'{uid}'"),
            None => format!("#{}", self.position),
        }
    }
}

/// Required event properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Summary,
    Start,
    End,
}

impl EventField {
    /// iCalendar property name
    pub fn property_name(self) -> &'static str {
        match self {
            EventField::Summary => "SUMMARY",
            EventField::Start => "DTSTART",
            EventField::End => "DTEND",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventField::Summary => "summary",
            EventField::Start => "start time",
            EventField::End => "end time",
        };
        f.write_str(name)
    }
}

/// A calendar event ready for rendering.
///
/// `start` and `end` are the raw property values; no date parsing happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub summary: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

impl Event {
    /// Validate a raw event. Fails on the first missing required property,
    /// checked in the order summary, start, end.
    pub fn extract(raw: RawEvent) -> IcsDocResult<Event> {
        let missing = |field: EventField| IcsDocError::MissingField {
            field,
            event: raw.label(),
        };

        let summary = raw.summary.clone().ok_or_else(|| missing(EventField::Summary))?;
        let start = raw.start.clone().ok_or_else(|| missing(EventField::Start))?;
        let end = raw.end.clone().ok_or_else(|| missing(EventField::End))?;

        Ok(Event {
            summary,
            start,
            end,
            description: raw.description.unwrap_or_default(),
        })
    }
}

impl TryFrom<RawEvent> for Event {
    type Error = IcsDocError;

    fn try_from(raw: RawEvent) -> IcsDocResult<Self> {
        Event::extract(raw)
    }
}

/// Extract every raw event, keeping calendar order.
///
/// The first invalid event aborts the whole build; no partial list is returned.
pub fn build_all<I>(records: I) -> IcsDocResult<Vec<Event>>
where
    I: IntoIterator<Item = RawEvent>,
{
    let events = records
        .into_iter()
        .map(|raw| {
            let event = Event::extract(raw)?;
            debug!(summary = %event.summary, start = %event.start, "extracted event");
            Ok(event)
        })
        .collect::<IcsDocResult<Vec<_>>>()?;

    info!(count = events.len(), "extracted events");
    Ok(events)
}
