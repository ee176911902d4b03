//! Core of icsdoc: turn the events of an iCalendar file into a document.
//!
//! - `ics` reads a calendar into [`RawEvent`]s
//! - `event` validates them into [`Event`]s
//! - `render` runs a Tera template over the events
//! - `pdf` converts the rendered Markdown into a PDF

pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod pdf;
pub mod render;

pub use config::Settings;
pub use error::{IcsDocError, IcsDocResult};
pub use event::{Event, EventField, RawEvent, build_all};
pub use pdf::{PageSize, PdfOptions};
pub use render::Renderer;
