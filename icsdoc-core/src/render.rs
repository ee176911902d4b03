//! Template rendering.
//!
//! Templates are Tera templates. The event list is bound as `events`, and
//! every interpolated value is HTML-escaped unless it goes through the
//! `safeHTML` filter. Tera's escaping covers `/` as well as `& < > " '`, so
//! `<b>note</b>` comes out as `&lt;b&gt;note&lt;&#x2F;b&gt;` and a URL as
//! `https:&#x2F;&#x2F;...`; pass such values through `safeHTML` to keep them
//! as written:
//!
//! ```text
//! # Agenda
//! {% for event in events %}
//! ## {{ event.summary }} ({{ event.start }} - {{ event.end }})
//! {{ event.description | safeHTML }}
//! {% endfor %}
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tera::{Context, Filter, Tera, Value};
use tracing::debug;

use crate::error::{IcsDocError, IcsDocResult};
use crate::event::Event;

/// Name of the filter that marks a string as already-safe HTML.
pub const SAFE_HTML: &str = "safeHTML";

/// Passes a string through and tells Tera not to escape the result.
struct SafeHtml;

impl Filter for SafeHtml {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(tera::Error::msg(format!(
                "Filter `{SAFE_HTML}` expects a string, got {other}"
            ))),
        }
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// A loaded and parsed document template.
pub struct Renderer {
    tera: Tera,
    name: String,
}

impl Renderer {
    /// Load a template from disk. The path doubles as the template name in
    /// error messages.
    pub fn from_file(path: &Path) -> IcsDocResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            IcsDocError::Template(format!("Could not read template {}: {e}", path.display()))
        })?;

        Self::from_source(&path.display().to_string(), &source)
    }

    /// Parse a template from a string.
    pub fn from_source(name: &str, source: &str) -> IcsDocResult<Self> {
        let mut tera = Tera::default();
        // Escape regardless of the template's file extension.
        tera.autoescape_on(vec![""]);
        tera.register_filter(SAFE_HTML, SafeHtml);
        tera.add_raw_template(name, source)?;

        debug!(template = name, "loaded template");
        Ok(Renderer {
            tera,
            name: name.to_string(),
        })
    }

    /// Execute the template against the events.
    pub fn render(&self, events: &[Event]) -> IcsDocResult<String> {
        let mut context = Context::new();
        context.insert("events", events);

        let output = self.tera.render(&self.name, &context)?;
        debug!(template = %self.name, bytes = output.len(), "rendered template");
        Ok(output)
    }

    /// Render into `sink`, which `target` names in error messages, and
    /// return the text written. Nothing is written unless rendering succeeds.
    pub fn render_to<W: Write>(
        &self,
        events: &[Event],
        sink: &mut W,
        target: &Path,
    ) -> IcsDocResult<String> {
        let output = self.render(events)?;

        sink.write_all(output.as_bytes())
            .and_then(|()| sink.flush())
            .map_err(|source| IcsDocError::OutputWrite {
                path: target.to_path_buf(),
                source,
            })?;
        Ok(output)
    }

    /// Render the events into the file at `path`, returning the text written.
    /// The file is created (or truncated) only once rendering has succeeded.
    pub fn write_document(&self, events: &[Event], path: &Path) -> IcsDocResult<String> {
        let mut sink = OutputFile { path, file: None };
        let output = self.render_to(events, &mut sink, path)?;

        debug!(path = %path.display(), bytes = output.len(), "wrote document");
        Ok(output)
    }
}

/// A file that is created on its first write or flush.
struct OutputFile<'a> {
    path: &'a Path,
    file: Option<File>,
}

impl OutputFile<'_> {
    fn open(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => File::create(self.path)?,
        };
        Ok(self.file.insert(file))
    }
}

impl Write for OutputFile<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.open()?.flush()
    }
}
