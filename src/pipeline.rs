//! The conversion run: calendar -> events -> Markdown -> optional PDF.
//!
//! Each stage finishes (and closes its output) before the next starts. The
//! first error ends the run; files written by earlier stages stay on disk.

use anyhow::Result;
use icsdoc_core::{Renderer, Settings, build_all, ics, pdf};
use tracing::info;

pub fn run(settings: &Settings) -> Result<()> {
    let records = ics::read_calendar_file(&settings.ics_file)?;
    let events = build_all(records)?;

    let renderer = Renderer::from_file(&settings.md_template)?;
    let text = renderer.write_document(&events, &settings.md_file)?;
    info!(
        events = events.len(),
        path = %settings.md_file.display(),
        "wrote markdown"
    );

    if let Some(pdf_path) = settings.pdf_target() {
        let bytes = pdf::to_pdf(&text, &settings.pdf)?;
        pdf::write_pdf(pdf_path, &bytes)?;
        info!(path = %pdf_path.display(), "wrote PDF");
    }

    Ok(())
}
