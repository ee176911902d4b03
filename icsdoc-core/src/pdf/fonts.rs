//! Fonts embedded into every PDF.
//!
//! DejaVu Sans for prose and DejaVu Sans Mono for code ship with the crate
//! (see `fonts/LICENSE`), so output does not depend on fonts installed on the
//! host and text is measured with real glyph metrics.

use genpdf::fonts::{FontData, FontFamily};

use crate::error::{IcsDocError, IcsDocResult};

static SANS: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");
static SANS_BOLD: &[u8] = include_bytes!("../../fonts/DejaVuSans-Bold.ttf");
static SANS_OBLIQUE: &[u8] = include_bytes!("../../fonts/DejaVuSans-Oblique.ttf");
static SANS_BOLD_OBLIQUE: &[u8] = include_bytes!("../../fonts/DejaVuSans-BoldOblique.ttf");
static MONO: &[u8] = include_bytes!("../../fonts/DejaVuSansMono.ttf");
static MONO_BOLD: &[u8] = include_bytes!("../../fonts/DejaVuSansMono-Bold.ttf");

fn load(name: &str, bytes: &'static [u8]) -> IcsDocResult<FontData> {
    FontData::new(bytes.to_vec(), None)
        .map_err(|e| IcsDocError::Conversion(format!("Could not load font {name}: {e}")))
}

/// Family used for headings, paragraphs and lists.
pub fn body() -> IcsDocResult<FontFamily<FontData>> {
    Ok(FontFamily {
        regular: load("DejaVuSans", SANS)?,
        bold: load("DejaVuSans-Bold", SANS_BOLD)?,
        italic: load("DejaVuSans-Oblique", SANS_OBLIQUE)?,
        bold_italic: load("DejaVuSans-BoldOblique", SANS_BOLD_OBLIQUE)?,
    })
}

/// Family used for code blocks. Code is never italic, so the upright faces
/// stand in for the slanted ones.
pub fn mono() -> IcsDocResult<FontFamily<FontData>> {
    Ok(FontFamily {
        regular: load("DejaVuSansMono", MONO)?,
        bold: load("DejaVuSansMono-Bold", MONO_BOLD)?,
        italic: load("DejaVuSansMono", MONO)?,
        bold_italic: load("DejaVuSansMono-Bold", MONO_BOLD)?,
    })
}
