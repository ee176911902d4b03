//! File locations and PDF page setup.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::{IcsDocError, IcsDocResult};
use crate::pdf::PdfOptions;

static DEFAULT_ICS_FILE: &str = "ics.ics";
static DEFAULT_MD_FILE: &str = "ics.md";
static DEFAULT_MD_TEMPLATE: &str = "mk.tmpl";

fn default_ics_file() -> PathBuf {
    PathBuf::from(DEFAULT_ICS_FILE)
}

fn default_md_file() -> PathBuf {
    PathBuf::from(DEFAULT_MD_FILE)
}

fn default_md_template() -> PathBuf {
    PathBuf::from(DEFAULT_MD_TEMPLATE)
}

/// Where to read from and write to.
///
/// Loaded from an optional TOML file; any field left out keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Calendar to convert
    #[serde(default = "default_ics_file")]
    pub ics_file: PathBuf,

    /// Rendered Markdown output
    #[serde(default = "default_md_file")]
    pub md_file: PathBuf,

    /// PDF output; no PDF is produced when unset or empty
    #[serde(default)]
    pub pdf_file: Option<PathBuf>,

    /// Template used to render the Markdown
    #[serde(default = "default_md_template")]
    pub md_template: PathBuf,

    #[serde(default)]
    pub pdf: PdfOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ics_file: default_ics_file(),
            md_file: default_md_file(),
            pdf_file: None,
            md_template: default_md_template(),
            pdf: PdfOptions::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given.
    /// A named file that does not exist is an error.
    pub fn load(path: Option<&Path>) -> IcsDocResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.is_file() {
            return Err(IcsDocError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()
            .map_err(|e| IcsDocError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| IcsDocError::Config(e.to_string()))
    }

    /// The PDF destination, if PDF output is enabled.
    pub fn pdf_target(&self) -> Option<&Path> {
        self.pdf_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}
