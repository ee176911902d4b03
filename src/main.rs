mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use icsdoc_core::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "icsdoc")]
#[command(about = "Render the events of an iCalendar file into Markdown, and optionally PDF, using a template")]
#[command(version)]
struct Cli {
    /// The calendar file to convert [default: ics.ics]
    #[arg(long)]
    ics_file: Option<PathBuf>,

    /// The output file to write the markdown to [default: ics.md]
    #[arg(long)]
    md_file: Option<PathBuf>,

    /// If set, also render the markdown to a PDF file with this name.
    /// An empty value disables PDF output.
    #[arg(long)]
    pdf_file: Option<String>,

    /// The Tera template used to render the markdown [default: mk.tmpl]
    #[arg(long)]
    md_template: Option<PathBuf>,

    /// TOML file with defaults for the options above and PDF page setup
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line win over the config file.
    fn apply(self, settings: &mut Settings) {
        if let Some(path) = self.ics_file {
            settings.ics_file = path;
        }
        if let Some(path) = self.md_file {
            settings.md_file = path;
        }
        if let Some(path) = self.pdf_file {
            settings.pdf_file = Some(PathBuf::from(path));
        }
        if let Some(path) = self.md_template {
            settings.md_template = path;
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply(&mut settings);

    pipeline::run(&settings)
}
