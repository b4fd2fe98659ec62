use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "family-timetable", version, about)]
struct Cli {
    /// Timetable source file (markdown-like text).
    source: PathBuf,

    /// Output document path.
    destination: PathBuf,

    /// Output format; inferred from the destination extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Render settings JSON (page geometry, font sizes, font files, dpi).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Extra directory with .ttf/.otf fonts for PNG output. Repeatable.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// PNG resolution; overrides the settings file.
    #[arg(long)]
    dpi: Option<f64>,

    /// Log debug output (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Pdf,
    Svg,
    Png,
    Json,
}

impl From<FormatChoice> for family_timetable::OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Pdf => Self::Pdf,
            FormatChoice::Svg => Self::Svg,
            FormatChoice::Png => Self::Png,
            FormatChoice::Json => Self::Json,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = match &cli.settings {
        Some(path) => family_timetable::RenderSettings::from_path(path)?,
        None => family_timetable::RenderSettings::default(),
    };
    settings.font_dirs.extend(cli.font_dirs);
    if let Some(dpi) = cli.dpi {
        settings.dpi = dpi;
    }

    family_timetable::render_file(
        &cli.source,
        &cli.destination,
        &settings,
        cli.format.map(Into::into),
    )?;

    eprintln!("wrote {}", cli.destination.display());
    Ok(())
}
