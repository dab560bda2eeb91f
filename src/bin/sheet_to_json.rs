//! Entry point for the sheet → JSON direction.

use std::path::{
    Path,
    PathBuf,
};

use clap::Parser;
use i18n_sheet::config::{
    self,
    ConfigError,
};
use i18n_sheet::convert;
use i18n_sheet::error::ConvertError;

/// Rebuild per-locale JSON translation files from a translation sheet.
#[derive(Parser, Debug)]
#[command(name = "sheet-to-json", version, about)]
struct Args {
    /// Path of the sheet to read.
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Directory to write the `<locale>.json` files into.
    #[arg(long)]
    locales_dir: Option<PathBuf>,

    /// Separator joining dotted-key segments.
    #[arg(long)]
    separator: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(Args::parse()) {
        tracing::error!("{error}");
        std::process::exit(1);
    }
}

/// Resolve settings (file, then flags) and run the import pipeline.
fn run(args: Args) -> Result<(), ConvertError> {
    let mut settings = config::load_from_dir(Path::new("."))?;
    if let Some(sheet) = args.sheet {
        settings.sheet_path = sheet;
    }
    if let Some(dir) = args.locales_dir {
        settings.locales_dir = dir;
    }
    if let Some(separator) = args.separator {
        settings.key_separator = separator;
    }
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    convert::import_from_sheet(&settings)
}
