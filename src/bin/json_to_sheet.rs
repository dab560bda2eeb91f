//! Entry point for the JSON → sheet direction.

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
use i18n_sheet::locale::LocaleCode;

/// Export per-locale JSON translation files into one translation sheet.
#[derive(Parser, Debug)]
#[command(name = "json-to-sheet", version, about)]
struct Args {
    /// Directory holding the `<locale>.json` files.
    #[arg(long)]
    locales_dir: Option<PathBuf>,

    /// Path of the sheet to write.
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Separator joining dotted-key segments.
    #[arg(long)]
    separator: Option<String>,

    /// Locale listed first in the sheet.
    #[arg(long)]
    priority_locale: Option<LocaleCode>,
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

/// Resolve settings (file, then flags) and run the export pipeline.
fn run(args: Args) -> Result<(), ConvertError> {
    let mut settings = config::load_from_dir(Path::new("."))?;
    if let Some(dir) = args.locales_dir {
        settings.locales_dir = dir;
    }
    if let Some(sheet) = args.sheet {
        settings.sheet_path = sheet;
    }
    if let Some(separator) = args.separator {
        settings.key_separator = separator;
    }
    if let Some(locale) = args.priority_locale {
        settings.priority_locale = locale;
    }
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    convert::export_to_sheet(&settings)
}
