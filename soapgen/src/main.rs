use std::{
    fs::{self, File},
    io::{self, Write},
    path::Path,
};

use structopt::StructOpt;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use soapgen_wsdl as wsdl;

mod summary;

#[derive(Debug, Error)]
enum Error {
    #[error("Error parsing WSDL: {0}")]
    ParseError(#[from] wsdl::error::Error),

    #[error("Unable to parse provided URL")]
    UrlParseError(#[from] url::ParseError),

    #[error("Unable to convert provided path")]
    PathConversionError(Option<io::Error>),

    #[error("Unable to get file from server")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Unsupported URL scheme {0}")]
    UnsupportedScheme(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

#[derive(StructOpt)]
struct Args {
    /// Where to write the summary; stdout when omitted
    #[structopt(short, long)]
    output: Option<String>,

    /// Log at debug level
    #[structopt(short, long)]
    verbose: bool,

    /// Only log errors
    #[structopt(short, long)]
    quiet: bool,

    /// Path or http(s) URL of the WSDL document
    input: String,
}

fn init_tracing(args: &Args) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SOAPGEN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn locate(input: &str) -> Result<Url, Error> {
    match Url::parse(input) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = Path::new(input)
                .canonicalize()
                .map_err(|err| Error::PathConversionError(Some(err)))?;

            Url::from_file_path(&path).map_err(|()| Error::PathConversionError(None))
        }
        Err(err) => Err(err.into()),
    }
}

fn load(url: &Url) -> Result<String, Error> {
    debug!(%url, "loading document");

    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| Error::PathConversionError(None))?;
            Ok(fs::read_to_string(path)?)
        }

        "http" | "https" => Ok(reqwest::blocking::get(url.clone())?
            .error_for_status()?
            .text()?),

        other => Err(Error::UnsupportedScheme(other.into())),
    }
}

#[paw::main]
fn main(args: Args) -> Result<(), Error> {
    init_tracing(&args);

    let document = load(&locate(&args.input)?)?;
    let (definition, diagnostics) = wsdl::parse_with_diagnostics(&document)?;

    for diagnostic in &diagnostics {
        warn!("{}", diagnostic);
    }

    match &args.output {
        Some(output) => {
            let mut file = File::create(output)?;
            summary::write_summary(&definition, &mut file)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            summary::write_summary(&definition, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}
