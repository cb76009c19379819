use camino::Utf8PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum BirdError {
    #[error("taxonomy request failed: {0}")]
    TaxonomyHttp(String),

    #[error("taxonomy source returned status {status}: {message}")]
    TaxonomyStatus { status: u16, message: String },

    #[error("failed to parse taxonomy CSV: {0}")]
    TaxonomyParse(String),

    #[error("failed to decode record cache: {0}")]
    CacheDecode(String),

    #[error("failed to read preferences file at {0}")]
    #[diagnostic(help("create it with one boolean per reference site, e.g. {{\"audubon.org\": true}}"))]
    ConfigRead(Utf8PathBuf),

    #[error("failed to parse preferences: {0}")]
    ConfigParse(String),

    #[error("missing preference for reference site: {0}")]
    MissingPreference(String),

    #[error("invalid run payload: {0}")]
    InvalidPayload(String),

    #[error("unknown reference site: {0}")]
    UnknownReferenceSite(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
