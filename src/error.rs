use thiserror::Error;

/// Errors that can occur during caption generation operations
#[derive(Error, Debug)]
pub enum CaptionError {
    /// HTTP transport error while talking to the text-generation endpoint.
    /// Fatal: nothing is persisted when the description call fails.
    #[error("Generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The text-generation endpoint answered but the reply was unusable
    /// (non-2xx status, missing choices, empty content)
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The keyword reply could not be decoded as a list.
    /// Non-fatal: the record is saved with an empty keyword list.
    #[error("Could not parse keywords from model reply: {0:?}")]
    KeywordParse(String),

    /// The report image could not be fetched or read.
    /// Non-fatal: the report is produced without the image.
    #[error("Could not embed image in report: {0}")]
    ExportImage(String),

    /// Writing the record to the remote document collection failed.
    /// Non-fatal: the local CSV row is already written.
    #[error("Remote mirror write failed: {0}")]
    RemoteMirror(String),

    /// CSV encoding or decoding error in the local store
    #[error("Store error: {0}")]
    Store(#[from] csv::Error),

    /// Filesystem error (store rewrite, report write, image read)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),
}
