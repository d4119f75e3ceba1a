//! Error taxonomy for the analysis path and creative intake.

use thiserror::Error;

/// Failure modes on the road to an analysis result. Every variant is mapped
/// to a well-formed `AnalysisResult` at the engine boundary; callers above
/// the engine never see these.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The API credential is missing; detected before any network call.
    #[error("API credential is not configured")]
    Configuration,

    /// The creative set was empty at request time; no call is made.
    #[error("no creatives were provided for analysis")]
    NoInput,

    /// The model endpoint answered with a client/server error status.
    #[error("model endpoint returned HTTP {status}")]
    Transport { status: u16 },

    /// Anything else: connection failures, malformed responses, parse errors.
    #[error("{0}")]
    Unknown(String),
}

/// Per-file intake failures. These never abort a batch; each one is captured
/// as a slot warning.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("file is empty")]
    Empty,

    #[error("could not decode image dimensions: {0}")]
    ImageDecode(String),

    #[error("could not decode video dimensions: {0}")]
    VideoDecode(String),
}
