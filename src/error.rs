/// Failures talking to the generative model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("GEMINI_API_KEY is not set. Set it to use the summarizer.")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode model response: {0}")]
    Decode(String),
}

/// Title lookup failures.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Invalid YouTube URL format")]
    InvalidUrl,

    #[error("Video not found")]
    NotFound,

    #[error("Title lookup failed: {0}")]
    Model(#[from] ModelError),
}

/// Summary generation failures.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Summary generation failed: {0}")]
    Model(#[from] ModelError),
}
