use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Non-2xx status from the completion endpoint.
    #[error("completion API error HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport failure, timeout, or malformed JSON body.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered but no usable text could be extracted.
    #[error("completion API returned no usable text")]
    EmptyReply,
}

pub type Result<T> = std::result::Result<T, Error>;
