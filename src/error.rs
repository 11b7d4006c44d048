use thiserror::Error;

use crate::develop::error::{DetectError, ParseError};
use crate::meta::error::FetchError;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write updated file: {0}")]
    Io(#[from] std::io::Error),
}
