use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteKeyError {
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    #[error("Invalid edition: {0} (editions are non-negative)")]
    InvalidEdition(i64),
}

impl SiteKeyError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        SiteKeyError::MalformedAddress(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, SiteKeyError>;
