use thiserror::Error;

/// why a plain-text GET against the device produced no usable body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// request never completed (offline, dns, cors, aborted)
    #[error("transport error: {0}")]
    Transport(String),
    /// device answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),
    /// body could not be read as text
    #[error("unreadable body: {0}")]
    Body(String),
}

impl FetchError {
    pub fn from_status(status: u16) -> Option<Self> {
        if (200..300).contains(&status) {
            None
        } else {
            Some(FetchError::Status(status))
        }
    }
}

/// hand a successful body to `update`, or give the failure back untouched
///
/// `update` never runs on failure, so whatever it would have written keeps
/// its previous value.
pub fn deliver<F>(result: Result<String, FetchError>, update: F) -> Option<FetchError>
where
    F: FnOnce(String),
{
    match result {
        Ok(body) => {
            update(body);
            None
        }
        Err(err) => Some(err),
    }
}
