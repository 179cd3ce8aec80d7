// errors.rs
use crate::storage::StoreError;
use astra::Response;

/// Errors that end a request with an error page instead of a normal view.
///
/// Workflow outcomes the user can act on (bad input, unknown address) are not
/// here; those re-render the form with a notice.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Spreadsheet error: {0}")]
    Xlsx(String),

    #[error("Internal Server Error")]
    Internal,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Storage(_) | ServerError::Xlsx(_) | ServerError::Internal => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
