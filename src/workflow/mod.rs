mod property_workflow;

pub use property_workflow::PropertyWorkflow;

use crate::geocode::GeocodeError;
use crate::storage::StoreError;

/// Why a create, update or delete did not persist.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(String),

    /// The lookup worked but found nothing. The user should fix the address.
    #[error("Address not found: {0}. Check the address and try again.")]
    UnresolvableAddress(String),

    /// The lookup service could not be used. The address may be fine.
    #[error("{0}. Try again later.")]
    LookupFailure(#[source] GeocodeError),

    #[error("Could not save the property: {0}")]
    Persistence(#[from] StoreError),

    #[error("No property with id {0}")]
    RecordNotFound(String),
}

/// Why auto-fill left the draft untouched. None of these block manual entry.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AutoFillError {
    #[error("Enter a listing URL to auto-fill from")]
    MissingUrl,

    #[error("Auto-fill is disabled: no LLM API key is configured")]
    Disabled,

    #[error("Could not load the page")]
    FetchFailure,

    #[error("Could not extract data from the page")]
    ExtractionFailure,
}
