pub mod draft;
pub mod id;
pub mod property;

pub use draft::{ExtractedFields, PropertyDraft};
pub use id::generate_record_id;
pub use property::{clamp_quality, today, Coordinates, PropertyRecord};
